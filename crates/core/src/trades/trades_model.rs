//! Options trade domain models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{MAX_AMOUNT, MAX_CONTRACTS, MAX_SYMBOL_LENGTH};
use crate::errors::{Result, TradeError, ValidationError};
use crate::metrics::{close_total_cost, open_total_cost, profit_loss};
use crate::utils::formatters::format_ticker;
use crate::utils::validation::{
    require_at_most, require_length, require_non_negative, require_positive,
    require_positive_integer,
};

/// Lifecycle state of a trade. `Open` is initial, `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// Transactions that create a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningAction {
    BuyToOpen,
    SellToOpen,
}

/// Transactions that close an existing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingAction {
    BuyToClose,
    SellToClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    Call,
    Put,
}

/// Market exposure implied by the opening action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionDirection {
    /// Bought to open: paid a debit, profits when the option gains value.
    Long,
    /// Sold to open: received a credit, profits when the option loses value.
    Short,
}

impl OpeningAction {
    pub fn direction(self) -> PositionDirection {
        match self {
            OpeningAction::BuyToOpen => PositionDirection::Long,
            OpeningAction::SellToOpen => PositionDirection::Short,
        }
    }

    /// The only closing action that can close a position opened with `self`.
    pub fn valid_close_action(self) -> ClosingAction {
        match self {
            OpeningAction::BuyToOpen => ClosingAction::SellToClose,
            OpeningAction::SellToOpen => ClosingAction::BuyToClose,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpeningAction::BuyToOpen => "buy_to_open",
            OpeningAction::SellToOpen => "sell_to_open",
        }
    }
}

impl ClosingAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ClosingAction::BuyToClose => "buy_to_close",
            ClosingAction::SellToClose => "sell_to_close",
        }
    }
}

impl OptionType {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl TradeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
        }
    }
}

/// Returns the closing action that pairs with `open_action`.
pub fn valid_close_action(open_action: OpeningAction) -> ClosingAction {
    open_action.valid_close_action()
}

/// Buy-to-open pairs only with sell-to-close; sell-to-open only with buy-to-close.
pub fn are_actions_paired(open_action: OpeningAction, close_action: ClosingAction) -> bool {
    open_action.valid_close_action() == close_action
}

pub fn is_opening_action(action: &str) -> bool {
    action.parse::<OpeningAction>().is_ok()
}

pub fn is_closing_action(action: &str) -> bool {
    action.parse::<ClosingAction>().is_ok()
}

macro_rules! impl_str_enum {
    ($ty:ty, $label:literal, [$($text:literal => $variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
                    $($text => Ok($variant),)+
                    other => Err(ValidationError::InvalidInput(format!(
                        "unknown {} '{}'",
                        $label, other
                    ))),
                }
            }
        }
    };
}

impl_str_enum!(OpeningAction, "opening action", [
    "buy_to_open" => OpeningAction::BuyToOpen,
    "bto" => OpeningAction::BuyToOpen,
    "sell_to_open" => OpeningAction::SellToOpen,
    "sto" => OpeningAction::SellToOpen,
]);

impl_str_enum!(ClosingAction, "closing action", [
    "buy_to_close" => ClosingAction::BuyToClose,
    "btc" => ClosingAction::BuyToClose,
    "sell_to_close" => ClosingAction::SellToClose,
    "stc" => ClosingAction::SellToClose,
]);

impl_str_enum!(OptionType, "option type", [
    "call" => OptionType::Call,
    "put" => OptionType::Put,
]);

impl_str_enum!(TradeStatus, "trade status", [
    "open" => TradeStatus::Open,
    "closed" => TradeStatus::Closed,
]);

/// A complete options position: one opening transaction and, once closed,
/// one closing transaction for the same quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub portfolio_id: Option<String>,

    pub symbol: String,
    pub option_type: OptionType,
    pub strike_price: Decimal,
    #[serde(with = "crate::utils::serde_date")]
    pub expiration_date: NaiveDate,

    pub open_action: OpeningAction,
    pub open_quantity: Decimal,
    pub open_premium: Decimal,
    pub open_commission: Decimal,
    #[serde(with = "crate::utils::serde_date")]
    pub open_trade_date: NaiveDate,
    pub open_total_cost: Decimal,

    #[serde(default)]
    pub close_action: Option<ClosingAction>,
    #[serde(default)]
    pub close_quantity: Option<Decimal>,
    #[serde(default)]
    pub close_premium: Option<Decimal>,
    #[serde(default)]
    pub close_commission: Option<Decimal>,
    #[serde(default, with = "crate::utils::serde_date::option")]
    pub close_trade_date: Option<NaiveDate>,
    #[serde(default)]
    pub close_total_cost: Option<Decimal>,

    pub status: TradeStatus,
    #[serde(default)]
    pub profit_loss: Option<Decimal>,

    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    pub fn direction(&self) -> PositionDirection {
        self.open_action.direction()
    }

    pub fn valid_close_action(&self) -> ClosingAction {
        self.open_action.valid_close_action()
    }

    /// Opening total recomputed from the opening primitives.
    pub fn computed_open_total_cost(&self) -> Decimal {
        open_total_cost(
            self.open_action,
            self.open_premium,
            self.open_quantity,
            self.open_commission,
        )
    }

    /// Closing total recomputed from the closing primitives, if the trade has them.
    pub fn computed_close_total_cost(&self) -> Option<Decimal> {
        let action = self.close_action?;
        let premium = self.close_premium?;
        let quantity = self.close_quantity.unwrap_or(self.open_quantity);
        let commission = self.close_commission.unwrap_or(Decimal::ZERO);
        Some(close_total_cost(action, premium, quantity, commission))
    }

    /// Profit/loss recomputed from primitives; `None` while the trade is open.
    pub fn computed_profit_loss(&self) -> Option<Decimal> {
        if !self.is_closed() {
            return None;
        }
        let close_total = self.computed_close_total_cost()?;
        Some(profit_loss(
            self.computed_open_total_cost(),
            close_total,
            self.open_action,
        ))
    }

    /// Realized P&L, preferring the stored figure and falling back to recomputation.
    pub fn realized_profit_loss(&self) -> Option<Decimal> {
        self.profit_loss.or_else(|| self.computed_profit_loss())
    }

    /// Records the closing transaction and moves the trade to `Closed`.
    ///
    /// All derived totals are recomputed from primitives. Fails without
    /// modifying the trade when it is already closed or the closing action
    /// does not pair with the opening action.
    pub fn close(&mut self, close: &CloseTrade) -> Result<()> {
        if self.is_closed() {
            return Err(TradeError::AlreadyClosed(self.id.clone()).into());
        }
        if !are_actions_paired(self.open_action, close.close_action) {
            return Err(TradeError::UnpairedActions {
                open: self.open_action.to_string(),
                close: close.close_action.to_string(),
            }
            .into());
        }
        close.validate()?;

        let open_total = self.computed_open_total_cost();
        let close_total = close_total_cost(
            close.close_action,
            close.close_premium,
            self.open_quantity,
            close.close_commission,
        );

        self.open_total_cost = open_total;
        self.close_action = Some(close.close_action);
        self.close_quantity = Some(self.open_quantity);
        self.close_premium = Some(close.close_premium);
        self.close_commission = Some(close.close_commission);
        self.close_trade_date = Some(close.close_trade_date);
        self.close_total_cost = Some(close_total);
        self.profit_loss = Some(profit_loss(open_total, close_total, self.open_action));
        self.status = TradeStatus::Closed;
        Ok(())
    }
}

/// Input model for the opening transaction of a new trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_id: Option<String>,
    pub symbol: String,
    pub option_type: OptionType,
    pub strike_price: Decimal,
    #[serde(with = "crate::utils::serde_date")]
    pub expiration_date: NaiveDate,
    pub open_action: OpeningAction,
    pub open_quantity: Decimal,
    pub open_premium: Decimal,
    pub open_commission: Decimal,
    #[serde(with = "crate::utils::serde_date")]
    pub open_trade_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTrade {
    /// Validates the opening transaction.
    pub fn validate(&self) -> Result<()> {
        validate_symbol(&self.symbol)?;
        validate_strike(self.strike_price)?;
        validate_quantity("openQuantity", self.open_quantity)?;
        validate_premium("openPremium", self.open_premium)?;
        validate_commission("openCommission", self.open_commission)?;
        Ok(())
    }

    /// Returns a copy with the symbol trimmed and uppercased.
    pub fn normalized(mut self) -> Self {
        self.symbol = format_ticker(&self.symbol);
        self.notes = self.notes.filter(|n| !n.trim().is_empty());
        self
    }

    /// The opening total this trade will be recorded with.
    pub fn open_total_cost(&self) -> Decimal {
        open_total_cost(
            self.open_action,
            self.open_premium,
            self.open_quantity,
            self.open_commission,
        )
    }
}

/// Input model for closing an open trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseTrade {
    pub close_action: ClosingAction,
    pub close_premium: Decimal,
    pub close_commission: Decimal,
    #[serde(with = "crate::utils::serde_date")]
    pub close_trade_date: NaiveDate,
}

impl CloseTrade {
    /// Builds a close request whose action is derived from the opening action.
    pub fn paired_with(
        open_action: OpeningAction,
        close_premium: Decimal,
        close_commission: Decimal,
        close_trade_date: NaiveDate,
    ) -> Self {
        Self {
            close_action: open_action.valid_close_action(),
            close_premium,
            close_commission,
            close_trade_date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_premium("closePremium", self.close_premium)?;
        validate_commission("closeCommission", self.close_commission)?;
        Ok(())
    }
}

/// Input model for editing a trade. Absent fields are left unchanged;
/// `portfolio_id: Some(None)` unlinks the trade from its portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeUpdate {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub portfolio_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_type: Option<OptionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike_price: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::serde_date::option"
    )]
    pub expiration_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_action: Option<OpeningAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_premium: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_commission: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::serde_date::option"
    )]
    pub open_trade_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // Closing fields, only meaningful for closed trades
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_action: Option<ClosingAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_premium: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_commission: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::serde_date::option"
    )]
    pub close_trade_date: Option<NaiveDate>,
}

impl TradeUpdate {
    pub fn is_empty(&self) -> bool {
        *self == TradeUpdate::default()
    }

    /// Validates every field that is present.
    pub fn validate(&self) -> Result<()> {
        if let Some(symbol) = &self.symbol {
            validate_symbol(symbol)?;
        }
        if let Some(strike) = self.strike_price {
            validate_strike(strike)?;
        }
        if let Some(quantity) = self.open_quantity {
            validate_quantity("openQuantity", quantity)?;
        }
        if let Some(premium) = self.open_premium {
            validate_premium("openPremium", premium)?;
        }
        if let Some(commission) = self.open_commission {
            validate_commission("openCommission", commission)?;
        }
        if let Some(premium) = self.close_premium {
            validate_premium("closePremium", premium)?;
        }
        if let Some(commission) = self.close_commission {
            validate_commission("closeCommission", commission)?;
        }
        if let (Some(open), Some(close)) = (self.open_action, self.close_action) {
            if !are_actions_paired(open, close) {
                return Err(TradeError::UnpairedActions {
                    open: open.to_string(),
                    close: close.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

fn validate_symbol(symbol: &str) -> Result<()> {
    require_length("symbol", symbol, 1, MAX_SYMBOL_LENGTH, "Symbol")
}

fn validate_strike(strike: Decimal) -> Result<()> {
    require_positive("strikePrice", strike, "Strike price must be positive")?;
    require_at_most("strikePrice", strike, MAX_AMOUNT, "Strike price")
}

fn validate_quantity(field: &str, quantity: Decimal) -> Result<()> {
    require_positive_integer(field, quantity, "Quantity must be a positive integer")?;
    require_at_most(field, quantity, MAX_CONTRACTS, "Quantity")
}

fn validate_premium(field: &str, premium: Decimal) -> Result<()> {
    require_positive(field, premium, "Premium must be positive")?;
    require_at_most(field, premium, MAX_AMOUNT, "Premium")
}

fn validate_commission(field: &str, commission: Decimal) -> Result<()> {
    require_non_negative(field, commission, "Commission cannot be negative")?;
    require_at_most(field, commission, MAX_AMOUNT, "Commission")
}

/// Validates the primitives of one transaction leg before they are fed to
/// the cost metrics.
pub fn validate_leg(premium: Decimal, quantity: Decimal, commission: Decimal) -> Result<()> {
    validate_quantity("quantity", quantity)?;
    validate_premium("premium", premium)?;
    validate_commission("commission", commission)
}
