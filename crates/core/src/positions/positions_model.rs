//! Equity position domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_AMOUNT, MAX_NOTES_LENGTH, MAX_SYMBOL_LENGTH};
use crate::errors::{Result, ValidationError};
use crate::utils::formatters::format_ticker;
use crate::utils::validation::{
    require_at_most, require_length, require_max_length, require_non_negative, require_positive,
};

/// A holding of shares in a portfolio.
///
/// `average_cost`, `market_value` and `unrealized_pl` are computed by the
/// server; the accessor methods fall back to recomputing them from
/// `shares`, `cost_basis` and `current_price` when they are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: String,
    pub portfolio_id: String,
    pub ticker: String,
    /// May be fractional (e.g. 10.5)
    pub shares: Decimal,
    /// Total cost basis in dollars
    pub cost_basis: Decimal,
    #[serde(default, rename = "averageCost")]
    pub server_average_cost: Option<Decimal>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default, rename = "marketValue")]
    pub server_market_value: Option<Decimal>,
    #[serde(default, rename = "unrealizedPL")]
    pub server_unrealized_pl: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Position {
    pub fn has_current_price(&self) -> bool {
        self.current_price.is_some()
    }

    /// Cost basis per share; `None` for a zero-share position or when the
    /// quotient is out of range.
    pub fn average_cost(&self) -> Option<Decimal> {
        if let Some(avg) = self.server_average_cost {
            return Some(avg);
        }
        if self.shares.is_zero() {
            return None;
        }
        self.cost_basis.checked_div(self.shares)
    }

    /// `shares * current_price`; `None` without price data.
    pub fn market_value(&self) -> Option<Decimal> {
        self.server_market_value
            .or_else(|| self.current_price.map(|price| self.shares.saturating_mul(price)))
    }

    /// `market_value - cost_basis`; `None` without price data.
    pub fn unrealized_pl(&self) -> Option<Decimal> {
        self.server_unrealized_pl
            .or_else(|| self.market_value().map(|mv| mv.saturating_sub(self.cost_basis)))
    }

    /// Value used when summing a portfolio: market value when it is known
    /// and non-zero, otherwise the cost basis.
    pub fn valuation(&self) -> Decimal {
        match self.market_value() {
            Some(mv) if !mv.is_zero() => mv,
            _ => self.cost_basis,
        }
    }
}

/// Input model for creating a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub ticker: String,
    pub shares: Decimal,
    pub cost_basis: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewPosition {
    pub fn validate(&self) -> Result<()> {
        validate_ticker(&self.ticker)?;
        validate_shares(self.shares)?;
        validate_cost_basis(self.cost_basis)?;
        if let Some(price) = self.current_price {
            validate_current_price(price)?;
        }
        if let Some(notes) = &self.notes {
            validate_notes(notes)?;
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.ticker = format_ticker(&self.ticker);
        self
    }
}

/// Input model for editing a position. Absent fields are left unchanged;
/// `current_price: Some(None)` clears the stored price.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_basis: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub current_price: Option<Option<Decimal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PositionUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ticker) = &self.ticker {
            validate_ticker(ticker)?;
        }
        if let Some(shares) = self.shares {
            validate_shares(shares)?;
        }
        if let Some(cost_basis) = self.cost_basis {
            validate_cost_basis(cost_basis)?;
        }
        if let Some(Some(price)) = self.current_price {
            validate_current_price(price)?;
        }
        if let Some(notes) = &self.notes {
            validate_notes(notes)?;
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.ticker = self.ticker.map(|t| format_ticker(&t));
        self
    }
}

/// One entry of a batch price update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPriceUpdate {
    pub ticker: String,
    pub current_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPriceUpdate {
    pub prices: Vec<PositionPriceUpdate>,
}

impl BatchPriceUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.prices.is_empty() {
            return Err(ValidationError::MissingField("prices".to_string()).into());
        }
        for price in &self.prices {
            if price.ticker.trim().is_empty() {
                return Err(ValidationError::field("ticker", "Ticker is required").into());
            }
            validate_current_price(price.current_price)?;
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        for price in &mut self.prices {
            price.ticker = format_ticker(&price.ticker);
        }
        self
    }
}

/// Per-position result of a batch price update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedPositionPrice {
    pub id: String,
    pub ticker: String,
    pub current_price: Decimal,
    pub market_value: Decimal,
    #[serde(rename = "unrealizedPL")]
    pub unrealized_pl: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPriceUpdateResponse {
    pub updated: u32,
    #[serde(default)]
    pub positions: Vec<UpdatedPositionPrice>,
}

fn validate_ticker(ticker: &str) -> Result<()> {
    require_length("ticker", ticker, 1, MAX_SYMBOL_LENGTH, "Ticker")
}

fn validate_shares(shares: Decimal) -> Result<()> {
    require_positive("shares", shares, "Shares must be greater than 0")?;
    require_at_most("shares", shares, MAX_AMOUNT, "Shares")
}

fn validate_cost_basis(cost_basis: Decimal) -> Result<()> {
    require_positive("costBasis", cost_basis, "Cost basis must be greater than 0")?;
    require_at_most("costBasis", cost_basis, MAX_AMOUNT, "Cost basis")
}

fn validate_current_price(price: Decimal) -> Result<()> {
    require_non_negative("currentPrice", price, "Current price must be 0 or greater")?;
    require_at_most("currentPrice", price, MAX_AMOUNT, "Current price")
}

fn validate_notes(notes: &str) -> Result<()> {
    require_max_length(
        "notes",
        notes,
        MAX_NOTES_LENGTH,
        "Notes must be 1000 characters or less",
    )
}
