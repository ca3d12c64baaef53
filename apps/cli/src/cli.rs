//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tradeledger_core::trades::{ClosingAction, OpeningAction, OptionType};
use tradeledger_core::users::UserRole;

/// tradeledger: track options trades and equity positions
#[derive(Debug, Parser)]
#[command(name = "tradeledger")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track options trades and equity positions", long_about = None)]
pub struct Cli {
    /// API base URL (overrides TL_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Session file (overrides TL_SESSION_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub session: Option<PathBuf>,

    /// Print raw models as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "TL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Manage portfolios
    Portfolios {
        #[command(subcommand)]
        action: PortfolioAction,
    },

    /// Manage equity positions
    Positions {
        #[command(subcommand)]
        action: PositionAction,
    },

    /// Manage options trades
    Trades {
        #[command(subcommand)]
        action: TradeAction,
    },

    /// Manage users (admin only)
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Compute trade and yield figures locally
    Calc {
        #[command(subcommand)]
        action: CalcAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum PortfolioAction {
    /// List portfolios
    List,

    /// Show one portfolio
    Show {
        #[arg(value_name = "PORTFOLIO_ID")]
        id: String,
    },

    /// Show the default portfolio
    Default,

    /// Create a portfolio
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Create the portfolio as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Edit a portfolio
    Update {
        #[arg(value_name = "PORTFOLIO_ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },

    /// Delete a portfolio
    Delete {
        #[arg(value_name = "PORTFOLIO_ID")]
        id: String,
    },

    /// Make a portfolio the default
    SetDefault {
        #[arg(value_name = "PORTFOLIO_ID")]
        id: String,
    },

    /// Realized yield of the last 30 days
    Yield {
        #[arg(value_name = "PORTFOLIO_ID")]
        id: String,
        /// End of the window (YYYY-MM-DD, default today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PositionAction {
    /// List a portfolio's positions
    List {
        #[arg(value_name = "PORTFOLIO_ID")]
        portfolio_id: String,
    },

    /// Show one position
    Show {
        #[arg(value_name = "PORTFOLIO_ID")]
        portfolio_id: String,
        #[arg(value_name = "POSITION_ID")]
        id: String,
    },

    /// Add a position
    Add {
        #[arg(value_name = "PORTFOLIO_ID")]
        portfolio_id: String,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        shares: Decimal,
        #[arg(long)]
        cost_basis: Decimal,
        /// Current price per share
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit a position
    Update {
        #[arg(value_name = "PORTFOLIO_ID")]
        portfolio_id: String,
        #[arg(value_name = "POSITION_ID")]
        id: String,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        shares: Option<Decimal>,
        #[arg(long)]
        cost_basis: Option<Decimal>,
        #[arg(long, conflicts_with = "clear_price")]
        price: Option<Decimal>,
        /// Remove the stored current price
        #[arg(long)]
        clear_price: bool,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a position
    Delete {
        #[arg(value_name = "PORTFOLIO_ID")]
        portfolio_id: String,
        #[arg(value_name = "POSITION_ID")]
        id: String,
    },

    /// Set current prices, e.g. `prices pf-1 AAPL=187.20 MSFT=402.15`
    Prices {
        #[arg(value_name = "PORTFOLIO_ID")]
        portfolio_id: String,
        #[arg(value_name = "TICKER=PRICE", required = true)]
        prices: Vec<PriceArg>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TradeAction {
    /// List trades
    List {
        /// Only trades of this portfolio
        #[arg(long, conflicts_with = "open")]
        portfolio: Option<String>,
        /// Only open trades
        #[arg(long)]
        open: bool,
    },

    /// Show one trade
    Show {
        #[arg(value_name = "TRADE_ID")]
        id: String,
        #[arg(long)]
        portfolio: Option<String>,
    },

    /// Record the opening transaction of a trade
    Open(OpenTradeArgs),

    /// Record the closing transaction of an open trade
    Close {
        #[arg(value_name = "TRADE_ID")]
        id: String,
        #[command(flatten)]
        close: CloseArgs,
    },

    /// Edit a trade
    Update(UpdateTradeArgs),

    /// Delete a trade
    Delete {
        #[arg(value_name = "TRADE_ID")]
        id: String,
        #[arg(long)]
        portfolio: Option<String>,
    },

    /// Compute a trade's totals and P&L without saving anything
    Preview {
        #[command(flatten)]
        open: OpenLegArgs,
        /// Closing premium per share
        #[arg(long)]
        close_premium: Option<Decimal>,
        #[arg(long, default_value = "0")]
        close_commission: Decimal,
    },
}

/// Fields of an opening transaction shared by `open` and `preview`.
#[derive(Debug, Args)]
pub struct OpenLegArgs {
    /// bto | sto (buy_to_open | sell_to_open)
    #[arg(long)]
    pub action: OpeningAction,
    /// Number of contracts
    #[arg(long, default_value = "1")]
    pub quantity: Decimal,
    /// Premium per share
    #[arg(long)]
    pub premium: Decimal,
    #[arg(long, default_value = "0")]
    pub commission: Decimal,
}

#[derive(Debug, Args)]
pub struct OpenTradeArgs {
    #[arg(long)]
    pub portfolio: Option<String>,
    #[arg(long)]
    pub symbol: String,
    /// call | put
    #[arg(long = "type")]
    pub option_type: OptionType,
    #[arg(long)]
    pub strike: Decimal,
    /// Expiration date (YYYY-MM-DD)
    #[arg(long)]
    pub expiration: NaiveDate,
    #[command(flatten)]
    pub leg: OpenLegArgs,
    /// Trade date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct CloseArgs {
    /// Closing premium per share
    #[arg(long)]
    pub premium: Decimal,
    #[arg(long, default_value = "0")]
    pub commission: Decimal,
    /// Close date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct UpdateTradeArgs {
    #[arg(value_name = "TRADE_ID")]
    pub id: String,
    /// Route the update through this portfolio
    #[arg(long)]
    pub via_portfolio: Option<String>,
    /// Link the trade to this portfolio
    #[arg(long, conflicts_with = "unlink")]
    pub portfolio: Option<String>,
    /// Remove the trade from its portfolio
    #[arg(long)]
    pub unlink: bool,
    #[arg(long)]
    pub symbol: Option<String>,
    #[arg(long = "type")]
    pub option_type: Option<OptionType>,
    #[arg(long)]
    pub strike: Option<Decimal>,
    #[arg(long)]
    pub expiration: Option<NaiveDate>,
    #[arg(long)]
    pub action: Option<OpeningAction>,
    #[arg(long)]
    pub quantity: Option<Decimal>,
    #[arg(long)]
    pub premium: Option<Decimal>,
    #[arg(long)]
    pub commission: Option<Decimal>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub close_premium: Option<Decimal>,
    #[arg(long)]
    pub close_commission: Option<Decimal>,
    #[arg(long)]
    pub close_date: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// List users
    List,

    /// Show one user
    Show {
        #[arg(value_name = "USER_ID")]
        id: String,
    },

    /// Create a user
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// admin | user
        #[arg(long)]
        role: Option<UserRole>,
    },

    /// Edit a user
    Update {
        #[arg(value_name = "USER_ID")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// New password; leave out to keep the current one
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<UserRole>,
    },

    /// Delete a user
    Delete {
        #[arg(value_name = "USER_ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CalcAction {
    /// Total cost or credit of an opening transaction
    OpenCost {
        #[command(flatten)]
        leg: OpenLegArgs,
    },

    /// Total credit or cost of a closing transaction
    CloseCost {
        /// btc | stc (buy_to_close | sell_to_close)
        #[arg(long)]
        action: ClosingAction,
        #[arg(long, default_value = "1")]
        quantity: Decimal,
        #[arg(long)]
        premium: Decimal,
        #[arg(long, default_value = "0")]
        commission: Decimal,
    },

    /// Realized P&L from the opening and closing totals
    Pnl {
        /// Opening action of the trade (bto | sto)
        #[arg(long)]
        action: OpeningAction,
        #[arg(long)]
        open_total: Decimal,
        #[arg(long)]
        close_total: Decimal,
    },

    /// P&L as a percent of a base value
    Yield {
        #[arg(long)]
        pl: Decimal,
        #[arg(long)]
        base: Decimal,
    },

    /// Linear annualization of a period yield
    Annualize {
        /// Period yield in percent
        #[arg(long = "yield")]
        yield_percent: Decimal,
        #[arg(long)]
        days: i64,
    },

    /// Label of an opportunity score (-10 to 10)
    Band {
        #[arg(allow_negative_numbers = true)]
        score: Decimal,
    },
}

/// A `TICKER=PRICE` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceArg {
    pub ticker: String,
    pub price: Decimal,
}

impl FromStr for PriceArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ticker, price) = s
            .split_once('=')
            .ok_or_else(|| format!("expected TICKER=PRICE, got '{}'", s))?;
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(format!("missing ticker in '{}'", s));
        }
        let price = Decimal::from_str(price.trim())
            .map_err(|e| format!("invalid price in '{}': {}", s, e))?;
        Ok(Self {
            ticker: ticker.to_string(),
            price,
        })
    }
}
