use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Shares controlled by one listed options contract
pub const CONTRACT_MULTIPLIER: Decimal = dec!(100);

/// Days used to annualize a period yield
pub const DAYS_PER_YEAR: Decimal = dec!(365);

/// Trailing window, in days, for the portfolio yield figures
pub const YIELD_WINDOW_DAYS: i64 = 30;

/// Largest accepted per-share price, premium, strike, commission, share
/// count or cost basis
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// Largest accepted number of contracts in one trade
pub const MAX_CONTRACTS: Decimal = dec!(1000000);

/// Largest accepted magnitude for a dollar total fed directly to the metrics
pub const MAX_TOTAL_AMOUNT: Decimal = dec!(1000000000000000000);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Longest accepted symbol or ticker
pub const MAX_SYMBOL_LENGTH: usize = 10;

/// Longest accepted portfolio or user name
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted portfolio description
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Longest accepted position notes
pub const MAX_NOTES_LENGTH: usize = 1000;

/// Shortest accepted password
pub const MIN_PASSWORD_LENGTH: usize = 6;
