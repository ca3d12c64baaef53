//! Trailing-window yield of a portfolio's closed trades.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::YIELD_WINDOW_DAYS;
use crate::metrics::{annualized_yield, yield_percent};
use crate::positions::Position;
use crate::trades::Trade;
use crate::utils::time_utils::window_start;

/// Realized options income over the last 30 days, relative to the
/// current value of the portfolio's positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioYieldMetrics {
    #[serde(rename = "last30DaysPL")]
    pub last_30_days_pl: Decimal,
    #[serde(rename = "last30DaysYieldPercent")]
    pub last_30_days_yield_percent: Decimal,
    #[serde(rename = "last30DaysYieldDollar")]
    pub last_30_days_yield_dollar: Decimal,
    #[serde(rename = "last30DaysAnnualizedYield")]
    pub last_30_days_annualized_yield: Decimal,
    pub portfolio_value: Decimal,
    pub trades_count: usize,
}

impl PortfolioYieldMetrics {
    pub fn zero() -> Self {
        Self {
            last_30_days_pl: Decimal::ZERO,
            last_30_days_yield_percent: Decimal::ZERO,
            last_30_days_yield_dollar: Decimal::ZERO,
            last_30_days_annualized_yield: Decimal::ZERO,
            portfolio_value: Decimal::ZERO,
            trades_count: 0,
        }
    }

    /// Computes the metrics as of `as_of`.
    ///
    /// The portfolio value sums each position's market value, or its cost
    /// basis when no non-zero market value is known. A worthless portfolio
    /// reports all zeros. Only closed trades whose close date falls on or
    /// after `as_of - 30 days` count; a missing stored P&L counts as zero.
    pub fn calculate(positions: &[Position], trades: &[Trade], as_of: NaiveDate) -> Self {
        let portfolio_value = positions
            .iter()
            .map(Position::valuation)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        if portfolio_value.is_zero() {
            return Self::zero();
        }

        let since = window_start(as_of, YIELD_WINDOW_DAYS);
        let window_trades: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.is_closed())
            .filter(|t| matches!(t.close_trade_date, Some(d) if d >= since))
            .collect();

        let pl = window_trades
            .iter()
            .map(|t| t.profit_loss.unwrap_or(Decimal::ZERO))
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let yield_pct = yield_percent(pl, portfolio_value);

        Self {
            last_30_days_pl: pl,
            last_30_days_yield_percent: yield_pct,
            last_30_days_yield_dollar: pl,
            last_30_days_annualized_yield: annualized_yield(yield_pct, YIELD_WINDOW_DAYS),
            portfolio_value,
            trades_count: window_trades.len(),
        }
    }
}
