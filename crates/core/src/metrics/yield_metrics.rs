use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DAYS_PER_YEAR;
use crate::positions::Position;

/// `profit_loss / base_value * 100`, or zero when there is no base.
pub fn yield_percent(profit_loss: Decimal, base_value: Decimal) -> Decimal {
    if base_value.is_zero() {
        return Decimal::ZERO;
    }
    saturating_div(profit_loss, base_value).saturating_mul(dec!(100))
}

/// Linear annualization of a period yield: `yield / period_days * 365`.
/// Returns zero for an empty period.
pub fn annualized_yield(yield_percent: Decimal, period_days: i64) -> Decimal {
    if period_days == 0 {
        return Decimal::ZERO;
    }
    saturating_div(yield_percent, Decimal::from(period_days)).saturating_mul(DAYS_PER_YEAR)
}

/// Unrealized P&L as a percent of cost basis.
///
/// `None` means "not computable": no price data behind the P&L, or a zero
/// cost basis. A P&L of exactly zero is a real figure and reports `Some(0)`.
pub fn unrealized_pl_percent(position: &Position) -> Option<Decimal> {
    let unrealized = position.unrealized_pl()?;
    if position.cost_basis.is_zero() {
        return None;
    }
    Some(saturating_div(unrealized, position.cost_basis).saturating_mul(dec!(100)))
}

/// `numerator / denominator` clamped to `Decimal::MIN..=Decimal::MAX`.
/// The denominator must be non-zero.
pub(crate) fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}
