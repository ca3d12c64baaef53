//! Display formatting for money, percentages, dates and tickers (en-US).

use chrono::{DateTime, NaiveDate, TimeZone};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Formats a dollar amount, e.g. `-$1,234.50`.
pub fn format_currency(value: Decimal) -> String {
    let (negative, digits) = fixed_point(value);
    format!("{}${}", if negative { "-" } else { "" }, digits)
}

/// Formats a value that is already expressed in percent, e.g. `12.3456` -> `12.35%`.
pub fn format_percentage(value: Decimal) -> String {
    let (negative, digits) = fixed_point(value);
    format!("{}{}%", if negative { "-" } else { "" }, digits)
}

/// Formats a signed value with an explicit `+` for gains.
pub fn format_signed_currency(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{}", format_currency(value))
    } else {
        format_currency(value)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

pub fn format_date_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%b %d, %Y %H:%M").to_string()
}

pub fn format_date_for_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalizes a ticker or option underlying symbol.
pub fn format_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Rounds half away from zero to display precision and groups thousands.
/// Returns the sign separately so callers can place it before a currency symbol.
fn fixed_point(value: Decimal) -> (bool, String) {
    let mut rounded =
        value.round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMAL_PRECISION);
    let negative = rounded < Decimal::ZERO;
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, "00".to_string()),
    };
    (negative, format!("{}.{}", group_thousands(&int_part), frac_part))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
