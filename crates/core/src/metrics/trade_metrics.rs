use rust_decimal::Decimal;

use crate::constants::CONTRACT_MULTIPLIER;
use crate::trades::{ClosingAction, OpeningAction, PositionDirection};

/// Dollar value of `quantity` contracts at `premium` per share.
///
/// Like every function in this module, results saturate at the bounds of
/// `Decimal` instead of panicking.
pub fn contract_value(premium: Decimal, quantity: Decimal) -> Decimal {
    premium
        .saturating_mul(quantity)
        .saturating_mul(CONTRACT_MULTIPLIER)
}

/// Total cost (debit) or credit of an opening transaction.
///
/// * Buy to open: `premium * quantity * 100 + commission`
/// * Sell to open: `premium * quantity * 100 - commission`
pub fn open_total_cost(
    action: OpeningAction,
    premium: Decimal,
    quantity: Decimal,
    commission: Decimal,
) -> Decimal {
    let value = contract_value(premium, quantity);
    match action {
        OpeningAction::BuyToOpen => value.saturating_add(commission),
        OpeningAction::SellToOpen => value.saturating_sub(commission),
    }
}

/// Total credit or cost (debit) of a closing transaction.
///
/// * Sell to close: `premium * quantity * 100 - commission`
/// * Buy to close: `premium * quantity * 100 + commission`
pub fn close_total_cost(
    action: ClosingAction,
    premium: Decimal,
    quantity: Decimal,
    commission: Decimal,
) -> Decimal {
    let value = contract_value(premium, quantity);
    match action {
        ClosingAction::SellToClose => value.saturating_sub(commission),
        ClosingAction::BuyToClose => value.saturating_add(commission),
    }
}

/// Realized profit or loss of a closed trade.
///
/// A short position's opening total is a credit received, so it profits
/// when the later buy-back costs less.
pub fn profit_loss(
    open_total_cost: Decimal,
    close_total_cost: Decimal,
    open_action: OpeningAction,
) -> Decimal {
    match open_action.direction() {
        PositionDirection::Long => close_total_cost.saturating_sub(open_total_cost),
        PositionDirection::Short => open_total_cost.saturating_sub(close_total_cost),
    }
}
