//! Property-based tests for the trade and yield metrics.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tradeledger_core::positions::Position;
use tradeledger_core::trades::{ClosingAction, OpeningAction};
use tradeledger_core::{
    annualized_yield, close_total_cost, open_total_cost, profit_loss, unrealized_pl_percent,
    yield_percent,
};

// =============================================================================
// Generators
// =============================================================================

/// Positive amount with two decimal places.
fn arb_money() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Whole number of contracts.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1i64..500).prop_map(Decimal::from)
}

fn arb_opening_action() -> impl Strategy<Value = OpeningAction> {
    prop_oneof![Just(OpeningAction::BuyToOpen), Just(OpeningAction::SellToOpen)]
}

fn position(shares: Decimal, cost_basis: Decimal, price: Option<Decimal>) -> Position {
    let ts = Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap();
    Position {
        id: "pos-1".to_string(),
        portfolio_id: "pf-1".to_string(),
        ticker: "SPY".to_string(),
        shares,
        cost_basis,
        server_average_cost: None,
        current_price: price,
        server_market_value: None,
        server_unrealized_pl: None,
        notes: None,
        created_at: ts,
        updated_at: ts,
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Opening a long position is a debit of contract value plus commission;
    /// opening a short one is a credit of contract value minus commission.
    #[test]
    fn prop_open_total_cost_sign_convention(
        premium in arb_money(),
        quantity in arb_quantity(),
        commission in arb_money(),
    ) {
        let value = premium * quantity * dec!(100);
        prop_assert_eq!(
            open_total_cost(OpeningAction::BuyToOpen, premium, quantity, commission),
            value + commission
        );
        prop_assert_eq!(
            open_total_cost(OpeningAction::SellToOpen, premium, quantity, commission),
            value - commission
        );
    }

    #[test]
    fn prop_close_total_cost_sign_convention(
        premium in arb_money(),
        quantity in arb_quantity(),
        commission in arb_money(),
    ) {
        let value = premium * quantity * dec!(100);
        prop_assert_eq!(
            close_total_cost(ClosingAction::SellToClose, premium, quantity, commission),
            value - commission
        );
        prop_assert_eq!(
            close_total_cost(ClosingAction::BuyToClose, premium, quantity, commission),
            value + commission
        );
    }

    /// Long P&L is close minus open, short P&L is its negation.
    #[test]
    fn prop_profit_loss_by_direction(
        open in arb_money(),
        close in arb_money(),
        action in arb_opening_action(),
    ) {
        let pl = profit_loss(open, close, action);
        match action {
            OpeningAction::BuyToOpen => prop_assert_eq!(pl, close - open),
            OpeningAction::SellToOpen => prop_assert_eq!(pl, open - close),
        }
        prop_assert_eq!(
            profit_loss(open, close, OpeningAction::BuyToOpen),
            -profit_loss(open, close, OpeningAction::SellToOpen)
        );
    }

    #[test]
    fn prop_zero_denominators_yield_zero(pl in arb_money(), y in arb_money()) {
        prop_assert_eq!(yield_percent(pl, Decimal::ZERO), Decimal::ZERO);
        prop_assert_eq!(yield_percent(-pl, Decimal::ZERO), Decimal::ZERO);
        prop_assert_eq!(annualized_yield(y, 0), Decimal::ZERO);
    }

    #[test]
    fn prop_unrealized_pl_percent_matches_definition(
        shares in arb_quantity(),
        cost_basis in arb_money(),
        price in arb_money(),
    ) {
        let pos = position(shares, cost_basis, Some(price));
        let expected = (shares * price - cost_basis) / cost_basis * dec!(100);
        prop_assert_eq!(unrealized_pl_percent(&pos), Some(expected));
    }

    #[test]
    fn prop_unrealized_pl_percent_none_without_basis(
        shares in arb_quantity(),
        price in arb_money(),
    ) {
        let pos = position(shares, Decimal::ZERO, Some(price));
        prop_assert_eq!(unrealized_pl_percent(&pos), None);
    }
}
