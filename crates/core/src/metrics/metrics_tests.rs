//! Tests for trade and yield metrics.

#[cfg(test)]
mod tests {
    use crate::metrics::*;
    use crate::positions::Position;
    use crate::trades::{ClosingAction, OpeningAction};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn position(cost_basis: Decimal, price: Option<Decimal>) -> Position {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap();
        Position {
            id: "pos-1".to_string(),
            portfolio_id: "pf-1".to_string(),
            ticker: "AAPL".to_string(),
            shares: dec!(100),
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

    // ==================== Trade Cost Tests ====================

    #[test]
    fn test_contract_value_uses_multiplier() {
        assert_eq!(contract_value(dec!(2.50), dec!(3)), dec!(750));
        assert_eq!(contract_value(dec!(0), dec!(10)), Decimal::ZERO);
    }

    #[test]
    fn test_open_total_cost_by_action() {
        assert_eq!(
            open_total_cost(OpeningAction::BuyToOpen, dec!(5), dec!(1), dec!(0.65)),
            dec!(500.65)
        );
        assert_eq!(
            open_total_cost(OpeningAction::SellToOpen, dec!(5), dec!(1), dec!(0.65)),
            dec!(499.35)
        );
    }

    #[test]
    fn test_close_total_cost_by_action() {
        assert_eq!(
            close_total_cost(ClosingAction::SellToClose, dec!(7), dec!(1), dec!(0.65)),
            dec!(699.35)
        );
        assert_eq!(
            close_total_cost(ClosingAction::BuyToClose, dec!(2), dec!(1), dec!(0.65)),
            dec!(200.65)
        );
    }

    #[test]
    fn test_profit_loss_long_and_short() {
        assert_eq!(
            profit_loss(dec!(500.65), dec!(699.35), OpeningAction::BuyToOpen),
            dec!(198.70)
        );
        assert_eq!(
            profit_loss(dec!(499.35), dec!(200.65), OpeningAction::SellToOpen),
            dec!(298.70)
        );
        // A short that is bought back for more than it was sold loses money
        assert_eq!(
            profit_loss(dec!(99.35), dec!(300.65), OpeningAction::SellToOpen),
            dec!(-201.30)
        );
    }

    #[test]
    fn test_multi_contract_trade() {
        let open = open_total_cost(OpeningAction::SellToOpen, dec!(1.20), dec!(5), dec!(3.25));
        let close = close_total_cost(ClosingAction::BuyToClose, dec!(0.40), dec!(5), dec!(3.25));
        assert_eq!(open, dec!(596.75));
        assert_eq!(close, dec!(203.25));
        assert_eq!(profit_loss(open, close, OpeningAction::SellToOpen), dec!(393.50));
    }

    // ==================== Yield Tests ====================

    #[test]
    fn test_yield_percent() {
        assert_eq!(yield_percent(dec!(150), dec!(10000)), dec!(1.5));
        assert_eq!(yield_percent(dec!(-50), dec!(1000)), dec!(-5));
        assert_eq!(yield_percent(dec!(150), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_annualized_yield() {
        assert_eq!(annualized_yield(dec!(1.5), 30), dec!(18.25));
        assert_eq!(annualized_yield(dec!(73), 365), dec!(73));
        assert_eq!(annualized_yield(dec!(1.5), 0), Decimal::ZERO);
    }

    #[test]
    fn test_unrealized_pl_percent() {
        // 100 shares at 55 against a 5,000 basis
        let gain = position(dec!(5000), Some(dec!(55)));
        assert_eq!(unrealized_pl_percent(&gain), Some(dec!(10)));

        let loss = position(dec!(5000), Some(dec!(45)));
        assert_eq!(unrealized_pl_percent(&loss), Some(dec!(-10)));
    }

    #[test]
    fn test_unrealized_pl_percent_break_even_is_zero() {
        let flat = position(dec!(5000), Some(dec!(50)));
        assert_eq!(unrealized_pl_percent(&flat), Some(Decimal::ZERO));
    }

    #[test]
    fn test_unrealized_pl_percent_not_computable() {
        assert_eq!(unrealized_pl_percent(&position(dec!(5000), None)), None);
        assert_eq!(unrealized_pl_percent(&position(Decimal::ZERO, Some(dec!(10)))), None);
    }

    #[test]
    fn test_out_of_range_inputs_saturate() {
        let huge = Decimal::from_i128_with_scale(10i128.pow(20), 0);
        assert_eq!(
            open_total_cost(OpeningAction::SellToOpen, huge, dec!(1000000000), dec!(0)),
            Decimal::MAX
        );
        assert_eq!(
            close_total_cost(ClosingAction::SellToClose, -huge, dec!(1000000000), dec!(1)),
            Decimal::MIN
        );
        assert_eq!(
            profit_loss(Decimal::MIN, Decimal::MAX, OpeningAction::BuyToOpen),
            Decimal::MAX
        );

        let pl = Decimal::from_i128_with_scale(10i128.pow(28), 0);
        assert_eq!(yield_percent(pl, dec!(0.001)), Decimal::MAX);
        assert_eq!(yield_percent(-pl, dec!(0.001)), Decimal::MIN);
        assert_eq!(annualized_yield(Decimal::MAX, 1), Decimal::MAX);
    }
}
