//! Tests for trade domain models including the open/close lifecycle.

#[cfg(test)]
mod tests {
    use crate::errors::{Error, TradeError, ValidationError};
    use crate::trades::{
        are_actions_paired, is_closing_action, is_opening_action, valid_close_action,
        validate_leg, CloseTrade, ClosingAction, NewTrade, OpeningAction, OptionType,
        PositionDirection, Trade, TradeStatus, TradeUpdate,
    };
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_trade(action: OpeningAction, quantity: Decimal, premium: Decimal) -> Trade {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap();
        let mut trade = Trade {
            id: "trade-1".to_string(),
            user_id: "user-1".to_string(),
            portfolio_id: Some("pf-1".to_string()),
            symbol: "AAPL".to_string(),
            option_type: OptionType::Call,
            strike_price: dec!(190),
            expiration_date: date(2025, 2, 21),
            open_action: action,
            open_quantity: quantity,
            open_premium: premium,
            open_commission: dec!(0.65),
            open_trade_date: date(2025, 1, 2),
            open_total_cost: Decimal::ZERO,
            close_action: None,
            close_quantity: None,
            close_premium: None,
            close_commission: None,
            close_trade_date: None,
            close_total_cost: None,
            status: TradeStatus::Open,
            profit_loss: None,
            notes: None,
            created_at: ts,
            updated_at: ts,
        };
        trade.open_total_cost = trade.computed_open_total_cost();
        trade
    }

    fn new_trade() -> NewTrade {
        NewTrade {
            portfolio_id: None,
            symbol: " spy ".to_string(),
            option_type: OptionType::Put,
            strike_price: dec!(500),
            expiration_date: date(2025, 3, 21),
            open_action: OpeningAction::SellToOpen,
            open_quantity: dec!(1),
            open_premium: dec!(5.00),
            open_commission: dec!(0.65),
            open_trade_date: date(2025, 2, 3),
            notes: Some("  ".to_string()),
        }
    }

    // ==================== Action Pairing Tests ====================

    #[test]
    fn test_valid_close_action() {
        assert_eq!(
            valid_close_action(OpeningAction::BuyToOpen),
            ClosingAction::SellToClose
        );
        assert_eq!(
            valid_close_action(OpeningAction::SellToOpen),
            ClosingAction::BuyToClose
        );
    }

    #[test]
    fn test_are_actions_paired() {
        assert!(are_actions_paired(
            OpeningAction::BuyToOpen,
            ClosingAction::SellToClose
        ));
        assert!(are_actions_paired(
            OpeningAction::SellToOpen,
            ClosingAction::BuyToClose
        ));
        assert!(!are_actions_paired(
            OpeningAction::BuyToOpen,
            ClosingAction::BuyToClose
        ));
        assert!(!are_actions_paired(
            OpeningAction::SellToOpen,
            ClosingAction::SellToClose
        ));
    }

    #[test]
    fn test_direction() {
        assert_eq!(OpeningAction::BuyToOpen.direction(), PositionDirection::Long);
        assert_eq!(OpeningAction::SellToOpen.direction(), PositionDirection::Short);
    }

    #[test]
    fn test_action_string_checks() {
        assert!(is_opening_action("buy_to_open"));
        assert!(is_opening_action("STO"));
        assert!(!is_opening_action("buy_to_close"));
        assert!(is_closing_action("sell-to-close"));
        assert!(!is_closing_action("sell_to_open"));
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_enum_serialization() {
        assert_eq!(
            serde_json::to_string(&OpeningAction::BuyToOpen).unwrap(),
            "\"buy_to_open\""
        );
        assert_eq!(
            serde_json::to_string(&ClosingAction::BuyToClose).unwrap(),
            "\"buy_to_close\""
        );
        assert_eq!(serde_json::to_string(&OptionType::Put).unwrap(), "\"put\"");
        assert_eq!(
            serde_json::to_string(&TradeStatus::Closed).unwrap(),
            "\"closed\""
        );
    }

    #[test]
    fn test_trade_deserializes_api_payload() {
        let json = r#"{
            "id": "t-9",
            "userId": "u-1",
            "symbol": "TSLA",
            "optionType": "put",
            "strikePrice": 200,
            "expirationDate": "2025-06-20T00:00:00Z",
            "openAction": "sell_to_open",
            "openQuantity": 1,
            "openPremium": 5.0,
            "openCommission": 0.65,
            "openTradeDate": "2025-05-01",
            "openTotalCost": 499.35,
            "closeAction": null,
            "status": "open",
            "createdAt": "2025-05-01T14:00:00Z",
            "updatedAt": "2025-05-01T14:00:00Z"
        }"#;

        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.portfolio_id, None);
        assert_eq!(trade.expiration_date, date(2025, 6, 20));
        assert_eq!(trade.open_total_cost, dec!(499.35));
        assert_eq!(trade.close_trade_date, None);
        assert!(trade.is_open());
        assert_eq!(trade.computed_open_total_cost(), dec!(499.35));
    }

    #[test]
    fn test_trade_update_serializes_only_present_fields() {
        let update = TradeUpdate {
            portfolio_id: Some(None),
            notes: Some("rolled".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"portfolioId": null, "notes": "rolled"}));
        assert!(TradeUpdate::default().is_empty());
        assert!(!update.is_empty());
    }

    // ==================== Lifecycle Tests ====================

    #[test]
    fn test_close_long_trade() {
        let mut trade = open_trade(OpeningAction::BuyToOpen, dec!(2), dec!(2.50));
        assert_eq!(trade.open_total_cost, dec!(500.65));

        let close = CloseTrade::paired_with(
            trade.open_action,
            dec!(3.50),
            dec!(0.65),
            date(2025, 1, 20),
        );
        assert_eq!(close.close_action, ClosingAction::SellToClose);

        trade.close(&close).unwrap();
        assert_eq!(trade.status, TradeStatus::Closed);
        assert_eq!(trade.close_quantity, Some(dec!(2)));
        assert_eq!(trade.close_total_cost, Some(dec!(699.35)));
        assert_eq!(trade.profit_loss, Some(dec!(198.70)));
        assert_eq!(trade.computed_profit_loss(), Some(dec!(198.70)));
    }

    #[test]
    fn test_close_short_trade() {
        let mut trade = open_trade(OpeningAction::SellToOpen, dec!(1), dec!(5.00));
        assert_eq!(trade.open_total_cost, dec!(499.35));

        let close = CloseTrade {
            close_action: ClosingAction::BuyToClose,
            close_premium: dec!(2.00),
            close_commission: dec!(0.65),
            close_trade_date: date(2025, 1, 10),
        };
        trade.close(&close).unwrap();
        assert_eq!(trade.close_total_cost, Some(dec!(200.65)));
        assert_eq!(trade.profit_loss, Some(dec!(298.70)));
        assert_eq!(trade.realized_profit_loss(), Some(dec!(298.70)));
    }

    #[test]
    fn test_close_rejects_closed_trade() {
        let mut trade = open_trade(OpeningAction::BuyToOpen, dec!(1), dec!(1.00));
        let close = CloseTrade::paired_with(trade.open_action, dec!(1.5), dec!(0), date(2025, 1, 9));
        trade.close(&close).unwrap();

        let err = trade.close(&close).unwrap_err();
        assert!(matches!(
            err,
            Error::Trade(TradeError::AlreadyClosed(ref id)) if id == "trade-1"
        ));
    }

    #[test]
    fn test_close_rejects_unpaired_action() {
        let mut trade = open_trade(OpeningAction::BuyToOpen, dec!(1), dec!(1.00));
        let close = CloseTrade {
            close_action: ClosingAction::BuyToClose,
            close_premium: dec!(1.5),
            close_commission: dec!(0),
            close_trade_date: date(2025, 1, 9),
        };
        let err = trade.close(&close).unwrap_err();
        assert!(matches!(err, Error::Trade(TradeError::UnpairedActions { .. })));
        assert!(trade.is_open());
        assert_eq!(trade.close_total_cost, None);
    }

    #[test]
    fn test_close_rejects_invalid_premium() {
        let mut trade = open_trade(OpeningAction::SellToOpen, dec!(1), dec!(1.00));
        let close = CloseTrade::paired_with(trade.open_action, dec!(0), dec!(0), date(2025, 1, 9));
        let err = trade.close(&close).unwrap_err();
        match err {
            Error::Validation(v) => assert_eq!(v.field_name(), Some("closePremium")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(trade.is_open());
    }

    #[test]
    fn test_open_trade_has_no_profit_loss() {
        let trade = open_trade(OpeningAction::BuyToOpen, dec!(3), dec!(1.10));
        assert_eq!(trade.computed_close_total_cost(), None);
        assert_eq!(trade.computed_profit_loss(), None);
        assert_eq!(trade.realized_profit_loss(), None);
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_new_trade_validate_and_normalize() {
        let trade = new_trade().normalized();
        assert_eq!(trade.symbol, "SPY");
        assert_eq!(trade.notes, None);
        assert!(trade.validate().is_ok());
        assert_eq!(trade.open_total_cost(), dec!(499.35));
    }

    #[test]
    fn test_new_trade_rejects_fractional_quantity() {
        let mut trade = new_trade();
        trade.open_quantity = dec!(1.5);
        let err = trade.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::Field { ref field, .. }) if field == "openQuantity"
        ));
    }

    #[test]
    fn test_new_trade_rejects_bad_fields() {
        let mut trade = new_trade();
        trade.symbol = "TOOLONGSYMBOL".to_string();
        assert!(trade.validate().is_err());

        let mut trade = new_trade();
        trade.strike_price = dec!(0);
        assert!(trade.validate().is_err());

        let mut trade = new_trade();
        trade.open_commission = dec!(-1);
        assert!(trade.validate().is_err());

        let mut trade = new_trade();
        trade.open_commission = dec!(0);
        assert!(trade.validate().is_ok());
    }

    fn field_of(err: Error) -> String {
        match err {
            Error::Validation(v) => v.field_name().unwrap_or_default().to_string(),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_trade_rejects_out_of_range_amounts() {
        let mut trade = new_trade();
        trade.open_premium = Decimal::from_i128_with_scale(10i128.pow(27), 0);
        trade.open_quantity = dec!(1000);
        assert_eq!(field_of(trade.validate().unwrap_err()), "openPremium");

        let mut trade = new_trade();
        trade.open_quantity = dec!(1000001);
        assert_eq!(field_of(trade.validate().unwrap_err()), "openQuantity");

        let mut trade = new_trade();
        trade.strike_price = dec!(1000000000.01);
        assert_eq!(field_of(trade.validate().unwrap_err()), "strikePrice");

        let mut trade = new_trade();
        trade.open_premium = dec!(1000000000);
        trade.open_quantity = dec!(1000000);
        trade.open_commission = dec!(1000000000);
        assert!(trade.validate().is_ok());
        assert_eq!(trade.open_total_cost(), dec!(99999999000000000));
    }

    #[test]
    fn test_close_rejects_out_of_range_premium() {
        let mut trade = open_trade(OpeningAction::BuyToOpen, dec!(1), dec!(2));
        let close = CloseTrade::paired_with(
            OpeningAction::BuyToOpen,
            dec!(5000000000),
            dec!(0),
            date(2025, 1, 20),
        );
        assert_eq!(field_of(trade.close(&close).unwrap_err()), "closePremium");
        assert!(trade.is_open());
    }

    #[test]
    fn test_validate_leg() {
        assert!(validate_leg(dec!(5), dec!(1), dec!(0.65)).is_ok());
        assert_eq!(field_of(validate_leg(dec!(5), dec!(0.5), dec!(0)).unwrap_err()), "quantity");
        assert_eq!(field_of(validate_leg(dec!(0), dec!(1), dec!(0)).unwrap_err()), "premium");
        assert_eq!(
            field_of(validate_leg(dec!(5), dec!(1), dec!(2000000000)).unwrap_err()),
            "commission"
        );
    }

    #[test]
    fn test_trade_update_rejects_unpaired_actions() {
        let update = TradeUpdate {
            open_action: Some(OpeningAction::SellToOpen),
            close_action: Some(ClosingAction::SellToClose),
            ..Default::default()
        };
        assert!(matches!(
            update.validate().unwrap_err(),
            Error::Trade(TradeError::UnpairedActions { .. })
        ));
    }
}
