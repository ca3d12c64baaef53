//! Tests for portfolio models and the trailing yield calculation.

#[cfg(test)]
mod tests {
    use crate::portfolios::{NewPortfolio, Portfolio, PortfolioUpdate, PortfolioYieldMetrics};
    use crate::positions::Position;
    use crate::trades::{OpeningAction, OptionType, Trade, TradeStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn position(cost_basis: Decimal, price: Option<Decimal>) -> Position {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap();
        Position {
            id: format!("pos-{}", cost_basis),
            portfolio_id: "pf-1".to_string(),
            ticker: "QQQ".to_string(),
            shares: dec!(20),
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

    fn trade(id: &str, closed_on: Option<NaiveDate>, pl: Option<Decimal>) -> Trade {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap();
        Trade {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            portfolio_id: Some("pf-1".to_string()),
            symbol: "QQQ".to_string(),
            option_type: OptionType::Put,
            strike_price: dec!(480),
            expiration_date: date(2025, 4, 17),
            open_action: OpeningAction::SellToOpen,
            open_quantity: dec!(1),
            open_premium: dec!(4),
            open_commission: dec!(0.65),
            open_trade_date: date(2025, 1, 2),
            open_total_cost: dec!(399.35),
            close_action: None,
            close_quantity: None,
            close_premium: None,
            close_commission: None,
            close_trade_date: closed_on,
            close_total_cost: None,
            status: if closed_on.is_some() {
                TradeStatus::Closed
            } else {
                TradeStatus::Open
            },
            profit_loss: pl,
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    // ==================== Yield Tests ====================

    #[test]
    fn test_yield_over_trailing_window() {
        // 20 * 500 = 10,000 market value plus 5,000 cost basis without a price
        let positions = vec![position(dec!(9000), Some(dec!(500))), position(dec!(5000), None)];
        let trades = vec![
            trade("in-window", Some(date(2025, 3, 15)), Some(dec!(300))),
            trade("too-old", Some(date(2025, 2, 28)), Some(dec!(999))),
            trade("still-open", None, None),
            trade("window-edge", Some(date(2025, 3, 1)), Some(dec!(-75))),
        ];

        let metrics = PortfolioYieldMetrics::calculate(&positions, &trades, date(2025, 3, 31));

        assert_eq!(metrics.portfolio_value, dec!(15000));
        assert_eq!(metrics.trades_count, 2);
        assert_eq!(metrics.last_30_days_pl, dec!(225));
        assert_eq!(metrics.last_30_days_yield_dollar, dec!(225));
        assert_eq!(metrics.last_30_days_yield_percent, dec!(1.5));
        assert_eq!(metrics.last_30_days_annualized_yield, dec!(18.25));
    }

    #[test]
    fn test_yield_counts_missing_pl_as_zero() {
        let positions = vec![position(dec!(1000), None)];
        let trades = vec![trade("no-pl", Some(date(2025, 3, 20)), None)];

        let metrics = PortfolioYieldMetrics::calculate(&positions, &trades, date(2025, 3, 31));
        assert_eq!(metrics.trades_count, 1);
        assert_eq!(metrics.last_30_days_pl, Decimal::ZERO);
        assert_eq!(metrics.last_30_days_yield_percent, Decimal::ZERO);
    }

    #[test]
    fn test_yield_for_empty_portfolio_is_zero() {
        let trades = vec![trade("in-window", Some(date(2025, 3, 15)), Some(dec!(300)))];
        let metrics = PortfolioYieldMetrics::calculate(&[], &trades, date(2025, 3, 31));
        assert_eq!(metrics, PortfolioYieldMetrics::zero());
    }

    #[test]
    fn test_yield_metrics_wire_names() {
        let value = serde_json::to_value(PortfolioYieldMetrics::zero()).unwrap();
        for key in [
            "last30DaysPL",
            "last30DaysYieldPercent",
            "last30DaysYieldDollar",
            "last30DaysAnnualizedYield",
            "portfolioValue",
            "tradesCount",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
    }

    // ==================== Model Tests ====================

    #[test]
    fn test_portfolio_default_flag_is_optional() {
        let json = r#"{
            "id": "pf-1",
            "userId": "user-1",
            "name": "Wheel",
            "isActive": true,
            "createdAt": "2025-01-02T15:00:00Z",
            "updatedAt": "2025-01-02T15:00:00Z"
        }"#;
        let portfolio: Portfolio = serde_json::from_str(json).unwrap();
        assert!(!portfolio.is_default);
        assert_eq!(portfolio.description, None);
    }

    #[test]
    fn test_new_portfolio_validation() {
        let mut portfolio = NewPortfolio {
            name: "Income".to_string(),
            description: None,
            is_active: Some(true),
        };
        assert!(portfolio.validate().is_ok());

        portfolio.name = " ".to_string();
        assert!(portfolio.validate().is_err());

        portfolio.name = "n".repeat(101);
        assert!(portfolio.validate().is_err());

        portfolio.name = "Income".to_string();
        portfolio.description = Some("d".repeat(501));
        assert!(portfolio.validate().is_err());
    }

    #[test]
    fn test_portfolio_update_validates_present_fields() {
        assert!(PortfolioUpdate::default().validate().is_ok());
        let update = PortfolioUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
