//! Trade service trait.

use async_trait::async_trait;

use super::trades_model::{CloseTrade, NewTrade, Trade, TradeUpdate};
use crate::errors::Result;

/// Contract for trade operations against the backing API.
///
/// Methods taking a `portfolio_id` use the portfolio-scoped routes; the
/// others use the standalone `/trades` routes.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    /// Lists the user's trades, or a portfolio's trades when `portfolio_id` is set.
    async fn list_trades(&self, portfolio_id: Option<&str>) -> Result<Vec<Trade>>;

    /// Lists trades that are still open (candidates for closing).
    async fn list_open_trades(&self) -> Result<Vec<Trade>>;

    async fn get_trade(&self, trade_id: &str) -> Result<Trade>;

    async fn get_trade_in_portfolio(&self, portfolio_id: &str, trade_id: &str) -> Result<Trade>;

    /// Records an opening transaction. Routed to the portfolio-scoped endpoint
    /// when the trade is linked to a portfolio.
    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade>;

    /// Updates a trade. `previous_portfolio_id` is the portfolio the trade was
    /// linked to before the edit, if any.
    async fn update_trade(
        &self,
        trade_id: &str,
        update: TradeUpdate,
        previous_portfolio_id: Option<&str>,
    ) -> Result<Trade>;

    async fn update_trade_in_portfolio(
        &self,
        portfolio_id: &str,
        trade_id: &str,
        update: TradeUpdate,
    ) -> Result<Trade>;

    /// Records the closing transaction of an open trade.
    async fn close_trade(&self, trade_id: &str, close: CloseTrade) -> Result<Trade>;

    async fn delete_trade(&self, trade_id: &str) -> Result<()>;

    async fn delete_trade_in_portfolio(&self, portfolio_id: &str, trade_id: &str) -> Result<()>;
}
