use async_trait::async_trait;

use super::positions_model::{
    BatchPriceUpdate, BatchPriceUpdateResponse, NewPosition, Position, PositionUpdate,
};
use crate::errors::Result;

/// Contract for position operations. Positions always live under a portfolio.
#[async_trait]
pub trait PositionServiceTrait: Send + Sync {
    /// Lists a portfolio's positions. An unavailable endpoint yields an empty list.
    async fn list_positions(&self, portfolio_id: &str) -> Result<Vec<Position>>;

    async fn get_position(&self, portfolio_id: &str, position_id: &str) -> Result<Position>;

    async fn create_position(&self, portfolio_id: &str, new_position: NewPosition)
        -> Result<Position>;

    async fn update_position(
        &self,
        portfolio_id: &str,
        position_id: &str,
        update: PositionUpdate,
    ) -> Result<Position>;

    async fn delete_position(&self, portfolio_id: &str, position_id: &str) -> Result<()>;

    /// Sets the current price of every listed ticker in one request.
    async fn update_prices(
        &self,
        portfolio_id: &str,
        prices: BatchPriceUpdate,
    ) -> Result<BatchPriceUpdateResponse>;
}
