use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use tradeledger_core::errors::Result;
use tradeledger_core::positions::{
    BatchPriceUpdate, BatchPriceUpdateResponse, NewPosition, Position, PositionServiceTrait,
    PositionUpdate,
};

use crate::cache::QueryKey;
use crate::client::ApiClient;

/// The positions listing comes back either bare or wrapped.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum PositionsPayload {
    List(Vec<Position>),
    Wrapped {
        #[serde(default)]
        positions: Vec<Position>,
    },
}

impl PositionsPayload {
    fn into_positions(self) -> Vec<Position> {
        match self {
            PositionsPayload::List(positions) => positions,
            PositionsPayload::Wrapped { positions } => positions,
        }
    }
}

fn positions_path(portfolio_id: &str) -> String {
    format!("/portfolios/{}/positions", portfolio_id)
}

fn position_path(portfolio_id: &str, position_id: &str) -> String {
    format!("/portfolios/{}/positions/{}", portfolio_id, position_id)
}

#[async_trait]
impl PositionServiceTrait for ApiClient {
    async fn list_positions(&self, portfolio_id: &str) -> Result<Vec<Position>> {
        let path = positions_path(portfolio_id);
        let fetched = self
            .cache()
            .get_or_fetch(QueryKey::portfolio_positions(portfolio_id), || async {
                self.get::<PositionsPayload>(&path)
                    .await
                    .map(PositionsPayload::into_positions)
            })
            .await;

        // The fallback is not cached, so the next call retries the server.
        match fetched {
            Err(e) if e.is_not_found() || e.is_transport() => {
                warn!(
                    "[Positions] Positions endpoint not available for portfolio {}, returning empty list: {}",
                    portfolio_id, e
                );
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn get_position(&self, portfolio_id: &str, position_id: &str) -> Result<Position> {
        let path = position_path(portfolio_id, position_id);
        self.cache()
            .get_or_fetch(QueryKey::position(position_id), || self.get(&path))
            .await
    }

    async fn create_position(
        &self,
        portfolio_id: &str,
        new_position: NewPosition,
    ) -> Result<Position> {
        new_position.validate()?;
        let position: Position = self
            .post(&positions_path(portfolio_id), &new_position.normalized())
            .await?;
        self.cache().invalidate_all([
            &QueryKey::portfolio_positions(portfolio_id),
            &QueryKey::portfolio(portfolio_id),
        ]);
        Ok(position)
    }

    async fn update_position(
        &self,
        portfolio_id: &str,
        position_id: &str,
        update: PositionUpdate,
    ) -> Result<Position> {
        update.validate()?;
        let position: Position = self
            .put(&position_path(portfolio_id, position_id), &update.normalized())
            .await?;
        self.cache().invalidate_all([
            &QueryKey::position(position_id),
            &QueryKey::portfolio_positions(portfolio_id),
            &QueryKey::portfolio(portfolio_id),
        ]);
        Ok(position)
    }

    async fn delete_position(&self, portfolio_id: &str, position_id: &str) -> Result<()> {
        self.delete(&position_path(portfolio_id, position_id)).await?;
        self.cache().invalidate_all([
            &QueryKey::positions(),
            &QueryKey::portfolios(),
            &QueryKey::portfolio(portfolio_id),
        ]);
        Ok(())
    }

    async fn update_prices(
        &self,
        portfolio_id: &str,
        prices: BatchPriceUpdate,
    ) -> Result<BatchPriceUpdateResponse> {
        prices.validate()?;
        let response: BatchPriceUpdateResponse = self
            .patch(
                &format!("/portfolios/{}/positions/prices", portfolio_id),
                &prices.normalized(),
            )
            .await?;
        info!(
            "[Positions] Updated prices for {} positions in portfolio {}",
            response.updated, portfolio_id
        );
        self.cache().invalidate_all([
            &QueryKey::portfolio_positions(portfolio_id),
            &QueryKey::portfolio(portfolio_id),
        ]);
        Ok(response)
    }
}
