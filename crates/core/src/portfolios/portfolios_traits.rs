//! Portfolio service trait.

use async_trait::async_trait;

use super::portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
use crate::errors::Result;

/// Contract for portfolio operations against the backing API.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>>;

    async fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;

    /// The user's default portfolio, or `None` when none is selected.
    async fn get_default_portfolio(&self) -> Result<Option<Portfolio>>;

    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;

    async fn update_portfolio(
        &self,
        portfolio_id: &str,
        update: PortfolioUpdate,
    ) -> Result<Portfolio>;

    /// Marks a portfolio as the user's default.
    async fn set_default_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;

    async fn delete_portfolio(&self, portfolio_id: &str) -> Result<()>;
}
