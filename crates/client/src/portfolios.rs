use async_trait::async_trait;
use log::debug;

use tradeledger_core::errors::Result;
use tradeledger_core::portfolios::{
    NewPortfolio, Portfolio, PortfolioServiceTrait, PortfolioUpdate,
};

use crate::cache::QueryKey;
use crate::client::ApiClient;

#[async_trait]
impl PortfolioServiceTrait for ApiClient {
    async fn list_portfolios(&self) -> Result<Vec<Portfolio>> {
        self.cache()
            .get_or_fetch(QueryKey::portfolios(), || self.get("/portfolios"))
            .await
    }

    async fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        let path = format!("/portfolios/{}", portfolio_id);
        self.cache()
            .get_or_fetch(QueryKey::portfolio(portfolio_id), || self.get(&path))
            .await
    }

    async fn get_default_portfolio(&self) -> Result<Option<Portfolio>> {
        self.cache()
            .get_or_fetch(QueryKey::default_portfolio(), || async {
                match self.get::<Portfolio>("/portfolios/default").await {
                    Ok(portfolio) => Ok(Some(portfolio)),
                    Err(e) if e.is_not_found() => {
                        debug!("[Portfolios] No default portfolio selected");
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            })
            .await
    }

    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;
        let portfolio: Portfolio = self.post("/portfolios", &new_portfolio).await?;
        self.cache().invalidate(&QueryKey::portfolios());
        Ok(portfolio)
    }

    async fn update_portfolio(
        &self,
        portfolio_id: &str,
        update: PortfolioUpdate,
    ) -> Result<Portfolio> {
        update.validate()?;
        let portfolio: Portfolio = self
            .put(&format!("/portfolios/{}", portfolio_id), &update)
            .await?;
        self.cache().invalidate_all([
            &QueryKey::portfolios(),
            &QueryKey::portfolio(portfolio_id),
        ]);
        Ok(portfolio)
    }

    async fn set_default_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        let portfolio: Portfolio = self
            .post_empty(&format!("/portfolios/{}/set-default", portfolio_id))
            .await?;
        self.cache().invalidate_all([
            &QueryKey::portfolios(),
            &QueryKey::portfolio(portfolio_id),
        ]);
        Ok(portfolio)
    }

    async fn delete_portfolio(&self, portfolio_id: &str) -> Result<()> {
        self.delete(&format!("/portfolios/{}", portfolio_id)).await?;
        self.cache().invalidate(&QueryKey::portfolios());
        Ok(())
    }
}
