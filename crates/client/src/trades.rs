use async_trait::async_trait;
use log::debug;

use tradeledger_core::errors::Result;
use tradeledger_core::trades::{CloseTrade, NewTrade, Trade, TradeServiceTrait, TradeUpdate};

use crate::cache::QueryKey;
use crate::client::ApiClient;

impl ApiClient {
    /// Drops everything that may show a changed trade: all trade lists, the
    /// trade itself, and the portfolios it was and is linked to.
    fn invalidate_trade(&self, trade_id: &str, portfolio_ids: &[Option<&str>]) {
        let mut keys = vec![QueryKey::trades(), QueryKey::trade(trade_id)];
        for portfolio_id in portfolio_ids.iter().flatten() {
            keys.push(QueryKey::portfolio_trades(portfolio_id));
            keys.push(QueryKey::portfolio(portfolio_id));
        }
        self.cache().invalidate_all(&keys);
    }
}

#[async_trait]
impl TradeServiceTrait for ApiClient {
    async fn list_trades(&self, portfolio_id: Option<&str>) -> Result<Vec<Trade>> {
        match portfolio_id {
            Some(portfolio_id) => {
                let path = format!("/portfolios/{}/trades", portfolio_id);
                self.cache()
                    .get_or_fetch(QueryKey::portfolio_trades(portfolio_id), || self.get(&path))
                    .await
            }
            None => {
                self.cache()
                    .get_or_fetch(QueryKey::trades(), || self.get("/trades"))
                    .await
            }
        }
    }

    async fn list_open_trades(&self) -> Result<Vec<Trade>> {
        self.cache()
            .get_or_fetch(QueryKey::open_trades(), || self.get("/trades?status=open"))
            .await
    }

    async fn get_trade(&self, trade_id: &str) -> Result<Trade> {
        let path = format!("/trades/{}", trade_id);
        self.cache()
            .get_or_fetch(QueryKey::trade(trade_id), || self.get(&path))
            .await
    }

    async fn get_trade_in_portfolio(&self, portfolio_id: &str, trade_id: &str) -> Result<Trade> {
        let path = format!("/portfolios/{}/trades/{}", portfolio_id, trade_id);
        self.cache()
            .get_or_fetch(QueryKey::trade(trade_id), || self.get(&path))
            .await
    }

    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        new_trade.validate()?;
        let new_trade = new_trade.normalized();
        let trade: Trade = match new_trade.portfolio_id.as_deref() {
            Some(portfolio_id) => {
                self.post(&format!("/portfolios/{}/trades", portfolio_id), &new_trade)
                    .await?
            }
            None => self.post("/trades", &new_trade).await?,
        };
        debug!("[Trades] Opened trade {} ({})", trade.id, trade.symbol);

        let mut keys = vec![QueryKey::trades()];
        if let Some(portfolio_id) = new_trade.portfolio_id.as_deref() {
            keys.push(QueryKey::portfolio_trades(portfolio_id));
            keys.push(QueryKey::portfolio(portfolio_id));
        }
        self.cache().invalidate_all(&keys);
        Ok(trade)
    }

    async fn update_trade(
        &self,
        trade_id: &str,
        update: TradeUpdate,
        previous_portfolio_id: Option<&str>,
    ) -> Result<Trade> {
        update.validate()?;
        let trade: Trade = self.put(&format!("/trades/{}", trade_id), &update).await?;
        self.invalidate_trade(
            trade_id,
            &[previous_portfolio_id, trade.portfolio_id.as_deref()],
        );
        Ok(trade)
    }

    async fn update_trade_in_portfolio(
        &self,
        portfolio_id: &str,
        trade_id: &str,
        update: TradeUpdate,
    ) -> Result<Trade> {
        update.validate()?;
        let trade: Trade = self
            .put(
                &format!("/portfolios/{}/trades/{}", portfolio_id, trade_id),
                &update,
            )
            .await?;
        self.invalidate_trade(trade_id, &[Some(portfolio_id), trade.portfolio_id.as_deref()]);
        Ok(trade)
    }

    async fn close_trade(&self, trade_id: &str, close: CloseTrade) -> Result<Trade> {
        close.validate()?;

        // Check the transition locally before asking the server to record it
        let mut preview = self.get_trade(trade_id).await?;
        let previous_portfolio_id = preview.portfolio_id.clone();
        preview.close(&close)?;

        let trade: Trade = self
            .post(&format!("/trades/{}/close", trade_id), &close)
            .await?;
        debug!(
            "[Trades] Closed trade {} with P&L {:?}",
            trade.id, trade.profit_loss
        );
        self.invalidate_trade(
            trade_id,
            &[previous_portfolio_id.as_deref(), trade.portfolio_id.as_deref()],
        );
        Ok(trade)
    }

    async fn delete_trade(&self, trade_id: &str) -> Result<()> {
        self.delete(&format!("/trades/{}", trade_id)).await?;
        self.cache().invalidate(&QueryKey::trades());
        Ok(())
    }

    async fn delete_trade_in_portfolio(&self, portfolio_id: &str, trade_id: &str) -> Result<()> {
        self.delete(&format!("/portfolios/{}/trades/{}", portfolio_id, trade_id))
            .await?;
        self.cache().invalidate(&QueryKey::trades());
        Ok(())
    }
}
