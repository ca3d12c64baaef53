use tradeledger_core::portfolios::{
    NewPortfolio, PortfolioServiceTrait, PortfolioUpdate, PortfolioYieldMetrics,
};
use tradeledger_core::positions::PositionServiceTrait;
use tradeledger_core::trades::TradeServiceTrait;
use tradeledger_core::utils::time_utils::today_utc;

use super::ensure_permitted;
use crate::cli::PortfolioAction;
use crate::main_lib::Context;
use crate::output::{emit, portfolio_detail, portfolios_table, yield_detail};

pub async fn run(ctx: &Context, action: PortfolioAction) -> anyhow::Result<()> {
    let client = &ctx.client;
    match action {
        PortfolioAction::List => {
            let portfolios = client.list_portfolios().await?;
            emit(ctx, &portfolios, |p| portfolios_table(p))
        }
        PortfolioAction::Show { id } => {
            let portfolio = client.get_portfolio(&id).await?;
            emit(ctx, &portfolio, portfolio_detail)
        }
        PortfolioAction::Default => match client.get_default_portfolio().await? {
            Some(portfolio) => emit(ctx, &portfolio, portfolio_detail),
            None => emit(ctx, &serde_json::Value::Null, |_| {
                "No default portfolio.".to_string()
            }),
        },
        PortfolioAction::Create {
            name,
            description,
            inactive,
        } => {
            let portfolio = client
                .create_portfolio(NewPortfolio {
                    name,
                    description,
                    is_active: inactive.then_some(false),
                })
                .await?;
            emit(ctx, &portfolio, portfolio_detail)
        }
        PortfolioAction::Update {
            id,
            name,
            description,
            active,
        } => {
            let update = PortfolioUpdate {
                name,
                description,
                is_active: active,
            };
            if update == PortfolioUpdate::default() {
                anyhow::bail!("Nothing to update; pass --name, --description or --active");
            }
            let owner = client.get_portfolio(&id).await?.user_id;
            ensure_permitted(ctx, |p| p.can_edit_portfolio(&owner), "edit this portfolio")?;
            let portfolio = client.update_portfolio(&id, update).await?;
            emit(ctx, &portfolio, portfolio_detail)
        }
        PortfolioAction::Delete { id } => {
            let owner = client.get_portfolio(&id).await?.user_id;
            ensure_permitted(ctx, |p| p.can_delete_portfolio(&owner), "delete this portfolio")?;
            client.delete_portfolio(&id).await?;
            println!("Deleted portfolio {}.", id);
            Ok(())
        }
        PortfolioAction::SetDefault { id } => {
            let portfolio = client.set_default_portfolio(&id).await?;
            emit(ctx, &portfolio, portfolio_detail)
        }
        PortfolioAction::Yield { id, as_of } => {
            let (positions, trades) =
                tokio::try_join!(client.list_positions(&id), client.list_trades(Some(&id)))?;
            let metrics =
                PortfolioYieldMetrics::calculate(&positions, &trades, as_of.unwrap_or_else(today_utc));
            emit(ctx, &metrics, yield_detail)
        }
    }
}
