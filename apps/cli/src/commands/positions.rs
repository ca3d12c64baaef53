use rust_decimal::Decimal;
use tradeledger_core::positions::{
    BatchPriceUpdate, NewPosition, PositionPriceUpdate, PositionServiceTrait, PositionUpdate,
};

use crate::cli::{PositionAction, PriceArg};
use crate::main_lib::Context;
use crate::output::{emit, position_detail, positions_table, price_update_summary};

pub async fn run(ctx: &Context, action: PositionAction) -> anyhow::Result<()> {
    let client = &ctx.client;
    match action {
        PositionAction::List { portfolio_id } => {
            let positions = client.list_positions(&portfolio_id).await?;
            emit(ctx, &positions, |p| positions_table(p))
        }
        PositionAction::Show { portfolio_id, id } => {
            let position = client.get_position(&portfolio_id, &id).await?;
            emit(ctx, &position, position_detail)
        }
        PositionAction::Add {
            portfolio_id,
            ticker,
            shares,
            cost_basis,
            price,
            notes,
        } => {
            let position = client
                .create_position(
                    &portfolio_id,
                    NewPosition {
                        ticker,
                        shares,
                        cost_basis,
                        current_price: price,
                        notes,
                    },
                )
                .await?;
            emit(ctx, &position, position_detail)
        }
        PositionAction::Update {
            portfolio_id,
            id,
            ticker,
            shares,
            cost_basis,
            price,
            clear_price,
            notes,
        } => {
            let update = position_update(ticker, shares, cost_basis, price, clear_price, notes);
            if update == PositionUpdate::default() {
                anyhow::bail!("Nothing to update");
            }
            let position = client.update_position(&portfolio_id, &id, update).await?;
            emit(ctx, &position, position_detail)
        }
        PositionAction::Delete { portfolio_id, id } => {
            client.delete_position(&portfolio_id, &id).await?;
            println!("Deleted position {}.", id);
            Ok(())
        }
        PositionAction::Prices {
            portfolio_id,
            prices,
        } => {
            let response = client
                .update_prices(&portfolio_id, batch_price_update(prices))
                .await?;
            emit(ctx, &response, price_update_summary)
        }
    }
}

fn position_update(
    ticker: Option<String>,
    shares: Option<Decimal>,
    cost_basis: Option<Decimal>,
    price: Option<Decimal>,
    clear_price: bool,
    notes: Option<String>,
) -> PositionUpdate {
    let current_price = if clear_price {
        Some(None)
    } else {
        price.map(Some)
    };
    PositionUpdate {
        ticker,
        shares,
        cost_basis,
        current_price,
        notes,
    }
}

fn batch_price_update(prices: Vec<PriceArg>) -> BatchPriceUpdate {
    BatchPriceUpdate {
        prices: prices
            .into_iter()
            .map(|p| PositionPriceUpdate {
                ticker: p.ticker,
                current_price: p.price,
            })
            .collect(),
    }
}
