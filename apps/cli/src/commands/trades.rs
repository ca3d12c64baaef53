use rust_decimal::Decimal;
use serde::Serialize;
use tradeledger_core::trades::{
    validate_leg, CloseTrade, NewTrade, TradeServiceTrait, TradeUpdate,
};
use tradeledger_core::utils::time_utils::today_utc;
use tradeledger_core::utils::{format_currency, format_signed_currency};
use tradeledger_core::{close_total_cost, open_total_cost, profit_loss};

use super::ensure_permitted;
use crate::cli::{OpenLegArgs, OpenTradeArgs, TradeAction, UpdateTradeArgs};
use crate::main_lib::Context;
use crate::output::{emit, trade_detail, trades_table};

pub async fn run(ctx: &Context, action: TradeAction) -> anyhow::Result<()> {
    let client = &ctx.client;
    match action {
        TradeAction::List { portfolio, open } => {
            let trades = if open {
                client.list_open_trades().await?
            } else {
                client.list_trades(portfolio.as_deref()).await?
            };
            emit(ctx, &trades, |t| trades_table(t))
        }
        TradeAction::Show { id, portfolio } => {
            let trade = match portfolio {
                Some(portfolio_id) => client.get_trade_in_portfolio(&portfolio_id, &id).await?,
                None => client.get_trade(&id).await?,
            };
            emit(ctx, &trade, trade_detail)
        }
        TradeAction::Open(args) => {
            let trade = client.create_trade(new_trade(args)).await?;
            emit(ctx, &trade, trade_detail)
        }
        TradeAction::Close { id, close } => {
            let open_action = client.get_trade(&id).await?.open_action;
            let request = CloseTrade::paired_with(
                open_action,
                close.premium,
                close.commission,
                close.date.unwrap_or_else(today_utc),
            );
            let trade = client.close_trade(&id, request).await?;
            emit(ctx, &trade, trade_detail)
        }
        TradeAction::Update(args) => {
            let trade_id = args.id.clone();
            let via_portfolio = args.via_portfolio.clone();
            let update = trade_update(args);
            if update.is_empty() {
                anyhow::bail!("Nothing to update");
            }
            let current = match &via_portfolio {
                Some(portfolio_id) => client.get_trade_in_portfolio(portfolio_id, &trade_id).await?,
                None => client.get_trade(&trade_id).await?,
            };
            ensure_permitted(ctx, |p| p.can_edit_trade(&current.user_id), "edit this trade")?;
            let trade = match via_portfolio {
                Some(portfolio_id) => {
                    client
                        .update_trade_in_portfolio(&portfolio_id, &trade_id, update)
                        .await?
                }
                None => {
                    client
                        .update_trade(&trade_id, update, current.portfolio_id.as_deref())
                        .await?
                }
            };
            emit(ctx, &trade, trade_detail)
        }
        TradeAction::Delete { id, portfolio } => {
            match portfolio {
                Some(portfolio_id) => {
                    let owner = client.get_trade_in_portfolio(&portfolio_id, &id).await?.user_id;
                    ensure_permitted(ctx, |p| p.can_delete_trade(&owner), "delete this trade")?;
                    client.delete_trade_in_portfolio(&portfolio_id, &id).await?
                }
                None => {
                    let owner = client.get_trade(&id).await?.user_id;
                    ensure_permitted(ctx, |p| p.can_delete_trade(&owner), "delete this trade")?;
                    client.delete_trade(&id).await?
                }
            }
            println!("Deleted trade {}.", id);
            Ok(())
        }
        TradeAction::Preview {
            open,
            close_premium,
            close_commission,
        } => {
            let preview = TradePreview::compute(&open, close_premium, close_commission)?;
            emit(ctx, &preview, TradePreview::render)
        }
    }
}

fn new_trade(args: OpenTradeArgs) -> NewTrade {
    NewTrade {
        portfolio_id: args.portfolio,
        symbol: args.symbol,
        option_type: args.option_type,
        strike_price: args.strike,
        expiration_date: args.expiration,
        open_action: args.leg.action,
        open_quantity: args.leg.quantity,
        open_premium: args.leg.premium,
        open_commission: args.leg.commission,
        open_trade_date: args.date.unwrap_or_else(today_utc),
        notes: args.notes,
    }
}

fn trade_update(args: UpdateTradeArgs) -> TradeUpdate {
    let portfolio_id = if args.unlink {
        Some(None)
    } else {
        args.portfolio.map(Some)
    };
    // The closing action always mirrors the opening action.
    let close_action = args
        .action
        .filter(|_| args.close_premium.is_some() || args.close_date.is_some())
        .map(|a| a.valid_close_action());

    TradeUpdate {
        portfolio_id,
        symbol: args.symbol,
        option_type: args.option_type,
        strike_price: args.strike,
        expiration_date: args.expiration,
        open_action: args.action,
        open_quantity: args.quantity,
        open_premium: args.premium,
        open_commission: args.commission,
        open_trade_date: args.date,
        notes: args.notes,
        close_action,
        close_premium: args.close_premium,
        close_commission: args.close_commission,
        close_trade_date: args.close_date,
    }
}

/// Totals of a hypothetical trade, computed without the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TradePreview {
    open_total_cost: Decimal,
    close_total_cost: Option<Decimal>,
    profit_loss: Option<Decimal>,
}

impl TradePreview {
    /// Fails when either leg is outside the bounds the input models accept.
    fn compute(
        open: &OpenLegArgs,
        close_premium: Option<Decimal>,
        close_commission: Decimal,
    ) -> tradeledger_core::Result<Self> {
        validate_leg(open.premium, open.quantity, open.commission)?;
        if let Some(premium) = close_premium {
            validate_leg(premium, open.quantity, close_commission)?;
        }
        let open_total = open_total_cost(open.action, open.premium, open.quantity, open.commission);
        let close_total = close_premium.map(|premium| {
            close_total_cost(
                open.action.valid_close_action(),
                premium,
                open.quantity,
                close_commission,
            )
        });
        Ok(Self {
            open_total_cost: open_total,
            close_total_cost: close_total,
            profit_loss: close_total.map(|close| profit_loss(open_total, close, open.action)),
        })
    }

    fn render(&self) -> String {
        let mut lines = vec![format!("Open total:  {}", format_currency(self.open_total_cost))];
        if let (Some(close_total), Some(pl)) = (self.close_total_cost, self.profit_loss) {
            lines.push(format!("Close total: {}", format_currency(close_total)));
            lines.push(format!("P&L:         {}", format_signed_currency(pl)));
        }
        lines.join("\n")
    }
}
