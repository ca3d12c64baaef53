use serde_json::json;
use tradeledger_core::constants::MAX_TOTAL_AMOUNT;
use tradeledger_core::portfolios::OpportunityBand;
use tradeledger_core::trades::validate_leg;
use tradeledger_core::utils::validation::require_magnitude_at_most;
use tradeledger_core::utils::{format_currency, format_percentage, format_signed_currency};
use tradeledger_core::{
    annualized_yield, close_total_cost, open_total_cost, profit_loss, yield_percent,
};

use crate::cli::CalcAction;
use crate::main_lib::Context;
use crate::output::emit;

pub fn run(ctx: &Context, action: CalcAction) -> anyhow::Result<()> {
    check_inputs(&action)?;
    match action {
        CalcAction::OpenCost { leg } => {
            let total = open_total_cost(leg.action, leg.premium, leg.quantity, leg.commission);
            emit(ctx, &json!({ "openTotalCost": total }), |_| {
                format!("{} total: {}", leg.action, format_currency(total))
            })
        }
        CalcAction::CloseCost {
            action,
            quantity,
            premium,
            commission,
        } => {
            let total = close_total_cost(action, premium, quantity, commission);
            emit(ctx, &json!({ "closeTotalCost": total }), |_| {
                format!("{} total: {}", action, format_currency(total))
            })
        }
        CalcAction::Pnl {
            action,
            open_total,
            close_total,
        } => {
            let pl = profit_loss(open_total, close_total, action);
            emit(ctx, &json!({ "profitLoss": pl }), |_| {
                format!("P&L: {}", format_signed_currency(pl))
            })
        }
        CalcAction::Yield { pl, base } => {
            let pct = yield_percent(pl, base);
            emit(ctx, &json!({ "yieldPercent": pct }), |_| {
                format!("Yield: {}", format_percentage(pct))
            })
        }
        CalcAction::Annualize {
            yield_percent,
            days,
        } => {
            let annualized = annualized_yield(yield_percent, days);
            emit(ctx, &json!({ "annualizedYield": annualized }), |_| {
                format!("Annualized yield: {}", format_percentage(annualized))
            })
        }
        CalcAction::Band { score } => {
            let band = OpportunityBand::from_score(score);
            emit(ctx, &json!({ "score": score, "band": band.label() }), |_| {
                format!("{}: {}", score.round_dp(1), band)
            })
        }
    }
}

/// Applies the same bounds as the input models so the metrics only ever see
/// in-range values.
fn check_inputs(action: &CalcAction) -> tradeledger_core::Result<()> {
    match action {
        CalcAction::OpenCost { leg } => validate_leg(leg.premium, leg.quantity, leg.commission),
        CalcAction::CloseCost {
            quantity,
            premium,
            commission,
            ..
        } => validate_leg(*premium, *quantity, *commission),
        CalcAction::Pnl {
            open_total,
            close_total,
            ..
        } => {
            require_magnitude_at_most("openTotal", *open_total, MAX_TOTAL_AMOUNT, "Open total")?;
            require_magnitude_at_most("closeTotal", *close_total, MAX_TOTAL_AMOUNT, "Close total")
        }
        CalcAction::Yield { pl, base } => {
            require_magnitude_at_most("pl", *pl, MAX_TOTAL_AMOUNT, "P&L")?;
            require_magnitude_at_most("base", *base, MAX_TOTAL_AMOUNT, "Base value")
        }
        CalcAction::Annualize { yield_percent, .. } => {
            require_magnitude_at_most("yield", *yield_percent, MAX_TOTAL_AMOUNT, "Yield")
        }
        CalcAction::Band { .. } => Ok(()),
    }
}
