//! Table and detail rendering for command results.

use rust_decimal::Decimal;
use serde::Serialize;
use tradeledger_core::portfolios::{Portfolio, PortfolioYieldMetrics};
use tradeledger_core::positions::{BatchPriceUpdateResponse, Position};
use tradeledger_core::trades::Trade;
use tradeledger_core::unrealized_pl_percent;
use tradeledger_core::users::User;
use tradeledger_core::utils::{
    format_currency, format_date, format_date_time, format_percentage, format_signed_currency,
};

use crate::main_lib::Context;

const EMPTY_CELL: &str = "-";

/// Prints `value` as pretty JSON with `--json`, otherwise as rendered text.
pub fn emit<T, F>(ctx: &Context, value: &T, render: F) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render(value));
    }
    Ok(())
}

/// Left-aligned text table.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let mut out = vec![
            render_line(&self.headers, &widths),
            render_line(&separator.iter().map(String::as_str).collect::<Vec<_>>(), &widths),
        ];
        for row in &self.rows {
            out.push(render_line(
                &row.iter().map(String::as_str).collect::<Vec<_>>(),
                &widths,
            ));
        }
        out.join("\n")
    }
}

fn render_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn money(value: Option<Decimal>) -> String {
    value.map(format_currency).unwrap_or_else(|| EMPTY_CELL.to_string())
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY_CELL).to_string()
}

pub fn portfolios_table(portfolios: &[Portfolio]) -> String {
    if portfolios.is_empty() {
        return "No portfolios.".to_string();
    }
    let mut table = Table::new(vec!["ID", "Name", "Active", "Default", "Description"]);
    for p in portfolios {
        table.push(vec![
            p.id.clone(),
            p.name.clone(),
            yes_no(p.is_active),
            yes_no(p.is_default),
            text(p.description.as_deref()),
        ]);
    }
    table.render()
}

pub fn portfolio_detail(p: &Portfolio) -> String {
    [
        format!("{} ({})", p.name, p.id),
        format!("Description: {}", text(p.description.as_deref())),
        format!("Active:      {}", yes_no(p.is_active)),
        format!("Default:     {}", yes_no(p.is_default)),
        format!("Created:     {}", format_date_time(&p.created_at)),
        format!("Updated:     {}", format_date_time(&p.updated_at)),
    ]
    .join("\n")
}

pub fn yield_detail(m: &PortfolioYieldMetrics) -> String {
    [
        format!("Portfolio value:         {}", format_currency(m.portfolio_value)),
        format!("Closed trades (30 days): {}", m.trades_count),
        format!("Realized P&L:            {}", format_signed_currency(m.last_30_days_pl)),
        format!("Yield:                   {}", format_percentage(m.last_30_days_yield_percent)),
        format!(
            "Annualized yield:        {}",
            format_percentage(m.last_30_days_annualized_yield)
        ),
    ]
    .join("\n")
}

pub fn positions_table(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "No positions.".to_string();
    }
    let mut table = Table::new(vec![
        "ID", "Ticker", "Shares", "Cost Basis", "Avg Cost", "Price", "Market Value", "P&L", "P&L %",
    ]);
    for p in positions {
        table.push(vec![
            p.id.clone(),
            p.ticker.clone(),
            p.shares.normalize().to_string(),
            format_currency(p.cost_basis),
            money(p.average_cost()),
            money(p.current_price),
            money(p.market_value()),
            p.unrealized_pl()
                .map(format_signed_currency)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
            unrealized_pl_percent(p)
                .map(format_percentage)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
        ]);
    }
    table.render()
}

pub fn position_detail(p: &Position) -> String {
    let mut lines = vec![
        format!("{} ({})", p.ticker, p.id),
        format!("Shares:         {}", p.shares.normalize()),
        format!("Cost basis:     {}", format_currency(p.cost_basis)),
        format!("Average cost:   {}", money(p.average_cost())),
        format!("Current price:  {}", money(p.current_price)),
        format!("Market value:   {}", money(p.market_value())),
        format!(
            "Unrealized P&L: {}",
            p.unrealized_pl()
                .map(format_signed_currency)
                .unwrap_or_else(|| EMPTY_CELL.to_string())
        ),
    ];
    if let Some(pct) = unrealized_pl_percent(p) {
        lines.push(format!("P&L %:          {}", format_percentage(pct)));
    }
    if let Some(notes) = &p.notes {
        lines.push(format!("Notes:          {}", notes));
    }
    lines.join("\n")
}

pub fn price_update_summary(response: &BatchPriceUpdateResponse) -> String {
    let mut table = Table::new(vec!["Ticker", "Price", "Market Value", "P&L"]);
    for p in &response.positions {
        table.push(vec![
            p.ticker.clone(),
            format_currency(p.current_price),
            format_currency(p.market_value),
            format_signed_currency(p.unrealized_pl),
        ]);
    }
    format!("Updated {} positions.\n{}", response.updated, table.render())
}

pub fn trades_table(trades: &[Trade]) -> String {
    if trades.is_empty() {
        return "No trades.".to_string();
    }
    let mut table = Table::new(vec![
        "ID", "Symbol", "Type", "Strike", "Expires", "Action", "Qty", "Open Total", "Status", "P&L",
    ]);
    for t in trades {
        table.push(vec![
            t.id.clone(),
            t.symbol.clone(),
            t.option_type.to_string(),
            format_currency(t.strike_price),
            format_date(t.expiration_date),
            t.open_action.to_string(),
            t.open_quantity.normalize().to_string(),
            format_currency(t.open_total_cost),
            t.status.to_string(),
            t.realized_profit_loss()
                .map(format_signed_currency)
                .unwrap_or_else(|| EMPTY_CELL.to_string()),
        ]);
    }
    table.render()
}

pub fn trade_detail(t: &Trade) -> String {
    let mut lines = vec![
        format!(
            "{} {} {} {} ({})",
            t.symbol,
            format_date(t.expiration_date),
            format_currency(t.strike_price),
            t.option_type,
            t.id
        ),
        format!("Portfolio:   {}", text(t.portfolio_id.as_deref())),
        format!("Status:      {}", t.status),
        format!(
            "Opened:      {} {} x {} @ {} on {}",
            t.open_action,
            t.open_quantity.normalize(),
            t.symbol,
            format_currency(t.open_premium),
            format_date(t.open_trade_date)
        ),
        format!("Open total:  {}", format_currency(t.open_total_cost)),
    ];
    if let (Some(action), Some(premium)) = (t.close_action, t.close_premium) {
        lines.push(format!(
            "Closed:      {} @ {} on {}",
            action,
            format_currency(premium),
            t.close_trade_date
                .map(format_date)
                .unwrap_or_else(|| EMPTY_CELL.to_string())
        ));
        lines.push(format!("Close total: {}", money(t.close_total_cost)));
    }
    if let Some(pl) = t.realized_profit_loss() {
        lines.push(format!("P&L:         {}", format_signed_currency(pl)));
    }
    if let Some(notes) = &t.notes {
        lines.push(format!("Notes:       {}", notes));
    }
    lines.join("\n")
}

pub fn users_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users.".to_string();
    }
    let mut table = Table::new(vec!["ID", "Name", "Email", "Role"]);
    for u in users {
        table.push(vec![
            u.id.clone(),
            u.name.clone(),
            u.email.clone(),
            u.role.to_string(),
        ]);
    }
    table.render()
}

pub fn user_detail(u: &User) -> String {
    let mut lines = vec![
        format!("{} <{}>", u.name, u.email),
        format!("ID:   {}", u.id),
        format!("Role: {}", u.role),
    ];
    if let Some(created_at) = &u.created_at {
        lines.push(format!("Since: {}", format_date_time(created_at)));
    }
    lines.join("\n")
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use tradeledger_core::trades::{OpeningAction, OptionType, TradeStatus};

    fn trade() -> Trade {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 15, 0, 0).unwrap();
        Trade {
            id: "t1".to_string(),
            user_id: "u1".to_string(),
            portfolio_id: None,
            symbol: "SPY".to_string(),
            option_type: OptionType::Put,
            strike_price: dec!(500),
            expiration_date: NaiveDate::from_ymd_opt(2025, 3, 21).unwrap(),
            open_action: OpeningAction::SellToOpen,
            open_quantity: dec!(1),
            open_premium: dec!(5),
            open_commission: dec!(0.65),
            open_trade_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            open_total_cost: dec!(499.35),
            close_action: None,
            close_quantity: None,
            close_premium: None,
            close_commission: None,
            close_trade_date: None,
            close_total_cost: None,
            status: TradeStatus::Open,
            profit_loss: None,
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        let mut table = Table::new(vec!["A", "Long header"]);
        table.push(vec!["wide cell".to_string(), "x".to_string()]);
        assert_eq!(
            table.render(),
            "A          Long header\n---------  -----------\nwide cell  x"
        );
    }

    #[test]
    fn test_trades_table_formats_money() {
        let rendered = trades_table(&[trade()]);
        assert!(rendered.contains("$499.35"));
        assert!(rendered.contains("sell_to_open"));
        assert!(rendered.contains("Mar 21, 2025"));
        assert!(rendered.lines().nth(2).unwrap().trim_end().ends_with('-'));
    }

    #[test]
    fn test_closed_trade_detail_shows_pl() {
        let mut t = trade();
        let close = tradeledger_core::trades::CloseTrade::paired_with(
            t.open_action,
            dec!(2),
            dec!(0.65),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        );
        t.close(&close).unwrap();
        let rendered = trade_detail(&t);
        assert!(rendered.contains("Close total: $200.65"));
        assert!(rendered.contains("P&L:         +$298.70"));
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(trades_table(&[]), "No trades.");
        assert_eq!(positions_table(&[]), "No positions.");
        assert_eq!(portfolios_table(&[]), "No portfolios.");
        assert_eq!(users_table(&[]), "No users.");
    }
}
