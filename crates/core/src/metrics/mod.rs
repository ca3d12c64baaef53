//! Derived financial metrics.
//!
//! Pure functions over already-validated primitives. Nothing in this module
//! performs I/O, holds state, or returns an error; division by zero degrades
//! to a documented sentinel instead.

mod trade_metrics;
mod yield_metrics;

#[cfg(test)]
mod metrics_tests;

pub use trade_metrics::{close_total_cost, contract_value, open_total_cost, profit_loss};
pub use yield_metrics::{annualized_yield, unrealized_pl_percent, yield_percent};
