//! Portfolios module - portfolio models, yield aggregation, and service trait.

mod opportunity;
mod portfolio_yield;
mod portfolios_model;
mod portfolios_traits;

#[cfg(test)]
mod portfolios_model_tests;

pub use opportunity::{OpportunityBand, PositionOpportunity};
pub use portfolio_yield::PortfolioYieldMetrics;
pub use portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
pub use portfolios_traits::PortfolioServiceTrait;
