//! TradeLedger Core - Domain entities, derived metrics, and service traits.
//!
//! This crate contains the client-side business rules for TradeLedger.
//! It is transport-agnostic and defines traits that are implemented
//! by the `tradeledger-client` crate against the REST API.

pub mod constants;
pub mod errors;
pub mod metrics;
pub mod portfolios;
pub mod positions;
pub mod trades;
pub mod users;
pub mod utils;

// Re-export the metrics entry points
pub use metrics::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
