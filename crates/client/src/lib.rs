//! TradeLedger Client - REST implementation of the core service traits.
//!
//! [`ApiClient`] talks to the TradeLedger server over HTTP, keeps the
//! signed-in user in a [`SessionStore`], and memoizes reads in a
//! [`QueryCache`] that mutations invalidate.

pub mod cache;
pub mod client;
pub mod config;
pub mod session;

mod auth;
mod portfolios;
mod positions;
mod trades;
mod users;

pub use cache::{QueryCache, QueryKey};
pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_BASE_URL};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
