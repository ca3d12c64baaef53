//! In-memory cache of query results keyed by path-like segments.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tradeledger_core::Result;

/// Identifies a cached query, e.g. `["trades", "open"]`.
///
/// Keys form a hierarchy: invalidating `["trades"]` also drops
/// `["trades", "open"]` and `["trades", <portfolio id>]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }

    pub fn trades() -> Self {
        Self::new(["trades"])
    }

    pub fn open_trades() -> Self {
        Self::new(["trades", "open"])
    }

    pub fn portfolio_trades(portfolio_id: &str) -> Self {
        Self::new(["trades", portfolio_id])
    }

    pub fn trade(trade_id: &str) -> Self {
        Self::new(["trade", trade_id])
    }

    pub fn portfolios() -> Self {
        Self::new(["portfolios"])
    }

    pub fn default_portfolio() -> Self {
        Self::new(["portfolios", "default"])
    }

    pub fn portfolio(portfolio_id: &str) -> Self {
        Self::new(["portfolio", portfolio_id])
    }

    pub fn positions() -> Self {
        Self::new(["positions"])
    }

    pub fn portfolio_positions(portfolio_id: &str) -> Self {
        Self::new(["positions", "portfolio", portfolio_id])
    }

    pub fn position(position_id: &str) -> Self {
        Self::new(["positions", "detail", position_id])
    }

    pub fn users() -> Self {
        Self::new(["users"])
    }

    pub fn user(user_id: &str) -> Self {
        Self::new(["user", user_id])
    }

    pub fn current_user() -> Self {
        Self::new(["currentUser"])
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    fetched_at: Instant,
}

/// Query results stored as JSON with a fixed time-to-live.
#[derive(Debug)]
pub struct QueryCache {
    entries: DashMap<QueryKey, CacheEntry>,
    ttl: Duration,
}

impl QueryCache {
    /// A zero `ttl` disables caching: every read goes to the fetcher.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh cached value for `key`, if any. Expired entries are evicted.
    pub fn get<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        if !self.is_enabled() {
            return None;
        }
        let value = {
            let entry = self.entries.get(key)?;
            if entry.fetched_at.elapsed() < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        };
        match value {
            Some(value) => serde_json::from_value(value).ok(),
            None => {
                self.entries.remove(key);
                None
            }
        }
    }

    pub fn insert<T: Serialize>(&self, key: QueryKey, value: &T) {
        if !self.is_enabled() {
            return;
        }
        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries.insert(
                    key,
                    CacheEntry {
                        value,
                        fetched_at: Instant::now(),
                    },
                );
            }
            Err(e) => debug!("[QueryCache] Skipping {}: {}", key, e),
        }
    }

    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// result. Errors are never cached.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get(&key) {
            debug!("[QueryCache] hit {}", key);
            return Ok(hit);
        }
        let value = fetch().await?;
        self.insert(key, &value);
        Ok(value)
    }

    /// Drops every entry whose key starts with `prefix`.
    pub fn invalidate(&self, prefix: &QueryKey) {
        self.entries.retain(|key, _| !key.starts_with(prefix));
    }

    pub fn invalidate_all<'a, I>(&self, prefixes: I)
    where
        I: IntoIterator<Item = &'a QueryKey>,
    {
        let prefixes: Vec<&QueryKey> = prefixes.into_iter().collect();
        self.entries
            .retain(|key, _| !prefixes.iter().any(|prefix| key.starts_with(prefix)));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_CACHE_TTL_SECS))
    }
}
