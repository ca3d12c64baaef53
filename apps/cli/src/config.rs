use std::{path::PathBuf, time::Duration};

use tradeledger_client::config::{DEFAULT_CACHE_TTL_SECS, DEFAULT_TIMEOUT_MS};
use tradeledger_client::{ClientConfig, DEFAULT_API_BASE_URL};
use tradeledger_core::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub session_file: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = var("TL_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
        let timeout_ms = parse_u64("TL_REQUEST_TIMEOUT_MS", var("TL_REQUEST_TIMEOUT_MS"))?
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let cache_ttl_secs = parse_u64("TL_CACHE_TTL_SECS", var("TL_CACHE_TTL_SECS"))?
            .unwrap_or(DEFAULT_CACHE_TTL_SECS);
        let session_file = var("TL_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_session_file(var("HOME")));
        let log_format = match var("TL_LOG_FORMAT") {
            None => LogFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(v) => {
                return Err(Error::InvalidConfigValue(format!(
                    "TL_LOG_FORMAT must be 'text' or 'json', got '{}'",
                    v
                )))
            }
        };

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            session_file,
            log_format,
        })
    }

    /// Applies command-line flags on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, session: Option<PathBuf>) -> Self {
        if let Some(api_url) = api_url {
            self.api_base_url = api_url;
        }
        if let Some(session) = session {
            self.session_file = session;
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.api_base_url.clone())
            .with_timeout(self.request_timeout)
            .with_cache_ttl(self.cache_ttl)
    }
}

fn parse_u64(key: &str, raw: Option<String>) -> Result<Option<u64>> {
    raw.map(|v| {
        v.trim().parse::<u64>().map_err(|_| {
            Error::InvalidConfigValue(format!("{} must be a non-negative integer, got '{}'", key, v))
        })
    })
    .transpose()
}

fn default_session_file(home: Option<String>) -> PathBuf {
    home.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tradeledger")
        .join("session.json")
}
