use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tradeledger_client::{ApiClient, FileSessionStore, SessionStore};

use crate::config::{Config, LogFormat};

/// Everything a command needs to run.
pub struct Context {
    pub client: ApiClient,
    pub json: bool,
}

/// Installs the global subscriber. `RUST_LOG` wins over the default level,
/// which is `warn`, or `info` with `--verbose`. Records from the `log`
/// facade used by the library crates are forwarded too.
pub fn init_tracing(format: LogFormat, verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_context(config: &Config, json: bool) -> anyhow::Result<Context> {
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(config.session_file.clone()));
    let client = ApiClient::new(config.client_config(), store)?;
    tracing::info!(
        "Session file in use: {}",
        config.session_file.to_string_lossy()
    );
    Ok(Context { client, json })
}
