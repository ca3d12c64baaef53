mod cli;
mod commands;
mod config;
mod main_lib;
mod output;

use clap::Parser;
use cli::Cli;
use config::Config;
use main_lib::{build_context, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.api_url.clone(), cli.session.clone());
    init_tracing(config.log_format, cli.verbose);
    tracing::debug!("Using API at {}", config.api_base_url);

    let ctx = build_context(&config, cli.json)?;
    commands::run(cli.command, &ctx).await
}
