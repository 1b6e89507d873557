mod commands;
mod config;
mod playback;
mod script;
mod sender;
mod telegram;

use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portfolio_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting bot");

    let config_path = Config::default_path();
    let config = match Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration ({})", config_path.display()))
    {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration loaded");
    info!("  Assets: {}", config.script.assets_dir.display());
    info!("  Poll timeout: {}s", config.telegram.poll_timeout_secs);

    // Every fault past startup is fatal too: log it once and exit non-zero.
    if let Err(e) = telegram::run(config).await {
        error!("Bot stopped: {:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
