mod bot;
mod classify;
mod config;
mod error;
mod gateway;
mod router;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::types::ChatId;
use teloxide::Bot;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bot::AppState;
use crate::config::Config;
use crate::gateway::TelegramGateway;
use crate::router::Router;
use crate::store::CorrelationStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,relaybot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Staff group: {}", config.telegram.group_id);
    info!("  Database: {}", config.storage.database_path.display());

    // Open the correlation store (creates the schema on first start)
    let store = CorrelationStore::open(&config.storage.database_path)?;

    let bot = Bot::new(&config.telegram.bot_token);
    let gateway = Arc::new(TelegramGateway::new(bot.clone()));
    let router = Router::new(
        gateway,
        store,
        ChatId(config.telegram.group_id),
        config.messages.confirmation_message.clone(),
    );

    // Create shared state
    let state = Arc::new(AppState::new(config, router));

    // Run the Telegram bot
    info!("Bot is starting...");
    bot::run(bot, state).await?;

    Ok(())
}
