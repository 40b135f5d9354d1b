use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::router::Router;

/// Shared application state
pub struct AppState {
    config: Config,
    router: Router,
}

impl AppState {
    pub fn new(config: Config, router: Router) -> Self {
        Self { config, router }
    }
}

/// Start the Telegram bot
pub async fn run(bot: Bot, state: Arc<AppState>) -> Result<()> {
    info!("Starting Telegram bot...");

    let group_id = state.config.telegram.group_id;

    // Split the update stream before any relay logic runs: staff-group
    // messages go to reply routing, private messages to forwarding.
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter(move |msg: Message| msg.chat.id.0 == group_id)
                .endpoint(handle_group_message),
        )
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.chat.is_private())
                .endpoint(handle_user_message),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("bot"))
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_user_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(text) = msg.text() {
        if text == "/start" {
            bot.send_message(msg.chat.id, &state.config.messages.welcome_message)
                .await?;
            return Ok(());
        }
        if text.starts_with('/') {
            // Commands are not relayed
            return Ok(());
        }
    }

    info!(
        "Relaying message {} from user chat {}",
        msg.id.0, msg.chat.id.0
    );

    if let Err(e) = state.router.forward_to_group(&msg).await {
        error!(
            "Failed to relay message {} from chat {}: {}",
            msg.id.0, msg.chat.id.0, e
        );
    }

    Ok(())
}

async fn handle_group_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    // Most group traffic is ordinary chatter; only replies are routed back
    if msg.reply_to_message().is_none() {
        return Ok(());
    }

    if let Err(e) = state.router.route_reply(&msg).await {
        error!("Failed to route staff reply {}: {}", msg.id.0, e);
    }

    Ok(())
}
