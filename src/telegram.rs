use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::{Stream, StreamExt};
use teloxide::net::default_reqwest_settings;
use teloxide::requests::Requester;
use teloxide::types::{AllowedUpdate, ChatId, Update, UpdateKind};
use teloxide::update_listeners::{AsUpdateStream, Polling};
use teloxide::Bot;
use tracing::info;

use crate::commands::CommandRouter;
use crate::config::Config;
use crate::script::Script;
use crate::sender::TelegramSender;

/// The part of an update the bot acts on
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub chat_id: ChatId,
    pub text: String,
}

impl Inbound {
    /// Only new messages count. A message without text carries empty text.
    pub fn from_update(update: Update) -> Option<Self> {
        match update.kind {
            UpdateKind::Message(msg) => Some(Self {
                chat_id: msg.chat.id,
                text: msg.text().unwrap_or_default().to_string(),
            }),
            _ => None,
        }
    }
}

/// Handle inbound messages one at a time until the stream ends or fails.
///
/// Each message is fully played back before the next one is read. A stream
/// error or a send error stops the loop and is returned.
pub async fn serve<S>(router: &CommandRouter, updates: S) -> Result<()>
where
    S: Stream<Item = Result<Inbound>>,
{
    let mut updates = std::pin::pin!(updates);

    while let Some(inbound) = updates.next().await {
        let inbound = inbound.context("Update stream failed")?;
        router
            .handle(inbound.chat_id, &inbound.text)
            .await
            .with_context(|| format!("Playback for chat {} failed", inbound.chat_id.0))?;
    }

    Ok(())
}

/// Connect to Telegram and serve updates via long polling.
pub async fn run(config: Config) -> Result<()> {
    let poll_timeout = config.telegram.poll_timeout_secs;

    // Default teloxide client has a 17s timeout, too short for the long poll.
    let client: reqwest::Client = default_reqwest_settings()
        .timeout(Duration::from_secs(u64::from(poll_timeout) + 10))
        .build()
        .context("Failed to build HTTP client")?;
    let bot = Bot::with_client(&config.telegram.bot_token, client);

    let me = bot
        .get_me()
        .await
        .context("Failed to connect to Telegram")?;
    info!(
        "Bot connected as @{}",
        me.user.username.as_deref().unwrap_or("<unknown>")
    );

    let sender = Arc::new(TelegramSender::new(bot.clone()));
    let router = CommandRouter::new(sender, Script::new(&config.script));

    let mut listener = Polling::builder(bot)
        .timeout(Duration::from_secs(u64::from(poll_timeout)))
        .allowed_updates(vec![AllowedUpdate::Message])
        .build();

    info!("Polling for updates (timeout {}s)", poll_timeout);

    let updates = listener.as_stream().filter_map(|update| async move {
        match update {
            Ok(update) => Inbound::from_update(update).map(Ok),
            Err(e) => Some(Err(anyhow::Error::new(e))),
        }
    });

    serve(&router, updates).await
}
