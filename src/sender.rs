use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::payloads::{SendDocumentSetters, SendMessageSetters, SendPhotoSetters};
use teloxide::requests::Requester;
use teloxide::types::{InputFile, ParseMode};
use teloxide::Bot;
use tracing::debug;

use crate::playback::{MessageDescriptor, MessageKind};

/// Outbound side of the bot: one descriptor in, one platform call out.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &MessageDescriptor) -> Result<()>;
}

/// Sends descriptors through the Telegram Bot API
pub struct TelegramSender {
    bot: Bot,
}

impl TelegramSender {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, message: &MessageDescriptor) -> Result<()> {
        let chat_id = message.chat_id;
        let keyboard = message.keyboard.as_deref().cloned();

        match &message.kind {
            MessageKind::PlainText(text) => {
                debug!("sendMessage chat={} len={}", chat_id.0, text.len());
                // Content uses the legacy Markdown flavour (`*bold*`, unescaped punctuation).
                #[allow(deprecated)]
                let mut request = self
                    .bot
                    .send_message(chat_id, text.as_str())
                    .parse_mode(ParseMode::Markdown);
                if let Some(keyboard) = keyboard {
                    request = request.reply_markup(keyboard);
                }
                request
                    .await
                    .with_context(|| format!("Failed to send message to chat {}", chat_id.0))?;
            }
            MessageKind::DocumentUpload(path) => {
                debug!("sendDocument chat={} file={}", chat_id.0, path.display());
                let mut request = self
                    .bot
                    .send_document(chat_id, InputFile::file(path.clone()));
                if let Some(keyboard) = keyboard {
                    request = request.reply_markup(keyboard);
                }
                request.await.with_context(|| {
                    format!(
                        "Failed to send document {} to chat {}",
                        path.display(),
                        chat_id.0
                    )
                })?;
            }
            MessageKind::PhotoUpload(path) => {
                debug!("sendPhoto chat={} file={}", chat_id.0, path.display());
                let mut request = self.bot.send_photo(chat_id, InputFile::file(path.clone()));
                if let Some(keyboard) = keyboard {
                    request = request.reply_markup(keyboard);
                }
                request.await.with_context(|| {
                    format!(
                        "Failed to send photo {} to chat {}",
                        path.display(),
                        chat_id.0
                    )
                })?;
            }
        }

        Ok(())
    }
}
