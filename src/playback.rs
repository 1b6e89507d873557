use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use teloxide::types::{ChatId, KeyboardMarkup};
use tracing::debug;

use crate::sender::MessageSender;

/// What a descriptor sends, and how its content is interpreted
#[derive(Debug, Clone, PartialEq)]
pub enum MessageKind {
    /// Markdown-formatted text, sent as-is
    PlainText(String),
    /// Local file sent as a document attachment
    DocumentUpload(PathBuf),
    /// Local file sent as an image
    PhotoUpload(PathBuf),
}

/// One outbound unit of a playback sequence
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
    pub chat_id: ChatId,
    pub kind: MessageKind,
    /// Pause after this message is sent, before the next one
    pub delay: Duration,
    /// Reply keyboard to attach. `None` leaves the client's keyboard as it is.
    pub keyboard: Option<Arc<KeyboardMarkup>>,
}

/// Send every descriptor in order, sleeping for its delay after each send.
///
/// The pause also follows the last message. The first failed send aborts the
/// rest of the sequence and is returned to the caller.
pub async fn play(sender: &dyn MessageSender, sequence: &[MessageDescriptor]) -> Result<()> {
    for (index, message) in sequence.iter().enumerate() {
        sender.send(message).await?;
        debug!(
            "Sent message {}/{} to chat {}, pausing {:?}",
            index + 1,
            sequence.len(),
            message.chat_id.0,
            message.delay
        );
        tokio::time::sleep(message.delay).await;
    }
    Ok(())
}
