use std::sync::Arc;

use anyhow::Result;
use teloxide::types::ChatId;
use tracing::{debug, info};

use crate::playback;
use crate::script::Script;
use crate::sender::MessageSender;

/// The scripted sequences a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Back,
    Story,
    Jobs,
    Technologies,
    Contacts,
}

impl Command {
    /// Exact, case-sensitive lookup in the command table.
    ///
    /// Keys are matched literally, including `Tecnologies` and `Contats`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Back" => Some(Command::Back),
            "Start" | "/Start" | "/start" => Some(Command::Start),
            "tellme" => Some(Command::Story),
            "Track" => Some(Command::Jobs),
            "Tecnologies" => Some(Command::Technologies),
            "Contats" => Some(Command::Contacts),
            _ => None,
        }
    }
}

/// Inbound text split into a command token and its comma-separated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

/// Split `text` at its first whitespace. Empty text has no command.
pub fn parse_command(text: &str) -> Option<ParsedCommand<'_>> {
    if text.is_empty() {
        return None;
    }

    let (name, rest) = match text.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest)),
        None => (text, None),
    };

    let args = match rest {
        Some(rest) => rest
            .split(char::is_whitespace)
            .next()
            .unwrap_or_default()
            .split(',')
            .collect(),
        None => Vec::new(),
    };

    Some(ParsedCommand { name, args })
}

/// Routes inbound text to a playback sequence and plays it.
pub struct CommandRouter {
    sender: Arc<dyn MessageSender>,
    script: Script,
}

impl CommandRouter {
    pub fn new(sender: Arc<dyn MessageSender>, script: Script) -> Self {
        Self { sender, script }
    }

    /// Handle one inbound text for `chat_id`.
    ///
    /// Returns the command that was played, or `None` when the text matched
    /// nothing. Errors come only from the sender.
    pub async fn handle(&self, chat_id: ChatId, text: &str) -> Result<Option<Command>> {
        let Some(parsed) = parse_command(text) else {
            return Ok(None);
        };

        let Some(command) = Command::from_token(parsed.name) else {
            debug!("Ignoring unknown command {:?} from chat {}", parsed.name, chat_id.0);
            return Ok(None);
        };

        if !parsed.args.is_empty() {
            debug!("Unused arguments for {:?}: {:?}", command, parsed.args);
        }

        let sequence = self.script.sequence(command, chat_id);
        info!(
            "Playing {:?} ({} messages) for chat {}",
            command,
            sequence.len(),
            chat_id.0
        );
        playback::play(self.sender.as_ref(), &sequence).await?;

        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScriptConfig;
    use crate::playback::MessageKind;
    use crate::sender::testing::RecordingSender;

    fn router() -> (Arc<RecordingSender>, CommandRouter) {
        let sender = Arc::new(RecordingSender::new());
        let router = CommandRouter::new(sender.clone(), Script::new(&ScriptConfig::default()));
        (sender, router)
    }

    #[test]
    fn test_command_table_keys() {
        assert_eq!(Command::from_token("Start"), Some(Command::Start));
        assert_eq!(Command::from_token("/Start"), Some(Command::Start));
        assert_eq!(Command::from_token("/start"), Some(Command::Start));
        assert_eq!(Command::from_token("Back"), Some(Command::Back));
        assert_eq!(Command::from_token("tellme"), Some(Command::Story));
        assert_eq!(Command::from_token("Track"), Some(Command::Jobs));
        assert_eq!(Command::from_token("Tecnologies"), Some(Command::Technologies));
        assert_eq!(Command::from_token("Contats"), Some(Command::Contacts));
    }

    #[test]
    fn test_lookup_is_exact() {
        for token in ["start", "START", "Technologies", "Contacts", "Tellme", "back", "/back", ""] {
            assert_eq!(Command::from_token(token), None, "{:?} should not match", token);
        }
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_parse_single_token() {
        assert_eq!(
            parse_command("Start"),
            Some(ParsedCommand {
                name: "Start",
                args: vec![]
            })
        );
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(
            parse_command("foo bar,baz"),
            Some(ParsedCommand {
                name: "foo",
                args: vec!["bar", "baz"]
            })
        );
    }

    #[test]
    fn test_parse_only_second_token_becomes_arguments() {
        let parsed = parse_command("tellme extra more,stuff").unwrap();
        assert_eq!(parsed.name, "tellme");
        assert_eq!(parsed.args, vec!["extra"]);
    }

    #[test]
    fn test_parse_leading_space_gives_empty_name() {
        let parsed = parse_command(" Start").unwrap();
        assert_eq!(parsed.name, "");
        assert_eq!(Command::from_token(parsed.name), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_plays_four_messages() {
        let (sender, router) = router();

        let played = router.handle(ChatId(42), "Start").await.unwrap();

        assert_eq!(played, Some(Command::Start));
        let sent = sender.messages().await;
        assert_eq!(sent.len(), 4);
        assert!(sent.iter().all(|m| m.chat_id == ChatId(42)));
        assert_eq!(sent[0].kind, MessageKind::PlainText("Hi 🙂!".to_string()));
        assert!(sent[3].keyboard.is_some());

        let times = sender.send_times().await;
        let gaps: Vec<u64> = times.windows(2).map(|w| (w[1] - w[0]).as_secs()).collect();
        assert!(gaps[0] >= 1 && gaps[1] >= 2 && gaps[2] >= 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_contacts_plays_one_message() {
        let (sender, router) = router();

        let played = router.handle(ChatId(7), "Contats").await.unwrap();

        assert_eq!(played, Some(Command::Contacts));
        let sent = sender.messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].chat_id, ChatId(7));
        assert!(sent[0].keyboard.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_sends_nothing() {
        let (sender, router) = router();
        assert_eq!(router.handle(ChatId(1), "").await.unwrap(), None);
        assert!(sender.messages().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_command_sends_nothing() {
        let (sender, router) = router();
        assert_eq!(router.handle(ChatId(1), "foo bar,baz").await.unwrap(), None);
        assert_eq!(router.handle(ChatId(1), "Contacts").await.unwrap(), None);
        assert!(sender.messages().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_arguments_are_ignored() {
        let (sender, router) = router();

        let played = router.handle(ChatId(3), "tellme extra").await.unwrap();

        assert_eq!(played, Some(Command::Story));
        let sent = sender.messages().await;
        assert_eq!(sent.len(), 14);
        let photos = sent
            .iter()
            .filter(|m| matches!(m.kind, MessageKind::PhotoUpload(_)))
            .count();
        assert_eq!(photos, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_failure_is_returned() {
        let sender = Arc::new(RecordingSender::failing_on(1));
        let router = CommandRouter::new(sender.clone(), Script::new(&ScriptConfig::default()));

        assert!(router.handle(ChatId(1), "Start").await.is_err());
        assert!(sender.messages().await.is_empty());
    }
}
