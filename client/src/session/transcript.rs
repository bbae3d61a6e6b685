//! Transcript of display-ready lines
//!
//! Arrival order is the only order. The transcript only grows, except for the
//! reset performed on disconnect.

use crate::protocol::ServerMessage;
use tracing::debug;

/// Placeholder for chat lines whose sender is absent or blank
const ANON: &str = "Anon";

/// Ordered, append-only sequence of display lines
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Reset-on-disconnect
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Classify a decoded frame and append the lines it yields.
    ///
    /// A `previous_messages` batch lands as one update, preserving the
    /// server's order. Unrecognized frames yield nothing.
    pub fn apply(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::ChatMessage { username, message } => {
                self.lines.push(chat_line(username.as_deref(), &message));
            }
            ServerMessage::System { message }
            | ServerMessage::UserJoined { message }
            | ServerMessage::UserLeft { message } => {
                self.lines.push(format!("[{}]", message));
            }
            ServerMessage::PreviousMessages { messages } => {
                self.lines.extend(
                    messages
                        .iter()
                        .map(|m| chat_line(m.username.as_deref(), &m.message)),
                );
            }
            ServerMessage::Unknown => {
                debug!("Ignoring frame with unrecognized type");
            }
        }
    }
}

/// Format a chat line, falling back to `Anon` when the sender is missing
fn chat_line(username: Option<&str>, message: &str) -> String {
    let name = match username {
        Some(name) if !name.is_empty() => name,
        _ => ANON,
    };
    format!("{}: {}", name, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HistoryEntry;

    #[test]
    fn test_chat_line_formatting() {
        assert_eq!(chat_line(Some("alice"), "hi"), "alice: hi");
        assert_eq!(chat_line(None, "hi"), "Anon: hi");
        assert_eq!(chat_line(Some(""), "hi"), "Anon: hi");
    }

    #[test]
    fn test_chat_message_appends_one_line() {
        let mut transcript = Transcript::new();
        transcript.apply(ServerMessage::ChatMessage {
            username: Some("u".to_string()),
            message: "hi".to_string(),
        });
        assert_eq!(transcript.lines(), ["u: hi"]);
    }

    #[test]
    fn test_system_like_lines_are_bracketed() {
        let mut transcript = Transcript::new();
        transcript.apply(ServerMessage::System {
            message: "server restarting".to_string(),
        });
        transcript.apply(ServerMessage::UserJoined {
            message: "alice joined".to_string(),
        });
        transcript.apply(ServerMessage::UserLeft {
            message: "alice left".to_string(),
        });
        assert_eq!(
            transcript.lines(),
            ["[server restarting]", "[alice joined]", "[alice left]"]
        );
    }

    #[test]
    fn test_previous_messages_append_in_order() {
        let mut transcript = Transcript::new();
        transcript.apply(ServerMessage::PreviousMessages {
            messages: vec![
                HistoryEntry {
                    username: Some("a".to_string()),
                    message: "first".to_string(),
                },
                HistoryEntry {
                    username: None,
                    message: "second".to_string(),
                },
                HistoryEntry {
                    username: Some("c".to_string()),
                    message: "third".to_string(),
                },
            ],
        });
        assert_eq!(transcript.lines(), ["a: first", "Anon: second", "c: third"]);
    }

    #[test]
    fn test_unknown_frames_append_nothing() {
        let mut transcript = Transcript::new();
        transcript.apply(ServerMessage::Unknown);
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_clear_resets_to_empty() {
        let mut transcript = Transcript::new();
        transcript.apply(ServerMessage::ChatMessage {
            username: None,
            message: "hi".to_string(),
        });
        assert!(!transcript.is_empty());
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
