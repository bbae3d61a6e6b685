use serde::{Deserialize, Serialize};

/// Client to server envelopes
///
/// The `userId` field is camel-cased on the wire; everything else follows the
/// snake_case tag convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Publish a chat line to the room
    ChatMessage {
        username: String,
        #[serde(rename = "userId")]
        user_id: String,
        message: String,
    },
}

/// Server to client envelopes
///
/// Frames with an unrecognized `type` decode to `Unknown` and are dropped
/// without affecting the connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A chat line, either an echo of our own send or another member's
    ChatMessage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        message: String,
    },
    /// Server-generated notice
    System { message: String },
    /// A member joined the room
    UserJoined { message: String },
    /// A member left the room
    UserLeft { message: String },
    /// Room history replayed on join, oldest first
    PreviousMessages { messages: Vec<HistoryEntry> },
    #[serde(other)]
    Unknown,
}

/// One replayed chat line inside a `previous_messages` frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub message: String,
}

impl ServerMessage {
    /// Get the message type name for diagnostics
    pub fn message_type(&self) -> &'static str {
        match self {
            ServerMessage::ChatMessage { .. } => "chat_message",
            ServerMessage::System { .. } => "system",
            ServerMessage::UserJoined { .. } => "user_joined",
            ServerMessage::UserLeft { .. } => "user_left",
            ServerMessage::PreviousMessages { .. } => "previous_messages",
            ServerMessage::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outbound_chat_message_shape() {
        let msg = ClientMessage::ChatMessage {
            username: "u".to_string(),
            user_id: "id".to_string(),
            message: "hi".to_string(),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "chat_message",
                "username": "u",
                "userId": "id",
                "message": "hi",
            })
        );
    }

    #[test]
    fn test_decode_chat_message_without_username() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"type":"chat_message","message":"hello"}"#).unwrap();
        assert!(matches!(
            msg,
            ServerMessage::ChatMessage { username: None, .. }
        ));
    }

    #[test]
    fn test_decode_previous_messages_preserves_order() {
        let msg: ServerMessage = serde_json::from_str(
            r#"{"type":"previous_messages","messages":[
                {"username":"a","message":"1"},
                {"message":"2"},
                {"username":"c","message":"3"}
            ]}"#,
        )
        .unwrap();
        let ServerMessage::PreviousMessages { messages } = msg else {
            panic!("expected previous_messages");
        };
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].username.as_deref(), Some("a"));
        assert_eq!(messages[1].username, None);
        assert_eq!(messages[2].message, "3");
    }

    #[test]
    fn test_unrecognized_type_decodes_to_unknown() {
        let msg: ServerMessage =
            serde_json::from_str(r#"{"type":"typing_indicator","user":"x"}"#).unwrap();
        assert!(matches!(msg, ServerMessage::Unknown));
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let result = serde_json::from_str::<ServerMessage>(r#"{"type":"system"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_object_frame_is_an_error() {
        assert!(serde_json::from_str::<ServerMessage>("not json").is_err());
        assert!(serde_json::from_str::<ServerMessage>(r#""just a string""#).is_err());
    }
}
