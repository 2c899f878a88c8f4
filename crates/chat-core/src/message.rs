//! Message types for the chat transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The customer typing into the chat.
    User,
    /// The assistant.
    Bot,
}

/// One exchange unit in a chat session.
///
/// Messages are immutable once appended to a [`Transcript`](crate::Transcript);
/// their `id` is assigned by the transcript and increases monotonically, so
/// id order equals conversation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Transcript-assigned id, monotonic within one session.
    pub id: u64,
    /// Who sent the message.
    pub sender: Sender,
    /// Message text.
    pub text: String,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
    /// Selectable quick-reply options offered to the user, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Message {
    /// Create a user message. The id is assigned on append.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: 0,
            sender: Sender::User,
            text: text.into(),
            timestamp: Utc::now(),
            options: None,
        }
    }

    /// Create a bot message with no options.
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            id: 0,
            sender: Sender::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            options: None,
        }
    }

    /// Create a bot message with quick-reply options.
    pub fn bot_with_options(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            id: 0,
            sender: Sender::Bot,
            text: text.into(),
            timestamp: Utc::now(),
            options: Some(options),
        }
    }

    /// Whether this message came from the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}
