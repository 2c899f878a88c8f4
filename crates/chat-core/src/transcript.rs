//! The session transcript: an append-only ordered message log.

use crate::message::{Message, Sender};

/// Append-only ordered list of messages for one chat session.
///
/// The transcript is the source of truth for conversation analysis and
/// resolution bookkeeping. It lives for the session only; there is no
/// persistence across sessions. Ids are assigned on append and increase
/// monotonically, so id order equals conversation order.
///
/// Transient presentation state (the typing indicator) is deliberately
/// not represented here; it belongs to the session, not the transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, assigning the next id. Returns the assigned id.
    pub fn append(&mut self, mut message: Message) -> u64 {
        self.next_id += 1;
        message.id = self.next_id;
        let id = message.id;
        self.messages.push(message);
        id
    }

    /// All messages in conversation order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent `n` messages, in conversation order.
    pub fn last_n(&self, n: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }

    /// Messages sent by the user, in conversation order.
    pub fn user_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.sender == Sender::User)
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_monotonic_ids() {
        let mut transcript = Transcript::new();
        let a = transcript.append(Message::user("first"));
        let b = transcript.append(Message::bot("second"));
        let c = transcript.append(Message::user("third"));

        assert!(a < b && b < c);
        let ids: Vec<u64> = transcript.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![a, b, c]);
    }

    #[test]
    fn test_last_n_window() {
        let mut transcript = Transcript::new();
        for i in 0..15 {
            transcript.append(Message::user(format!("msg {i}")));
        }

        let window = transcript.last_n(10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].text, "msg 5");
        assert_eq!(window[9].text, "msg 14");

        // A window larger than the transcript returns everything.
        assert_eq!(transcript.last_n(100).len(), 15);
    }

    #[test]
    fn test_user_messages_filter() {
        let mut transcript = Transcript::new();
        transcript.append(Message::bot("hi, how can I help?"));
        transcript.append(Message::user("my payment failed"));
        transcript.append(Message::bot("let's check your card"));
        transcript.append(Message::user("still failing"));

        let texts: Vec<&str> = transcript.user_messages().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["my payment failed", "still failing"]);
    }
}
