//! Ticket wire types for the ticketing REST backend.

use chat_core::{Message, Sender, Sentiment, TicketPriority, UrgencyLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket lifecycle status, as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Just created, awaiting assignment.
    New,
    /// Assigned but work not started.
    Open,
    /// Actively being worked on.
    InProgress,
    /// Issue fixed, awaiting customer confirmation.
    Resolved,
    /// Fully resolved and closed.
    Closed,
    /// Escalated for immediate attention.
    #[serde(rename = "URGENT")]
    Escalated,
}

/// The customer a ticket is created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerIdentity {
    /// Backend customer id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// One transcript entry in the wire form the backend stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    /// "user" or "bot".
    pub sender: Sender,
    /// Message text.
    pub text: String,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for ConversationEntry {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.sender,
            text: message.text.clone(),
            timestamp: message.timestamp,
        }
    }
}

/// AI-derived fields attached to a chatbot-created ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAnalysis {
    /// Customer sentiment read from the conversation.
    pub sentiment: Sentiment,
    /// Urgency classification.
    pub urgency: UrgencyLevel,
    /// Recommended next steps for the assignee.
    pub suggested_solution: String,
    /// Keyword tags.
    pub tags: Vec<String>,
    /// Analyzer confidence in the draft.
    pub confidence: f32,
}

/// Body of `POST /tickets/customer/{customerId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketPayload {
    /// Ticket title.
    pub subject: String,
    /// Full issue description.
    pub description: String,
    /// Suggested priority.
    pub priority: TicketPriority,
    /// Initial status; new tickets default to [`TicketStatus::New`].
    pub status: TicketStatus,
    /// Backend customer id.
    pub customer_id: u64,
    /// Customer display name.
    pub customer_name: String,
    /// Customer contact email.
    pub customer_email: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Issue category.
    pub category: String,
    /// Where the ticket came from; chatbot tickets say "chatbot".
    pub source: String,
    /// The full conversation, in order.
    pub conversation_history: Vec<ConversationEntry>,
    /// AI-derived draft fields.
    pub ai_analysis: AiAnalysis,
}

/// A ticket record as returned by the backend, with its durable id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Server-assigned id.
    pub id: u64,
    /// Ticket title.
    pub subject: String,
    /// Full issue description.
    pub description: String,
    /// Priority.
    pub priority: TicketPriority,
    /// Current status.
    pub status: TicketStatus,
    /// Backend customer id.
    pub customer_id: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Issue category.
    pub category: String,
    /// Ticket origin.
    pub source: String,
    /// Assigned employee, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<u64>,
}
