//! Structured ticket draft produced by conversation analysis.

use serde::{Deserialize, Serialize};

/// Ticket priority, as understood by the ticketing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Critical,
}

/// Customer sentiment read from the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Frustrated,
    Angry,
}

/// How urgently the conversation suggests the issue needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Standard,
    High,
    Urgent,
}

/// A structured, not-yet-persisted proposal for a support ticket.
///
/// Drafts are never stored by this subsystem; they are merged with the
/// customer identity and handed to the ticketing backend, which assigns
/// the durable id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    /// Short ticket title, at most 60 characters.
    pub subject: String,
    /// Full issue description embedding the user's messages in order.
    pub description: String,
    /// Suggested priority.
    pub priority: TicketPriority,
    /// Issue category name.
    pub category: String,
    /// Recommended next steps for the assignee.
    pub suggested_solution: String,
    /// Customer sentiment read from the conversation.
    pub customer_sentiment: Sentiment,
    /// Urgency classification.
    pub urgency_level: UrgencyLevel,
    /// Deduplicated keyword tags.
    pub tags: Vec<String>,
    /// Analyzer confidence in the draft, clamped to [0, 1].
    pub confidence: f32,
}
