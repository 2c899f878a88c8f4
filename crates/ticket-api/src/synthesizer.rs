//! Pure transformation from a ticket draft to a creation payload.

use chat_core::{TicketDraft, Transcript};
use chrono::Utc;

use crate::error::TicketError;
use crate::types::{AiAnalysis, ConversationEntry, CreateTicketPayload, CustomerIdentity, TicketStatus};

/// Source tag stamped on every chatbot-created ticket.
pub const CHATBOT_SOURCE: &str = "chatbot";

/// Merge a draft with the customer identity and conversation metadata
/// into a ready-to-submit creation payload.
///
/// This is a pure transformation: no I/O, no clock beyond the creation
/// timestamp, and the draft's `subject`, `description`, and `priority`
/// pass through unchanged. Submission belongs to the
/// [`TicketRepository`](crate::TicketRepository) collaborator.
///
/// Validation happens here, synchronously, before anything reaches the
/// network: an empty subject, description, customer name, or email is
/// rejected.
pub fn synthesize(
    draft: TicketDraft,
    customer: &CustomerIdentity,
    transcript: &Transcript,
) -> Result<CreateTicketPayload, TicketError> {
    if draft.subject.trim().is_empty() {
        return Err(TicketError::InvalidInput("subject is empty".to_string()));
    }
    if draft.description.trim().is_empty() {
        return Err(TicketError::InvalidInput("description is empty".to_string()));
    }
    if customer.name.trim().is_empty() {
        return Err(TicketError::InvalidInput("customer name is empty".to_string()));
    }
    if customer.email.trim().is_empty() {
        return Err(TicketError::InvalidInput("customer email is empty".to_string()));
    }

    Ok(CreateTicketPayload {
        subject: draft.subject,
        description: draft.description,
        priority: draft.priority,
        status: TicketStatus::New,
        customer_id: customer.id,
        customer_name: customer.name.clone(),
        customer_email: customer.email.clone(),
        created_at: Utc::now(),
        category: draft.category,
        source: CHATBOT_SOURCE.to_string(),
        conversation_history: transcript.messages().iter().map(ConversationEntry::from).collect(),
        ai_analysis: AiAnalysis {
            sentiment: draft.customer_sentiment,
            urgency: draft.urgency_level,
            suggested_solution: draft.suggested_solution,
            tags: draft.tags,
            confidence: draft.confidence,
        },
    })
}
