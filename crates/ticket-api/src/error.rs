//! Error types for ticket operations.

use thiserror::Error;

/// Errors from ticket synthesis and submission.
///
/// Unlike completion failures, ticket failures are user-visible: there
/// is no local fallback for actually persisting a ticket, so callers
/// surface a retry prompt on `Network`/`Api`.
#[derive(Debug, Error)]
pub enum TicketError {
    /// A required field was empty. Raised synchronously, before any
    /// network call is attempted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure reaching the ticket backend.
    #[error("network error: {0}")]
    Network(String),

    /// The ticket backend answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend's response could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// No ticket with the requested id.
    #[error("ticket {0} not found")]
    NotFound(u64),
}

/// What the chat UI shows when ticket submission fails.
pub const CREATE_TICKET_FAILURE: &str = "Failed to create ticket. Please try again.";

impl TicketError {
    /// The message shown to the end user for this failure.
    ///
    /// Validation problems name the field; everything else gets the
    /// generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(field) => format!("Please fill in the required field: {field}"),
            _ => CREATE_TICKET_FAILURE.to_string(),
        }
    }
}
