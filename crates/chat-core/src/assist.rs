//! Backend reply types and the completion backend trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::context::ConversationContext;
use crate::draft::TicketDraft;
use crate::error::AssistError;
use crate::transcript::Transcript;

/// An action the assistant suggested the user take, extracted from the
/// reply text by phrase-trigger matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Refresh or reload the page.
    RefreshPage,
    /// Clear the browser cache.
    ClearCache,
    /// Reset a forgotten or broken password.
    ResetPassword,
    /// Escalate to a support ticket.
    CreateTicket,
    /// Retry the failed operation.
    Retry,
    /// The issue appears solved.
    MarkResolved,
}

impl SuggestedAction {
    /// Quick-reply label for this action.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RefreshPage => "Refresh Page",
            Self::ClearCache => "Clear Browser Cache",
            Self::ResetPassword => "Reset Password",
            Self::CreateTicket => "Create Support Ticket",
            Self::Retry => "Try Again",
            Self::MarkResolved => "Issue Resolved!",
        }
    }
}

/// One assistant reply, with the derived signals the engine acts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistResponse {
    /// Reply text to show the user.
    pub message: String,
    /// Whether a resolution signal was detected this turn.
    pub is_resolved: bool,
    /// Heuristic confidence in `message`, clamped to [0, 1].
    ///
    /// This is a lexical approximation derived from the reply's own
    /// phrasing, not a calibrated probability from the model.
    pub confidence: f32,
    /// Actions extracted from the reply text, in detection order.
    pub suggested_actions: Vec<SuggestedAction>,
}

impl AssistResponse {
    /// A plain reply with default signals: unresolved, mid confidence,
    /// no suggested actions.
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_resolved: false,
            confidence: 0.5,
            suggested_actions: Vec::new(),
        }
    }

    /// Whether the reply suggests escalating to a ticket.
    pub fn suggests_ticket(&self) -> bool {
        self.suggested_actions.contains(&SuggestedAction::CreateTicket)
    }
}

/// A completion backend the conversation engine can consult.
///
/// Implementations must uphold the degrade-not-fail policy: transport
/// failures, unparseable output, and an absent credential are all
/// handled internally (typically by a local rule-based responder) and
/// produce `Ok`. An `Err` means a local bug, and the engine treats it
/// by routing to its own knowledge-base fallback; the user never sees
/// an error either way.
#[async_trait]
pub trait AssistBackend: Send + Sync {
    /// Produce the next assistant reply for a user message.
    async fn assist(
        &self,
        user_message: &str,
        transcript: &Transcript,
        ctx: &ConversationContext,
    ) -> Result<AssistResponse, AssistError>;

    /// Analyze the full transcript into a structured ticket draft.
    ///
    /// The default implementation reports the backend as unable to
    /// analyze; backends with a local analyzer override this.
    async fn analyze_for_ticket(
        &self,
        _transcript: &Transcript,
        _ctx: &ConversationContext,
    ) -> Result<TicketDraft, AssistError> {
        Err(AssistError::Unsupported(self.name().to_string()))
    }

    /// Backend name, for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization() {
        let json = serde_json::to_string(&SuggestedAction::CreateTicket).unwrap();
        assert_eq!(json, "\"create_ticket\"");
    }

    #[test]
    fn test_suggests_ticket() {
        let mut response = AssistResponse::plain("contact support");
        assert!(!response.suggests_ticket());
        response.suggested_actions.push(SuggestedAction::CreateTicket);
        assert!(response.suggests_ticket());
    }
}
