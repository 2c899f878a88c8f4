//! Per-session conversation state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a conversation reached its resolved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// The assistant detected a resolution signal in the exchange.
    AiAssistant,
    /// The user explicitly confirmed the issue was solved.
    UserConfirmation,
}

/// Where the conversation currently stands.
///
/// The phase is a tagged union rather than a set of booleans so that
/// contradictory states (resolved while escalation is pending, for
/// example) cannot be constructed. `Resolved` and `Ended` are terminal
/// for the session instance; a restart replaces the whole context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Session opened, nothing exchanged yet.
    Start,
    /// Waiting for the user to pick or reveal an issue category.
    CategorySelection,
    /// Category known, walking the scripted tree or free-form help.
    IssueSelection,
    /// The bot has offered to create a ticket and awaits confirmation.
    EscalationPending,
    /// The issue was resolved. Terminal.
    Resolved {
        /// When resolution happened.
        resolved_at: DateTime<Utc>,
        /// How resolution happened.
        method: ResolutionMethod,
    },
    /// The user confirmed ticket creation; a draft is being prepared.
    TicketDrafted,
    /// The user ended the chat. Terminal.
    Ended,
}

/// Mutable state threaded through every turn of one session.
///
/// A context is replaced, never mutated in place: each turn takes the
/// previous context by reference and produces a fresh one, which keeps
/// turn history reproducible in tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Detected or selected issue category, a knowledge-base key.
    pub category: Option<String>,
    /// Chosen sub-topic within the category.
    pub issue: Option<String>,
    /// Number of bot turns taken so far.
    pub attempts: u32,
    /// Current conversation phase.
    pub phase: Phase,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationContext {
    /// The initial context for a fresh session or a restarted issue.
    pub fn new() -> Self {
        Self {
            category: None,
            issue: None,
            attempts: 0,
            phase: Phase::Start,
        }
    }

    /// Whether the conversation reached a resolved terminal state.
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Resolved { .. })
    }

    /// Whether the bot is waiting on a ticket-creation decision.
    pub fn escalation_ready(&self) -> bool {
        matches!(self.phase, Phase::EscalationPending)
    }

    /// Whether the phase is terminal for this session instance.
    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Resolved { .. } | Phase::Ended)
    }

    /// When the conversation was resolved, if it was.
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            Phase::Resolved { resolved_at, .. } => Some(resolved_at),
            _ => None,
        }
    }

    /// How the conversation was resolved, if it was.
    pub fn resolution_method(&self) -> Option<ResolutionMethod> {
        match self.phase {
            Phase::Resolved { method, .. } => Some(method),
            _ => None,
        }
    }

    /// Transition into the resolved terminal state.
    pub fn resolved(mut self, method: ResolutionMethod) -> Self {
        self.phase = Phase::Resolved {
            resolved_at: Utc::now(),
            method,
        };
        self
    }
}
