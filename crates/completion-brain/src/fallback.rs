//! Local rule-based responder used when the completion endpoint is
//! unavailable, unconfigured, or errors.

use chat_core::{AssistResponse, SuggestedAction};
use knowledge_base::KnowledgeBase;

use crate::analysis;

/// Positive phrases in the user's message that mean the issue is solved.
const POSITIVE_PHRASES: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "worked",
    "fixed",
    "solved",
    "resolved",
    "thank you",
    "thanks",
    "it works",
    "working now",
    "that helped",
];

/// Whether the user message reads as a resolution confirmation.
pub fn is_positive(user_message: &str) -> bool {
    let lower = user_message.to_lowercase();
    POSITIVE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Produce a rule-based reply with no network access.
///
/// The suggested actions are derived by running the same phrase-trigger
/// scan over the synthetic reply text, so callers see a response shaped
/// exactly like a remote one.
pub fn respond(user_message: &str, knowledge: &KnowledgeBase) -> AssistResponse {
    if is_positive(user_message) {
        return AssistResponse {
            message: "Excellent! I'm glad I could help resolve your issue. Your issue has \
                      been marked as resolved. Is there anything else I can help you with \
                      today?"
                .to_string(),
            is_resolved: true,
            confidence: 0.9,
            suggested_actions: vec![SuggestedAction::MarkResolved],
        };
    }

    let message = match knowledge.detect_category(user_message) {
        Some("Login Issues") => {
            "I can help with login issues. Try these steps:\n\
             1. Clear your browser cache\n\
             2. Reset your password\n\
             3. Try incognito mode\n\n\
             Did this help resolve your login issue?"
                .to_string()
        }
        Some("Payment Problems") => {
            "For payment issues, please check:\n\
             1. Card details are correct\n\
             2. Sufficient funds available\n\
             3. Card not expired\n\n\
             If the issue persists, I can create a support ticket for you. Did this help?"
                .to_string()
        }
        Some(category) => {
            let question = knowledge
                .category(category)
                .map(|c| c.solution.question.as_str())
                .unwrap_or_default();
            format!("I can help you with {}. {}", category.to_lowercase(), question)
        }
        None => "I understand you need help. Could you please provide more details about \
                 your issue so I can assist you better? You can also choose from the common \
                 issue categories below."
            .to_string(),
    };

    let suggested_actions = analysis::extract_suggested_actions(&message);
    let confidence = analysis::confidence(&message);

    AssistResponse {
        message,
        is_resolved: false,
        confidence,
        suggested_actions,
    }
}
