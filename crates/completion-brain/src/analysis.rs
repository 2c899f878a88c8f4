//! Lexical analysis of replies: resolution signals, confidence, actions.

use chat_core::SuggestedAction;

/// Explicit marker the system prompt asks the model to emit on resolution.
pub const RESOLUTION_MARKER: &str = "ISSUE_RESOLVED";

/// Phrases in the model's own output that signal resolution.
const MODEL_RESOLUTION_PHRASES: &[&str] = &[
    "issue_resolved",
    "problem solved",
    "issue resolved",
    "working now",
    "fixed",
    "solved",
    "success",
];

/// Phrases in the user's message that confirm resolution.
const USER_POSITIVE_PHRASES: &[&str] = &[
    "thank you",
    "thanks",
    "it works",
    "working now",
    "fixed",
    "solved",
    "yes, it worked",
    "that helped",
    "problem solved",
];

/// Derive the resolved flag from a reply/user-message pair.
///
/// Either signal alone is sufficient: an explicit marker (or resolution
/// phrase) in the model output, or a positive-sentiment phrase in the
/// user's message.
pub fn is_resolved(reply: &str, user_message: &str) -> bool {
    let reply = reply.to_lowercase();
    let user = user_message.to_lowercase();

    let model_resolved = MODEL_RESOLUTION_PHRASES
        .iter()
        .any(|phrase| reply.contains(phrase));
    let user_confirmed = USER_POSITIVE_PHRASES
        .iter()
        .any(|phrase| user.contains(phrase));

    model_resolved || user_confirmed
}

/// Heuristic confidence in a reply, derived from its own phrasing.
///
/// Step-by-step and directive language raises the score; hedging lowers
/// it. The result is clamped to [0, 1]. This is an approximation of
/// reply quality, not a calibrated probability — there is no ground
/// truth to calibrate against.
pub fn confidence(reply: &str) -> f32 {
    let reply = reply.to_lowercase();
    let mut confidence: f32 = 0.5;

    if reply.contains("step") || reply.contains("follow") {
        confidence += 0.2;
    }
    if reply.contains("try") || reply.contains("check") {
        confidence += 0.1;
    }
    if reply.contains("should") || reply.contains("will") {
        confidence += 0.1;
    }

    if reply.contains("might") || reply.contains("maybe") {
        confidence -= 0.1;
    }
    if reply.contains("not sure") || reply.contains("unclear") {
        confidence -= 0.2;
    }

    confidence.clamp(0.0, 1.0)
}

/// Extract suggested actions from a reply by fixed phrase triggers.
pub fn extract_suggested_actions(reply: &str) -> Vec<SuggestedAction> {
    let reply = reply.to_lowercase();
    let mut actions = Vec::new();

    if reply.contains("refresh") || reply.contains("reload") {
        actions.push(SuggestedAction::RefreshPage);
    }
    if reply.contains("clear cache") || reply.contains("clear browser") || reply.contains("clear your browser cache") {
        actions.push(SuggestedAction::ClearCache);
    }
    if reply.contains("reset password") || reply.contains("forgot password") || reply.contains("reset your password") {
        actions.push(SuggestedAction::ResetPassword);
    }
    if reply.contains("contact support") || reply.contains("create ticket") || reply.contains("create a ticket") || reply.contains("support ticket") {
        actions.push(SuggestedAction::CreateTicket);
    }
    if reply.contains("try again") || reply.contains("retry") {
        actions.push(SuggestedAction::Retry);
    }

    actions
}
