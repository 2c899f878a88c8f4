//! Canned bot lines and the control option labels.
//!
//! Control labels are matched exactly; changing one changes the state
//! machine's surface, so they live here rather than inline.

use chat_core::SuggestedAction;

// Control option labels.
pub const YES_CREATE_TICKET: &str = "Yes, Create Ticket";
pub const NO_CONTINUE_TRYING: &str = "No, Continue Trying";
pub const NO_CONTINUE_CHATTING: &str = "No, Continue Chatting";
pub const START_NEW_ISSUE: &str = "Start New Issue";
pub const YES_ANOTHER_ISSUE: &str = "Yes, another issue";
pub const END_CHAT: &str = "End Chat";
pub const NO_ALL_GOOD: &str = "No, all good";
pub const CREATE_A_TICKET: &str = "Create a ticket";

// Canned bot lines.
pub const GREETING: &str = "Hi! I'm your virtual assistant. I'm here to help you resolve \
                            issues quickly. What can I help you with today?";

pub const CATEGORY_PROMPT: &str = "I understand you need help. Could you please select the \
                                   category that best describes your issue?";

pub const DESCRIBE_PROMPT: &str = "Of course! Please describe the issue you're experiencing \
                                   and I'll do my best to help.";

pub const RESTART_PROMPT: &str = "Of course! What can I help you with now?";

pub const FAREWELL: &str = "Perfect! Thank you for using our support chat. Have a great day!";

pub const TICKET_OFFER: &str = "Would you like me to create a support ticket for you?";

pub const ESCALATION_OFFER: &str = "I understand this issue requires further assistance. Let \
                                    me help you create a support ticket for personalized help.";

pub const DIDNT_RESOLVE: &str = "I understand this didn't resolve your issue. Let me try a \
                                 different approach or connect you with human support.";

pub const PREPARING_TICKET: &str = "I understand you'd like to create a ticket. Let me \
                                    analyze our conversation and prepare one for you...";

pub const CELEBRATION: &str = "Excellent! I'm happy I could help resolve your issue. Your \
                               issue has been marked as resolved. Is there anything else I \
                               can assist you with?";

pub const AI_RESOLVED_BANNER: &str = "ISSUE RESOLVED! Your issue has been successfully \
                                      resolved and marked in our system. Thank you for using \
                                      our support chat!";

pub const CLARIFY_PROMPT: &str = "I want to make sure I provide the best help. Could you \
                                  clarify what you need assistance with?";

/// Free-text phrases that mean "create a ticket / get me a human".
const TICKET_REQUEST_PHRASES: &[&str] = &[
    "create ticket",
    "create a ticket",
    "make ticket",
    "make a ticket",
    "submit ticket",
    "file ticket",
    "open ticket",
    "raise ticket",
    "need ticket",
    "want ticket",
    "ticket please",
    "escalate",
    "speak to human",
    "talk to human",
    "human help",
    "representative",
];

/// Phrases that read as a resolution confirmation.
const POSITIVE_PHRASES: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "solved",
    "worked",
    "fixed",
    "resolved",
    "good",
    "great",
    "perfect",
    "thanks",
    "thank you",
    "success",
];

/// Phrases that read as "that didn't help".
const NEGATIVE_PHRASES: &[&str] = &[
    "no",
    "nope",
    "still",
    "not working",
    "didn't work",
    "failed",
    "issue",
    "problem",
    "help",
    "stuck",
];

/// Whether free text is an explicit ticket/human request.
pub fn is_ticket_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    TICKET_REQUEST_PHRASES.iter().any(|p| lower.contains(p))
}

/// Whether an option label asks for a ticket without being the exact
/// confirmation label (scripted leaves like "Yes, create refund ticket").
pub fn mentions_ticket_creation(label: &str) -> bool {
    let lower = label.to_lowercase();
    lower.contains("ticket") && (lower.contains("create") || lower.contains("submit"))
}

/// Whether the text confirms resolution.
pub fn is_positive(text: &str) -> bool {
    let lower = text.to_lowercase();
    POSITIVE_PHRASES.iter().any(|p| lower.contains(p))
}

/// Whether the text signals the problem persists.
pub fn is_negative(text: &str) -> bool {
    let lower = text.to_lowercase();
    NEGATIVE_PHRASES.iter().any(|p| lower.contains(p))
}

/// Options offered alongside a ticket-creation proposal.
pub fn escalation_options() -> Vec<String> {
    vec![YES_CREATE_TICKET.to_string(), NO_CONTINUE_TRYING.to_string()]
}

/// Options offered after an assistant-detected resolution.
pub fn ai_resolution_options() -> Vec<String> {
    vec![START_NEW_ISSUE.to_string(), END_CHAT.to_string()]
}

/// Options offered after a user-confirmed resolution.
pub fn post_resolution_options() -> Vec<String> {
    vec![YES_ANOTHER_ISSUE.to_string(), NO_ALL_GOOD.to_string()]
}

/// Default follow-up options when the assistant had nothing specific
/// to suggest.
pub fn default_followup_options() -> Vec<String> {
    vec![
        "Yes, that helped!".to_string(),
        "No, still having issues".to_string(),
        "Try something else".to_string(),
    ]
}

/// Options offered with an alternative solution.
pub fn alternative_options() -> Vec<String> {
    vec![
        "That worked!".to_string(),
        "Still having issues".to_string(),
        CREATE_A_TICKET.to_string(),
    ]
}

/// Turn suggested actions into quick-reply options, with the generic
/// follow-ups appended and duplicates removed in first-seen order.
pub fn options_from_actions(actions: &[SuggestedAction]) -> Vec<String> {
    let mut options: Vec<String> = actions.iter().map(|a| a.label().to_string()).collect();
    options.push("That helped!".to_string());
    options.push("Still not working".to_string());
    options.push("Try different approach".to_string());

    let mut seen = Vec::new();
    for option in options {
        if !seen.contains(&option) {
            seen.push(option);
        }
    }
    seen
}
