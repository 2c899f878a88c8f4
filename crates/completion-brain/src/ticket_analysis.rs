//! Transcript analysis into a structured ticket draft.
//!
//! The remote path asks the completion endpoint for a JSON analysis;
//! the local path is a pure keyword classifier over the transcript.
//! Both produce the same [`TicketDraft`] shape.

use chat_core::{ConversationContext, Sentiment, TicketDraft, TicketPriority, Transcript, UrgencyLevel};
use serde::Deserialize;

/// Maximum subject length before truncation.
const SUBJECT_TRUNCATE_AT: usize = 50;

/// Keywords that force high priority/urgency, checked first.
const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "critical",
    "emergency",
    "immediately",
    "asap",
    "can't access",
    "not working",
];

/// Milder problem keywords, checked second.
const PROBLEM_KEYWORDS: &[&str] = &["problem", "issue", "error", "failed", "broken", "trouble"];

/// Sentiment keyword tiers; angry outranks frustrated.
const ANGRY_KEYWORDS: &[&str] = &["angry", "unacceptable", "ridiculous", "worst", "hate"];
const FRUSTRATED_KEYWORDS: &[&str] = &["frustrated", "annoying", "slow", "terrible", "horrible"];

/// System prompt for the remote ticket analysis call.
pub fn analysis_prompt(ctx: &ConversationContext) -> String {
    format!(
        r#"You are an expert customer support analyst. Analyze the customer conversation and extract structured ticket information.

ANALYSIS REQUIREMENTS:
1. Create a clear, professional ticket subject (max 60 chars)
2. Write a comprehensive description of the issue
3. Determine the appropriate priority level
4. Categorize the issue type
5. Assess customer sentiment and urgency

PRIORITY LEVELS:
- LOW: general inquiries, feature requests
- MEDIUM: standard issues, account questions
- HIGH: service problems, payment issues
- CRITICAL: account locked, service completely down

SENTIMENT: positive | neutral | frustrated | angry
URGENCY: low | standard | high | urgent

OUTPUT FORMAT:
Respond with a JSON object only:
{{
  "subject": "Brief ticket title",
  "description": "Detailed issue description with context",
  "priority": "LOW|MEDIUM|HIGH|CRITICAL",
  "category": "Category name",
  "suggestedSolution": "Recommended next steps",
  "customerSentiment": "positive|neutral|frustrated|angry",
  "urgencyLevel": "low|standard|high|urgent",
  "tags": ["relevant", "keywords"],
  "confidence": 0.8
}}

Current context: category={}, issue={}, attempts={}"#,
        ctx.category.as_deref().unwrap_or("none"),
        ctx.issue.as_deref().unwrap_or("none"),
        ctx.attempts,
    )
}

/// Format the transcript for the remote analysis call.
pub fn format_transcript(transcript: &Transcript) -> String {
    transcript
        .messages()
        .iter()
        .map(|m| {
            let who = if m.is_user() { "Customer" } else { "Assistant" };
            format!("{}: {}", who, m.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wire shape of the remote analysis JSON, with defaults for every
/// field so a partial answer still yields a usable draft.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAnalysis {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TicketPriority>,
    pub category: Option<String>,
    pub suggested_solution: Option<String>,
    pub customer_sentiment: Option<Sentiment>,
    pub urgency_level: Option<UrgencyLevel>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub confidence: Option<f32>,
}

impl RemoteAnalysis {
    /// Fill defaults and produce a draft.
    pub fn into_draft(self) -> TicketDraft {
        TicketDraft {
            subject: self
                .subject
                .unwrap_or_else(|| "Customer Support Request".to_string()),
            description: self.description.unwrap_or_else(|| {
                "Customer needs assistance based on chat conversation.".to_string()
            }),
            priority: self.priority.unwrap_or(TicketPriority::Medium),
            category: self.category.unwrap_or_else(|| "General Support".to_string()),
            suggested_solution: self.suggested_solution.unwrap_or_default(),
            customer_sentiment: self.customer_sentiment.unwrap_or(Sentiment::Neutral),
            urgency_level: self.urgency_level.unwrap_or(UrgencyLevel::Standard),
            tags: self.tags,
            confidence: self.confidence.unwrap_or(0.7).clamp(0.0, 1.0),
        }
    }
}

/// Rule-based ticket analysis with no network access.
///
/// A pure function of the transcript and context: the same inputs
/// always produce the same draft.
pub fn analyze_local(transcript: &Transcript, ctx: &ConversationContext) -> TicketDraft {
    let user_messages: Vec<&str> = transcript.user_messages().map(|m| m.text.as_str()).collect();
    let first_user_message = user_messages.first().copied().unwrap_or_default();

    let category = ctx
        .category
        .clone()
        .unwrap_or_else(|| "General Support".to_string());

    let all_text = transcript
        .messages()
        .iter()
        .map(|m| m.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    // Urgent keywords outrank problem keywords; both tiers scan the
    // whole transcript, not just the latest message.
    let (mut priority, urgency_level) = if URGENT_KEYWORDS.iter().any(|k| all_text.contains(k)) {
        (TicketPriority::High, UrgencyLevel::High)
    } else if PROBLEM_KEYWORDS.iter().any(|k| all_text.contains(k)) {
        (TicketPriority::Medium, UrgencyLevel::Standard)
    } else {
        (TicketPriority::Low, UrgencyLevel::Low)
    };

    // Angry outranks frustrated; anger also raises the priority.
    let sentiment = if ANGRY_KEYWORDS.iter().any(|k| all_text.contains(k)) {
        priority = TicketPriority::High;
        Sentiment::Angry
    } else if FRUSTRATED_KEYWORDS.iter().any(|k| all_text.contains(k)) {
        Sentiment::Frustrated
    } else {
        Sentiment::Neutral
    };

    let subject = match &ctx.issue {
        Some(issue) => format!("{category}: {issue}"),
        None if first_user_message.len() > SUBJECT_TRUNCATE_AT => {
            let cut = first_user_message
                .char_indices()
                .map(|(i, _)| i)
                .take_while(|&i| i <= SUBJECT_TRUNCATE_AT)
                .last()
                .unwrap_or(0);
            format!("{}...", &first_user_message[..cut])
        }
        None if !first_user_message.is_empty() => first_user_message.to_string(),
        None => "Customer Support Request".to_string(),
    };

    let issue_lines = user_messages
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{}. {}", i + 1, text))
        .collect::<Vec<_>>()
        .join("\n");

    let sentiment_label = match sentiment {
        Sentiment::Positive => "Positive",
        Sentiment::Neutral => "Neutral",
        Sentiment::Frustrated => "Frustrated",
        Sentiment::Angry => "Angry",
    };

    let description = format!(
        "Customer Issue: {category}\n\n\
         Issue Details:\n{issue_lines}\n\n\
         Conversation Summary:\n\
         The customer contacted support regarding {}.{} Previous troubleshooting \
         attempts were made through the chatbot but the issue requires human attention.\n\n\
         Customer Sentiment: {sentiment_label}",
        category.to_lowercase(),
        ctx.issue
            .as_deref()
            .map(|issue| format!(" Specifically about: {issue}."))
            .unwrap_or_default(),
    );

    let mut tags = vec![
        category.to_lowercase().replace(' ', ""),
        sentiment_label.to_lowercase(),
    ];
    tags.dedup();

    TicketDraft {
        subject,
        description,
        priority,
        category: category.clone(),
        suggested_solution: format!(
            "Review the customer's {} issue and provide personalized assistance.",
            category.to_lowercase()
        ),
        customer_sentiment: sentiment,
        urgency_level,
        tags,
        confidence: 0.6,
    }
}
