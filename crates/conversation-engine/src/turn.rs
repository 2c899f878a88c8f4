//! Turn input and outcome types.

use chat_core::ConversationContext;

/// One unit of user input: free text or a quick-reply click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Free-form typed text.
    Text(String),
    /// A quick-reply option the bot previously offered.
    Option(String),
}

impl UserInput {
    /// Create a free-text input.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an option-click input.
    pub fn option(label: impl Into<String>) -> Self {
        Self::Option(label.into())
    }

    /// The raw text of the input, whichever kind it is.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text(text) | Self::Option(text) => text,
        }
    }
}

/// The bot's reply for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    /// Reply text.
    pub text: String,
    /// Quick-reply options, in display order.
    pub options: Option<Vec<String>>,
}

impl BotReply {
    /// A reply with no options.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: None,
        }
    }

    /// A reply with quick-reply options.
    pub fn with_options(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options: Some(options),
        }
    }
}

/// Everything one turn produced: the reply, the replacement context,
/// and the signals the caller acts on.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The bot's reply.
    pub reply: BotReply,
    /// The new context replacing the previous one.
    pub context: ConversationContext,
    /// Whether this turn resolved the issue.
    pub resolved: bool,
    /// Whether the user confirmed ticket creation this turn; the caller
    /// should run analysis + synthesis + submission.
    pub ticket_requested: bool,
}

impl TurnOutcome {
    pub(crate) fn new(reply: BotReply, context: ConversationContext) -> Self {
        let resolved = context.is_resolved();
        Self {
            reply,
            context,
            resolved,
            ticket_requested: false,
        }
    }
}
