//! Completion-backed assist brain.

use std::sync::Arc;

use chat_core::{
    async_trait, hash_prompt, AssistBackend, AssistError, AssistResponse, ConversationContext,
    TicketDraft, Transcript,
};
use knowledge_base::KnowledgeBase;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::analysis;
use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::CompletionConfig;
use crate::fallback;
use crate::ticket_analysis;

/// Transcript entries included in the prompt. Older context is
/// deliberately dropped to bound prompt size; the window is fixed,
/// not configurable.
const HISTORY_WINDOW: usize = 10;

/// Base system instruction for assist calls.
const SYSTEM_PROMPT: &str = "\
You are a helpful customer support assistant for a CRM system. Your role is to:

1. Help customers resolve technical issues quickly and efficiently
2. Provide clear, step-by-step solutions
3. Be friendly, professional, and empathetic
4. Identify when an issue is successfully resolved
5. Escalate to human support when necessary

IMPORTANT GUIDELINES:
- Always provide specific, actionable solutions
- Ask clarifying questions when needed
- Confirm when an issue is resolved by saying \"ISSUE_RESOLVED\" at the end
- If you can't solve the issue after 2-3 attempts, suggest creating a support ticket
- Keep responses concise but helpful (under 200 words)";

/// An assist brain that consults a chat-completion endpoint and
/// degrades to a local rule-based responder.
///
/// Degradation is invisible to callers: an absent credential, a
/// transport failure, or unparseable output all produce `Ok` with the
/// fallback responder's reply. The error variants of [`AssistError`]
/// only travel on the internal network path.
pub struct CompletionBrain {
    client: Client,
    config: CompletionConfig,
    knowledge: Arc<KnowledgeBase>,
    prompt_hash: String,
}

impl CompletionBrain {
    /// Create a new brain with the given configuration and knowledge base.
    pub fn new(
        config: CompletionConfig,
        knowledge: Arc<KnowledgeBase>,
    ) -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                AssistError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let prompt_hash = hash_prompt(SYSTEM_PROMPT);
        info!("CompletionBrain system prompt fingerprint: {}", prompt_hash);
        info!(
            "CompletionBrain initialized with model: {}, configured: {}",
            config.model,
            config.is_configured()
        );

        Ok(Self {
            client,
            config,
            knowledge,
            prompt_hash,
        })
    }

    /// Create a brain from environment variables with the built-in
    /// knowledge base. See [`CompletionConfig::from_env`].
    pub fn from_env() -> Result<Self, AssistError> {
        Self::new(
            CompletionConfig::from_env(),
            Arc::new(KnowledgeBase::builtin()),
        )
    }

    /// Get the configuration.
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// The shared knowledge base backing the fallback responder.
    pub fn knowledge(&self) -> Arc<KnowledgeBase> {
        self.knowledge.clone()
    }

    /// Get the system prompt fingerprint.
    pub fn prompt_hash(&self) -> &str {
        &self.prompt_hash
    }

    /// Build the messages array for an assist request: system
    /// instruction + context, the last [`HISTORY_WINDOW`] transcript
    /// entries, then the current user message.
    fn build_messages(
        &self,
        user_text: &str,
        transcript: &Transcript,
        ctx: &ConversationContext,
    ) -> Vec<ChatMessage> {
        let context_block = format!(
            "\n\nCurrent context:\n\
             - Customer issue category: {}\n\
             - Previous attempts: {}\n\
             - Issue type: {}",
            ctx.category.as_deref().unwrap_or("General Support"),
            ctx.attempts,
            ctx.issue.as_deref().unwrap_or("Not specified"),
        );

        let mut messages = vec![ChatMessage::system(format!("{SYSTEM_PROMPT}{context_block}"))];

        for msg in transcript.last_n(HISTORY_WINDOW) {
            messages.push(if msg.is_user() {
                ChatMessage::user(msg.text.clone())
            } else {
                ChatMessage::assistant(msg.text.clone())
            });
        }

        messages.push(ChatMessage::user(user_text));
        messages
    }

    /// Make a chat completion request and return the reply text.
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String, AssistError> {
        if !self.config.is_configured() {
            return Err(AssistError::Disabled);
        }

        let url = format!("{}/v1/chat/completions", self.config.api_url);
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            presence_penalty: Some(0.1),
            frequency_penalty: Some(0.1),
        };

        debug!("Sending request to completion API: {:?}", request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(AssistError::Api {
                    status: status.as_u16(),
                    message: api_error.error.message,
                });
            }

            return Err(AssistError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AssistError::Parse(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| AssistError::Parse("No content in completion response".to_string()))
    }
}

#[async_trait]
impl AssistBackend for CompletionBrain {
    async fn assist(
        &self,
        user_message: &str,
        transcript: &Transcript,
        ctx: &ConversationContext,
    ) -> Result<AssistResponse, AssistError> {
        if !self.config.is_configured() {
            debug!("No credential configured, using local fallback responder");
            return Ok(fallback::respond(user_message, &self.knowledge));
        }

        let messages = self.build_messages(user_message, transcript, ctx);

        match self.chat_completion(messages).await {
            Ok(reply) => {
                let is_resolved = analysis::is_resolved(&reply, user_message);
                let confidence = analysis::confidence(&reply);
                let suggested_actions = analysis::extract_suggested_actions(&reply);

                Ok(AssistResponse {
                    message: reply,
                    is_resolved,
                    confidence,
                    suggested_actions,
                })
            }
            Err(e) => {
                warn!("Completion call failed, degrading to local responder: {}", e);
                Ok(fallback::respond(user_message, &self.knowledge))
            }
        }
    }

    async fn analyze_for_ticket(
        &self,
        transcript: &Transcript,
        ctx: &ConversationContext,
    ) -> Result<TicketDraft, AssistError> {
        if !self.config.is_configured() {
            debug!("No credential configured, using local ticket analyzer");
            return Ok(ticket_analysis::analyze_local(transcript, ctx));
        }

        let messages = vec![
            ChatMessage::system(ticket_analysis::analysis_prompt(ctx)),
            ChatMessage::user(format!(
                "Please analyze this conversation and extract ticket details:\n\n{}",
                ticket_analysis::format_transcript(transcript)
            )),
        ];

        match self.chat_completion(messages).await {
            Ok(reply) => match serde_json::from_str::<ticket_analysis::RemoteAnalysis>(&reply) {
                Ok(remote) => Ok(remote.into_draft()),
                Err(e) => {
                    warn!("Malformed analysis JSON, using local analyzer: {}", e);
                    Ok(ticket_analysis::analyze_local(transcript, ctx))
                }
            },
            Err(e) => {
                warn!("Analysis call failed, using local analyzer: {}", e);
                Ok(ticket_analysis::analyze_local(transcript, ctx))
            }
        }
    }

    fn name(&self) -> &str {
        "CompletionBrain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{Message, SuggestedAction};

    fn unconfigured_brain() -> CompletionBrain {
        CompletionBrain::new(
            CompletionConfig::default(),
            Arc::new(KnowledgeBase::builtin()),
        )
        .unwrap()
    }

    #[test]
    fn test_brain_name() {
        assert_eq!(unconfigured_brain().name(), "CompletionBrain");
    }

    #[test]
    fn test_prompt_fingerprint_is_stable() {
        let a = unconfigured_brain();
        let b = unconfigured_brain();
        assert_eq!(a.prompt_hash(), b.prompt_hash());
    }

    #[test]
    fn test_build_messages_windows_history() {
        let brain = unconfigured_brain();
        let mut transcript = Transcript::new();
        for i in 0..20 {
            transcript.append(Message::user(format!("user {i}")));
        }

        let messages =
            brain.build_messages("latest", &transcript, &ConversationContext::new());

        // system + 10 window entries + current message
        assert_eq!(messages.len(), 12);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].content, "user 10");
        assert_eq!(messages.last().unwrap().content, "latest");
    }

    #[test]
    fn test_system_prompt_carries_context() {
        let brain = unconfigured_brain();
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Payment Problems".to_string());
        ctx.attempts = 2;

        let messages = brain.build_messages("hi", &Transcript::new(), &ctx);
        assert!(messages[0].content.contains("Payment Problems"));
        assert!(messages[0].content.contains("Previous attempts: 2"));
        assert!(messages[0].content.contains("ISSUE_RESOLVED"));
    }

    // No network call is attempted without a credential: the fallback
    // path is synchronous-local, so these complete under the runtime
    // without any outbound request.
    #[tokio::test]
    async fn test_unconfigured_assist_uses_fallback() {
        let brain = unconfigured_brain();
        let response = brain
            .assist("I can't login", &Transcript::new(), &ConversationContext::new())
            .await
            .unwrap();

        assert!(!response.is_resolved);
        assert!(response.suggested_actions.contains(&SuggestedAction::ResetPassword));
    }

    #[tokio::test]
    async fn test_unconfigured_analysis_uses_local_analyzer() {
        let brain = unconfigured_brain();
        let mut transcript = Transcript::new();
        transcript.append(Message::user("urgent: payment broken"));

        let draft = brain
            .analyze_for_ticket(&transcript, &ConversationContext::new())
            .await
            .unwrap();
        assert_eq!(draft.priority, chat_core::TicketPriority::High);
    }
}
