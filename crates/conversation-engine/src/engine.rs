//! The conversation engine: one turn in, one reply and context out.

use std::sync::Arc;

use chat_core::{
    AssistBackend, AssistResponse, ConversationContext, Message, Phase, ResolutionMethod,
    Transcript,
};
use knowledge_base::{KnowledgeBase, OTHER_ISSUE};
use tracing::{debug, warn};

use crate::script;
use crate::turn::{BotReply, TurnOutcome, UserInput};

/// Bot turns without resolution before escalation is forced. A hard
/// ceiling, independent of the completion backend's opinion.
const MAX_ATTEMPTS: u32 = 3;

/// Decides the next bot message and context for each user turn.
///
/// The engine consults the completion backend and pattern-matches the
/// result: `Ok` replies are interpreted for resolution and escalation
/// signals, `Err` routes to the knowledge-base fallback. Either way the
/// user gets an answer; backend failures are logged, never surfaced.
///
/// Generic over the backend, so tests can drive the state machine with
/// scripted or failing doubles.
pub struct ConversationEngine<B: AssistBackend> {
    knowledge: Arc<KnowledgeBase>,
    brain: B,
}

impl<B: AssistBackend> ConversationEngine<B> {
    /// Create an engine over a shared knowledge base and a backend.
    pub fn new(knowledge: Arc<KnowledgeBase>, brain: B) -> Self {
        Self { knowledge, brain }
    }

    /// The shared knowledge base.
    pub fn knowledge(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge
    }

    /// The completion backend.
    pub fn brain(&self) -> &B {
        &self.brain
    }

    /// The opening bot message for a fresh session: greeting plus the
    /// category menu.
    pub fn greeting(&self) -> Message {
        Message::bot_with_options(script::GREETING, self.knowledge.menu_options())
    }

    /// Process one user turn against the current context and transcript,
    /// producing the reply and the replacement context.
    ///
    /// The context is taken by reference and never mutated; the outcome
    /// carries the new one.
    pub async fn next_turn(
        &self,
        input: &UserInput,
        ctx: &ConversationContext,
        transcript: &Transcript,
    ) -> TurnOutcome {
        match input {
            UserInput::Text(text) => self.process_text(text, ctx, transcript).await,
            UserInput::Option(label) => self.process_option(label, ctx, transcript).await,
        }
    }

    async fn process_text(
        &self,
        text: &str,
        ctx: &ConversationContext,
        transcript: &Transcript,
    ) -> TurnOutcome {
        // Typing into a finished conversation restarts the issue; the
        // transcript is the session's and stays.
        let mut next = if ctx.is_terminal() {
            ConversationContext::new()
        } else {
            ctx.clone()
        };
        next.attempts += 1;

        if script::is_ticket_request(text) {
            debug!("Explicit ticket request detected in free text");
            next.phase = Phase::EscalationPending;
            let text = format!("{}\n\n{}", script::ESCALATION_OFFER, script::TICKET_OFFER);
            return TurnOutcome::new(
                BotReply::with_options(text, script::escalation_options()),
                next,
            );
        }

        if next.category.is_none() {
            if let Some(reply) = self.try_detect_category(text, &mut next) {
                return self.finish(reply, next);
            }

            // Nothing detected: the backend gets the first word, the
            // category menu is the degraded answer.
            return match self.brain.assist(text, transcript, ctx).await {
                Ok(response) => self.finish_assist(response, next),
                Err(e) => {
                    warn!("Assist backend failed, prompting for category: {}", e);
                    next.phase = Phase::CategorySelection;
                    self.finish(
                        BotReply::with_options(
                            script::CATEGORY_PROMPT,
                            self.knowledge.menu_options(),
                        ),
                        next,
                    )
                }
            };
        }

        // Category known: backend first, scripted follow-up on failure.
        match self.brain.assist(text, transcript, ctx).await {
            Ok(response) => self.finish_assist(response, next),
            Err(e) => {
                warn!("Assist backend failed, using scripted follow-up: {}", e);
                if script::is_positive(text) {
                    let next = next.resolved(ResolutionMethod::UserConfirmation);
                    TurnOutcome::new(
                        BotReply::with_options(
                            script::CELEBRATION,
                            script::post_resolution_options(),
                        ),
                        next,
                    )
                } else {
                    next.phase = Phase::EscalationPending;
                    let text =
                        format!("{}\n\n{}", script::DIDNT_RESOLVE, script::TICKET_OFFER);
                    TurnOutcome::new(
                        BotReply::with_options(text, script::escalation_options()),
                        next,
                    )
                }
            }
        }
    }

    async fn process_option(
        &self,
        label: &str,
        ctx: &ConversationContext,
        transcript: &Transcript,
    ) -> TurnOutcome {
        let mut next = ctx.clone();
        next.attempts += 1;

        // Restart: fresh context, transcript untouched.
        if label == script::YES_ANOTHER_ISSUE || label == script::START_NEW_ISSUE {
            let mut fresh = ConversationContext::new();
            fresh.phase = Phase::CategorySelection;
            return TurnOutcome::new(
                BotReply::with_options(script::RESTART_PROMPT, self.knowledge.menu_options()),
                fresh,
            );
        }

        if label == script::NO_ALL_GOOD || label == script::END_CHAT {
            next.phase = Phase::Ended;
            return TurnOutcome::new(BotReply::text_only(script::FAREWELL), next);
        }

        if label == script::YES_CREATE_TICKET {
            next.phase = Phase::TicketDrafted;
            let mut outcome =
                TurnOutcome::new(BotReply::text_only(script::PREPARING_TICKET), next);
            outcome.ticket_requested = true;
            return outcome;
        }

        // Declining the ticket returns to where the conversation was;
        // attempts restart so the ceiling doesn't re-fire immediately.
        if label == script::NO_CONTINUE_TRYING || label == script::NO_CONTINUE_CHATTING {
            next.attempts = 0;
            return if let Some(category) = next.category.clone() {
                next.phase = Phase::IssueSelection;
                let reply = self
                    .knowledge
                    .category(&category)
                    .map(|c| {
                        BotReply::with_options(
                            c.solution.question.clone(),
                            c.solution.options.clone(),
                        )
                    })
                    .unwrap_or_else(|| {
                        BotReply::with_options(
                            script::RESTART_PROMPT,
                            self.knowledge.menu_options(),
                        )
                    });
                TurnOutcome::new(reply, next)
            } else {
                next.phase = Phase::CategorySelection;
                TurnOutcome::new(
                    BotReply::with_options(
                        script::RESTART_PROMPT,
                        self.knowledge.menu_options(),
                    ),
                    next,
                )
            };
        }

        // Scripted branch within the current category.
        if let Some(category) = &next.category {
            if let Some(branch) = self.knowledge.branch(category, label) {
                next.issue = Some(label.to_string());
                next.phase = Phase::IssueSelection;
                return self.finish(
                    BotReply {
                        text: branch.message.clone(),
                        options: branch.options.clone(),
                    },
                    next,
                );
            }
        }

        // Category selection from the menu.
        if self.knowledge.contains(label) {
            next.category = Some(label.to_string());
            let mut reply = BotReply::text_only(script::DESCRIBE_PROMPT);
            if let Some(category) = self.knowledge.category(label) {
                reply = BotReply::with_options(
                    category.solution.question.clone(),
                    category.solution.options.clone(),
                );
            }
            next.phase = Phase::IssueSelection;
            return self.finish(reply, next);
        }

        if label == OTHER_ISSUE {
            next.phase = Phase::CategorySelection;
            return self.finish(BotReply::text_only(script::DESCRIBE_PROMPT), next);
        }

        // Scripted leaves like "Yes, create refund ticket" propose a
        // ticket without being the exact confirmation label.
        if label == script::CREATE_A_TICKET || script::mentions_ticket_creation(label) {
            next.phase = Phase::EscalationPending;
            let text = format!("{}\n\n{}", script::ESCALATION_OFFER, script::TICKET_OFFER);
            return TurnOutcome::new(
                BotReply::with_options(text, script::escalation_options()),
                next,
            );
        }

        if script::is_positive(label) {
            let next = next.resolved(ResolutionMethod::UserConfirmation);
            return TurnOutcome::new(
                BotReply::with_options(script::CELEBRATION, script::post_resolution_options()),
                next,
            );
        }

        if script::is_negative(label) {
            return self.alternative_solution(next, ctx, transcript).await;
        }

        // Unrecognized option: ask again with the full menu.
        next.phase = if next.category.is_some() {
            Phase::IssueSelection
        } else {
            Phase::CategorySelection
        };
        let mut options = self.knowledge.menu_options();
        options.push(script::CREATE_A_TICKET.to_string());
        self.finish(BotReply::with_options(script::CLARIFY_PROMPT, options), next)
    }

    /// The previous suggestion didn't help: ask the backend for an
    /// alternative, escalate if it can't answer.
    ///
    /// The prompt must not echo raw option labels; a label like
    /// "Yes, forgot password" would read as a positive confirmation to
    /// the fallback responder.
    async fn alternative_solution(
        &self,
        mut next: ConversationContext,
        ctx: &ConversationContext,
        transcript: &Transcript,
    ) -> TurnOutcome {
        let prompt = format!(
            "The previous solution didn't help the customer. Issue category: {}. \
             Please provide an alternative solution.",
            ctx.category.as_deref().unwrap_or("General Support"),
        );

        match self.brain.assist(&prompt, transcript, ctx).await {
            Ok(response) => {
                if response.suggests_ticket() {
                    next.phase = Phase::EscalationPending;
                    let text = format!("{}\n\n{}", response.message, script::TICKET_OFFER);
                    return TurnOutcome::new(
                        BotReply::with_options(text, script::escalation_options()),
                        next,
                    );
                }
                next.phase = if next.category.is_some() {
                    Phase::IssueSelection
                } else {
                    Phase::CategorySelection
                };
                self.finish(
                    BotReply::with_options(response.message, script::alternative_options()),
                    next,
                )
            }
            Err(e) => {
                warn!("Alternative-solution call failed, escalating: {}", e);
                next.phase = Phase::EscalationPending;
                let text = format!("{}\n\n{}", script::DIDNT_RESOLVE, script::TICKET_OFFER);
                TurnOutcome::new(
                    BotReply::with_options(text, script::escalation_options()),
                    next,
                )
            }
        }
    }

    /// Keyword category detection; first hit in knowledge-base order
    /// wins, which makes the outcome deterministic and order-dependent.
    fn try_detect_category(
        &self,
        text: &str,
        next: &mut ConversationContext,
    ) -> Option<BotReply> {
        let name = self.knowledge.detect_category(text)?;
        let category = self.knowledge.category(name)?;

        debug!("Detected category {:?} from free text", name);
        next.category = Some(name.to_string());
        next.phase = Phase::IssueSelection;

        Some(BotReply::with_options(
            format!(
                "I can help you with {}! {}",
                name.to_lowercase(),
                category.solution.question
            ),
            category.solution.options.clone(),
        ))
    }

    /// Interpret a successful backend reply: resolution and escalation
    /// signals first, then a regular reply with derived options.
    fn finish_assist(&self, response: AssistResponse, mut next: ConversationContext) -> TurnOutcome {
        if response.is_resolved {
            let next = next.resolved(ResolutionMethod::AiAssistant);
            let text = format!("{}\n\n{}", response.message, script::AI_RESOLVED_BANNER);
            return TurnOutcome::new(
                BotReply::with_options(text, script::ai_resolution_options()),
                next,
            );
        }

        if response.suggests_ticket() {
            next.phase = Phase::EscalationPending;
            let text = format!("{}\n\n{}", response.message, script::TICKET_OFFER);
            return TurnOutcome::new(
                BotReply::with_options(text, script::escalation_options()),
                next,
            );
        }

        next.phase = if next.category.is_some() {
            Phase::IssueSelection
        } else {
            Phase::CategorySelection
        };

        // With no category and nothing concrete suggested, the menu is
        // more useful than generic follow-ups.
        let options = if !response.suggested_actions.is_empty() {
            script::options_from_actions(&response.suggested_actions)
        } else if next.category.is_none() {
            self.knowledge.menu_options()
        } else {
            script::default_followup_options()
        };

        self.finish(BotReply::with_options(response.message, options), next)
    }

    /// Apply the attempts ceiling before handing the outcome back:
    /// three bot turns without resolution force the ticket offer, no
    /// matter what produced the reply.
    fn finish(&self, mut reply: BotReply, mut next: ConversationContext) -> TurnOutcome {
        let escalatable = !matches!(
            next.phase,
            Phase::Resolved { .. } | Phase::Ended | Phase::EscalationPending | Phase::TicketDrafted
        );
        if escalatable && next.attempts >= MAX_ATTEMPTS {
            debug!(
                "Attempts ceiling reached ({}), forcing escalation",
                next.attempts
            );
            next.phase = Phase::EscalationPending;
            reply.text.push_str("\n\n");
            reply.text.push_str(script::TICKET_OFFER);
            reply.options = Some(script::escalation_options());
        }
        TurnOutcome::new(reply, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{async_trait, AssistError, SuggestedAction, TicketDraft};

    /// Backend that always returns a fixed response.
    struct ScriptedBackend(AssistResponse);

    #[async_trait]
    impl AssistBackend for ScriptedBackend {
        async fn assist(
            &self,
            _user_message: &str,
            _transcript: &Transcript,
            _ctx: &ConversationContext,
        ) -> Result<AssistResponse, AssistError> {
            Ok(self.0.clone())
        }

        fn name(&self) -> &str {
            "ScriptedBackend"
        }
    }

    /// Backend that always fails, driving the knowledge-base fallback.
    struct FailingBackend;

    #[async_trait]
    impl AssistBackend for FailingBackend {
        async fn assist(
            &self,
            _user_message: &str,
            _transcript: &Transcript,
            _ctx: &ConversationContext,
        ) -> Result<AssistResponse, AssistError> {
            Err(AssistError::Network("connection refused".to_string()))
        }

        async fn analyze_for_ticket(
            &self,
            _transcript: &Transcript,
            _ctx: &ConversationContext,
        ) -> Result<TicketDraft, AssistError> {
            Err(AssistError::Network("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "FailingBackend"
        }
    }

    fn engine_with<B: AssistBackend>(brain: B) -> ConversationEngine<B> {
        ConversationEngine::new(Arc::new(KnowledgeBase::builtin()), brain)
    }

    #[tokio::test]
    async fn test_forgot_password_detects_login_issues() {
        let engine = engine_with(FailingBackend);
        let outcome = engine
            .next_turn(
                &UserInput::text("I forgot my password"),
                &ConversationContext::new(),
                &Transcript::new(),
            )
            .await;

        assert_eq!(outcome.context.category.as_deref(), Some("Login Issues"));
        assert!(outcome
            .reply
            .text
            .contains("Are you having trouble with your password?"));
        assert_eq!(
            outcome.reply.options.as_ref().unwrap(),
            &vec![
                "Yes, forgot password".to_string(),
                "Yes, password not working".to_string(),
                "No, other login issue".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_detection_ignores_backend_entirely() {
        // Same input, healthy backend: detection still wins for the
        // first uncategorized message.
        let engine = engine_with(ScriptedBackend(AssistResponse::plain("model answer")));
        let outcome = engine
            .next_turn(
                &UserInput::text("I forgot my password"),
                &ConversationContext::new(),
                &Transcript::new(),
            )
            .await;
        assert_eq!(outcome.context.category.as_deref(), Some("Login Issues"));
        assert!(!outcome.reply.text.contains("model answer"));
    }

    #[tokio::test]
    async fn test_attempts_increment_once_per_turn() {
        let engine = engine_with(FailingBackend);
        let ctx = ConversationContext::new();
        let transcript = Transcript::new();

        let first = engine
            .next_turn(&UserInput::text("I forgot my password"), &ctx, &transcript)
            .await;
        assert_eq!(first.context.attempts, 1);

        let second = engine
            .next_turn(
                &UserInput::option("Yes, forgot password"),
                &first.context,
                &transcript,
            )
            .await;
        assert_eq!(second.context.attempts, 2);
    }

    #[tokio::test]
    async fn test_unknown_topic_with_failed_backend_prompts_for_category() {
        let engine = engine_with(FailingBackend);
        let outcome = engine
            .next_turn(
                &UserInput::text("xyzzy"),
                &ConversationContext::new(),
                &Transcript::new(),
            )
            .await;

        assert!(outcome.context.category.is_none());
        assert_eq!(outcome.context.phase, Phase::CategorySelection);
        let options = outcome.reply.options.unwrap();
        assert_eq!(options.len(), 5);
        assert_eq!(options.last().map(String::as_str), Some("Other Issue"));
    }

    #[tokio::test]
    async fn test_user_confirmation_resolves() {
        let engine = engine_with(FailingBackend);
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Login Issues".to_string());
        ctx.issue = Some("Yes, password not working".to_string());
        ctx.phase = Phase::IssueSelection;

        let outcome = engine
            .next_turn(&UserInput::option("Yes, it worked!"), &ctx, &Transcript::new())
            .await;

        assert!(outcome.resolved);
        assert!(outcome.context.is_resolved());
        assert_eq!(
            outcome.context.resolution_method(),
            Some(ResolutionMethod::UserConfirmation)
        );
        assert!(outcome.reply.text.contains("Excellent"));
        assert_eq!(
            outcome.reply.options.as_ref().unwrap(),
            &vec!["Yes, another issue".to_string(), "No, all good".to_string()]
        );
    }

    #[tokio::test]
    async fn test_backend_resolution_is_terminal() {
        let engine = engine_with(ScriptedBackend(AssistResponse {
            message: "Glad that sorted it. ISSUE_RESOLVED".to_string(),
            is_resolved: true,
            confidence: 0.8,
            suggested_actions: vec![],
        }));
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Technical Support".to_string());
        ctx.phase = Phase::IssueSelection;

        let outcome = engine
            .next_turn(&UserInput::text("it loads now"), &ctx, &Transcript::new())
            .await;

        assert!(outcome.resolved);
        assert_eq!(
            outcome.context.resolution_method(),
            Some(ResolutionMethod::AiAssistant)
        );
        assert_eq!(
            outcome.reply.options.as_ref().unwrap(),
            &vec!["Start New Issue".to_string(), "End Chat".to_string()]
        );
    }

    #[tokio::test]
    async fn test_backend_ticket_suggestion_sets_escalation() {
        let engine = engine_with(ScriptedBackend(AssistResponse {
            message: "This needs a specialist; I suggest we contact support.".to_string(),
            is_resolved: false,
            confidence: 0.4,
            suggested_actions: vec![SuggestedAction::CreateTicket],
        }));
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Payment Problems".to_string());
        ctx.phase = Phase::IssueSelection;

        let outcome = engine
            .next_turn(&UserInput::text("refund still missing"), &ctx, &Transcript::new())
            .await;

        assert!(outcome.context.escalation_ready());
        assert!(outcome.reply.text.contains("support ticket"));
        assert_eq!(
            outcome.reply.options.as_ref().unwrap(),
            &vec![
                "Yes, Create Ticket".to_string(),
                "No, Continue Trying".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_three_turns_force_escalation() {
        let engine = engine_with(FailingBackend);
        let transcript = Transcript::new();

        let first = engine
            .next_turn(
                &UserInput::text("my payment failed"),
                &ConversationContext::new(),
                &transcript,
            )
            .await;
        assert!(!first.context.escalation_ready());

        let second = engine
            .next_turn(&UserInput::option("Payment failed"), &first.context, &transcript)
            .await;
        assert!(!second.context.escalation_ready());

        let third = engine
            .next_turn(
                &UserInput::option("No, still failing"),
                &second.context,
                &transcript,
            )
            .await;
        assert_eq!(third.context.attempts, 3);
        assert!(third.context.escalation_ready());
        assert!(third.reply.text.contains("support ticket"));
    }

    #[tokio::test]
    async fn test_ceiling_fires_even_when_backend_is_content() {
        // The backend never suggests a ticket; the ceiling escalates anyway.
        let engine = engine_with(ScriptedBackend(AssistResponse::plain(
            "Have you tried turning it off and on?",
        )));
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Technical Support".to_string());
        ctx.phase = Phase::IssueSelection;
        ctx.attempts = 2;

        let outcome = engine
            .next_turn(&UserInput::text("that did nothing"), &ctx, &Transcript::new())
            .await;

        assert_eq!(outcome.context.attempts, 3);
        assert!(outcome.context.escalation_ready());
        assert!(outcome.reply.text.contains("support ticket"));
    }

    #[tokio::test]
    async fn test_scripted_branch_sets_issue() {
        let engine = engine_with(FailingBackend);
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Login Issues".to_string());
        ctx.phase = Phase::IssueSelection;

        let outcome = engine
            .next_turn(
                &UserInput::option("Yes, forgot password"),
                &ctx,
                &Transcript::new(),
            )
            .await;

        assert_eq!(outcome.context.issue.as_deref(), Some("Yes, forgot password"));
        assert!(outcome.reply.text.contains("Forgot Password"));
        assert_eq!(
            outcome.reply.options.as_ref().unwrap(),
            &vec![
                "Yes, problem solved!".to_string(),
                "No, still having issues".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_explicit_ticket_request_in_free_text() {
        let engine = engine_with(ScriptedBackend(AssistResponse::plain("unused")));
        let outcome = engine
            .next_turn(
                &UserInput::text("I need to speak to human support now"),
                &ConversationContext::new(),
                &Transcript::new(),
            )
            .await;

        assert!(outcome.context.escalation_ready());
        assert!(!outcome.ticket_requested);
    }

    #[tokio::test]
    async fn test_ticket_confirmation_drafts() {
        let engine = engine_with(FailingBackend);
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Payment Problems".to_string());
        ctx.phase = Phase::EscalationPending;

        let outcome = engine
            .next_turn(&UserInput::option("Yes, Create Ticket"), &ctx, &Transcript::new())
            .await;

        assert_eq!(outcome.context.phase, Phase::TicketDrafted);
        assert!(outcome.ticket_requested);
    }

    #[tokio::test]
    async fn test_decline_returns_to_issue_selection_with_category() {
        let engine = engine_with(FailingBackend);
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Login Issues".to_string());
        ctx.attempts = 3;
        ctx.phase = Phase::EscalationPending;

        let outcome = engine
            .next_turn(
                &UserInput::option("No, Continue Trying"),
                &ctx,
                &Transcript::new(),
            )
            .await;

        assert_eq!(outcome.context.phase, Phase::IssueSelection);
        assert_eq!(outcome.context.attempts, 0);
        assert!(outcome
            .reply
            .text
            .contains("Are you having trouble with your password?"));
    }

    #[tokio::test]
    async fn test_decline_without_category_returns_to_menu() {
        let engine = engine_with(FailingBackend);
        let mut ctx = ConversationContext::new();
        ctx.phase = Phase::EscalationPending;

        let outcome = engine
            .next_turn(
                &UserInput::option("No, Continue Trying"),
                &ctx,
                &Transcript::new(),
            )
            .await;

        assert_eq!(outcome.context.phase, Phase::CategorySelection);
        assert_eq!(outcome.reply.options.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_restart_resets_context_only() {
        let engine = engine_with(FailingBackend);
        let ctx = ConversationContext::new().resolved(ResolutionMethod::UserConfirmation);

        let outcome = engine
            .next_turn(&UserInput::option("Yes, another issue"), &ctx, &Transcript::new())
            .await;

        assert_eq!(outcome.context, {
            let mut fresh = ConversationContext::new();
            fresh.phase = Phase::CategorySelection;
            fresh
        });
    }

    #[tokio::test]
    async fn test_text_after_resolution_starts_fresh() {
        let engine = engine_with(FailingBackend);
        let ctx = ConversationContext::new().resolved(ResolutionMethod::AiAssistant);

        let outcome = engine
            .next_turn(
                &UserInput::text("now my invoice looks wrong"),
                &ctx,
                &Transcript::new(),
            )
            .await;

        assert_eq!(outcome.context.category.as_deref(), Some("Payment Problems"));
        assert_eq!(outcome.context.attempts, 1);
        assert!(!outcome.context.is_resolved());
    }

    #[tokio::test]
    async fn test_end_chat_is_terminal() {
        let engine = engine_with(FailingBackend);
        let outcome = engine
            .next_turn(
                &UserInput::option("End Chat"),
                &ConversationContext::new(),
                &Transcript::new(),
            )
            .await;

        assert_eq!(outcome.context.phase, Phase::Ended);
        assert!(outcome.reply.options.is_none());
    }

    #[tokio::test]
    async fn test_scripted_ticket_leaf_escalates() {
        let engine = engine_with(FailingBackend);
        let mut ctx = ConversationContext::new();
        ctx.category = Some("Payment Problems".to_string());
        ctx.issue = Some("Refund request".to_string());
        ctx.phase = Phase::IssueSelection;

        let outcome = engine
            .next_turn(
                &UserInput::option("Yes, create refund ticket"),
                &ctx,
                &Transcript::new(),
            )
            .await;

        assert!(outcome.context.escalation_ready());
    }
}
