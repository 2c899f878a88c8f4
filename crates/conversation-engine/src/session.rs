//! One chat session: transcript, context, and turn sequencing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chat_core::{
    AssistBackend, AssistError, ConversationContext, Message, Phase, TicketDraft, Transcript,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::engine::ConversationEngine;
use crate::error::EngineError;
use crate::turn::UserInput;

/// What one accepted session turn produced.
#[derive(Debug, Clone)]
pub struct SessionTurn {
    /// The bot message appended to the transcript.
    pub bot_message: Message,
    /// Whether this turn resolved the issue.
    pub resolved: bool,
    /// Whether the user confirmed ticket creation this turn.
    pub ticket_requested: bool,
}

struct SessionState {
    transcript: Transcript,
    context: ConversationContext,
    typing: bool,
    closed: bool,
}

/// A single chat session over a shared engine.
///
/// Turns are strictly sequential: input is rejected with
/// [`EngineError::TurnInFlight`] while a prior turn's asynchronous work
/// is outstanding, mirroring the UI disabling its input field. Closing
/// the session bumps a generation counter; an in-flight turn whose
/// generation no longer matches discards its result instead of applying
/// a stale update.
///
/// Sessions are independent of each other: nothing here is shared
/// across sessions, so different sessions can run concurrently without
/// coordination.
pub struct Session<B: AssistBackend> {
    engine: Arc<ConversationEngine<B>>,
    state: Mutex<SessionState>,
    generation: AtomicU64,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl<B: AssistBackend> Session<B> {
    /// Open a session: the transcript starts with the engine's greeting.
    pub fn open(engine: Arc<ConversationEngine<B>>) -> Self {
        let mut transcript = Transcript::new();
        transcript.append(engine.greeting());

        Self {
            engine,
            state: Mutex::new(SessionState {
                transcript,
                context: ConversationContext::new(),
                typing: false,
                closed: false,
            }),
            generation: AtomicU64::new(0),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Submit a free-text user message.
    pub async fn user_message(&self, text: impl Into<String>) -> Result<SessionTurn, EngineError> {
        self.submit(UserInput::text(text)).await
    }

    /// Submit a quick-reply option click.
    pub async fn choose_option(&self, label: impl Into<String>) -> Result<SessionTurn, EngineError> {
        self.submit(UserInput::option(label)).await
    }

    /// Process one user input through the engine.
    pub async fn submit(&self, input: UserInput) -> Result<SessionTurn, EngineError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(EngineError::TurnInFlight);
        }
        let _guard = FlightGuard(&self.in_flight);

        let generation = self.generation.load(Ordering::SeqCst);

        // Snapshot state and append the user message before the
        // suspension point; the lock is not held across the await.
        let (context, transcript) = {
            let mut state = self.state.lock().await;
            if state.closed {
                return Err(EngineError::SessionClosed);
            }
            state.transcript.append(Message::user(input.as_str()));
            state.typing = true;
            (state.context.clone(), state.transcript.clone())
        };

        let outcome = self.engine.next_turn(&input, &context, &transcript).await;

        let mut state = self.state.lock().await;
        state.typing = false;

        // The session was torn down while the turn was in flight: the
        // result must not touch state.
        if self.generation.load(Ordering::SeqCst) != generation || state.closed {
            debug!("Discarding stale turn result after session close");
            return Err(EngineError::SessionClosed);
        }

        let mut bot_message = match outcome.reply.options {
            Some(options) => Message::bot_with_options(outcome.reply.text, options),
            None => Message::bot(outcome.reply.text),
        };
        let id = state.transcript.append(bot_message.clone());
        bot_message.id = id;

        if outcome.context.phase == Phase::Ended {
            state.closed = true;
        }
        state.context = outcome.context;

        Ok(SessionTurn {
            bot_message,
            resolved: outcome.resolved,
            ticket_requested: outcome.ticket_requested,
        })
    }

    /// Analyze the session so far into a ticket draft.
    ///
    /// Read-only with respect to session state; the result is discarded
    /// if the session closed while the analysis was in flight.
    pub async fn analyze_for_ticket(&self) -> Result<TicketDraft, AssistError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let (context, transcript) = {
            let state = self.state.lock().await;
            (state.context.clone(), state.transcript.clone())
        };

        let draft = self
            .engine
            .brain()
            .analyze_for_ticket(&transcript, &context)
            .await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            return Err(AssistError::Unsupported("session closed".to_string()));
        }
        Ok(draft)
    }

    /// Close the session, discarding any in-flight turn's effect.
    pub async fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        state.closed = true;
        state.typing = false;
    }

    /// Whether the assistant is currently composing. Transient UI
    /// state, never part of the transcript.
    pub async fn typing(&self) -> bool {
        self.state.lock().await.typing
    }

    /// Snapshot of the transcript.
    pub async fn transcript(&self) -> Transcript {
        self.state.lock().await.transcript.clone()
    }

    /// Snapshot of the current context.
    pub async fn context(&self) -> ConversationContext {
        self.state.lock().await.context.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{async_trait, AssistResponse, Sender};
    use knowledge_base::KnowledgeBase;
    use std::time::Duration;

    /// Backend that sleeps before answering, for in-flight tests.
    struct SlowBackend(Duration);

    #[async_trait]
    impl AssistBackend for SlowBackend {
        async fn assist(
            &self,
            _user_message: &str,
            _transcript: &Transcript,
            _ctx: &ConversationContext,
        ) -> Result<AssistResponse, AssistError> {
            tokio::time::sleep(self.0).await;
            Ok(AssistResponse::plain("took a while, but here you go"))
        }

        fn name(&self) -> &str {
            "SlowBackend"
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl AssistBackend for FailingBackend {
        async fn assist(
            &self,
            _user_message: &str,
            _transcript: &Transcript,
            _ctx: &ConversationContext,
        ) -> Result<AssistResponse, AssistError> {
            Err(AssistError::Network("down".to_string()))
        }

        fn name(&self) -> &str {
            "FailingBackend"
        }
    }

    fn session_with<T: AssistBackend>(brain: T) -> Session<T> {
        let engine = ConversationEngine::new(Arc::new(KnowledgeBase::builtin()), brain);
        Session::open(Arc::new(engine))
    }

    #[tokio::test]
    async fn test_open_seeds_greeting() {
        let session = session_with(FailingBackend);
        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::Bot);
        assert!(transcript.messages()[0].options.is_some());
    }

    #[tokio::test]
    async fn test_turn_appends_user_and_bot_messages() {
        let session = session_with(FailingBackend);
        let turn = session.user_message("I forgot my password").await.unwrap();

        assert!(turn.bot_message.text.contains("password"));
        let transcript = session.transcript().await;
        // greeting + user + bot
        assert_eq!(transcript.len(), 3);
        assert!(transcript.messages()[1].is_user());
        assert!(!session.typing().await);
    }

    #[tokio::test]
    async fn test_second_input_rejected_while_turn_in_flight() {
        let session = Arc::new(session_with(SlowBackend(Duration::from_millis(100))));
        // Category must be set so the slow backend is actually consulted.
        session.choose_option("Technical Support").await.unwrap();

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.user_message("still broken").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = session.user_message("hello?").await;
        assert!(matches!(second, Err(EngineError::TurnInFlight)));

        assert!(first.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_close_discards_in_flight_turn() {
        let session = Arc::new(session_with(SlowBackend(Duration::from_millis(100))));
        session.choose_option("Technical Support").await.unwrap();
        let before = session.transcript().await.len();

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.user_message("anyone there").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.close().await;

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(EngineError::SessionClosed)));

        // The user message landed before the close, but no bot reply
        // was applied afterwards.
        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), before + 1);
        assert!(transcript.messages().last().unwrap().is_user());
    }

    #[tokio::test]
    async fn test_closed_session_rejects_input() {
        let session = session_with(FailingBackend);
        session.close().await;
        let result = session.user_message("hello").await;
        assert!(matches!(result, Err(EngineError::SessionClosed)));
    }

    #[tokio::test]
    async fn test_end_chat_closes_session() {
        let session = session_with(FailingBackend);
        session.choose_option("End Chat").await.unwrap();
        let result = session.user_message("wait, one more thing").await;
        assert!(matches!(result, Err(EngineError::SessionClosed)));
    }

    #[tokio::test]
    async fn test_restart_keeps_transcript() {
        let session = session_with(FailingBackend);
        session.user_message("I forgot my password").await.unwrap();
        let before = session.transcript().await.len();

        session.choose_option("Start New Issue").await.unwrap();

        let context = session.context().await;
        assert!(context.category.is_none());
        assert_eq!(context.attempts, 0);
        // Prior messages remain visible.
        assert_eq!(session.transcript().await.len(), before + 2);
    }
}
