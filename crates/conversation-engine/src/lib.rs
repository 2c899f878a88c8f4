//! Per-session conversation state machine for the support chat assistant.
//!
//! The engine owns the turn logic: category detection against the
//! knowledge base, interpretation of completion-backend replies,
//! scripted option handling, the escalation ceiling, and the explicit
//! phase transitions of one conversation. [`Session`] wraps it with the
//! per-session bookkeeping: the transcript, sequential turn processing,
//! and cancellation on close.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use completion_brain::CompletionBrain;
//! use conversation_engine::{ConversationEngine, Session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let brain = CompletionBrain::from_env()?;
//! let engine = Arc::new(ConversationEngine::new(brain.knowledge(), brain));
//! let session = Session::open(engine);
//!
//! let turn = session.user_message("I forgot my password").await?;
//! println!("{}", turn.bot_message.text);
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod script;
mod session;
mod turn;

pub use engine::ConversationEngine;
pub use error::EngineError;
pub use session::{Session, SessionTurn};
pub use turn::{BotReply, TurnOutcome, UserInput};
