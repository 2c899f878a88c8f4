//! Core trait and types for the support chat assistant.
//!
//! This crate provides the shared interface for the support chat ecosystem.
//! It defines:
//!
//! - [`AssistBackend`] - The trait implemented by completion backends
//! - [`Message`] / [`Transcript`] - The session's append-only message log
//! - [`ConversationContext`] / [`Phase`] - Per-session conversation state
//! - [`AssistResponse`] / [`SuggestedAction`] - Backend reply types
//! - [`TicketDraft`] - Structured ticket proposal produced by analysis
//! - [`AssistError`] - Error type for backend operations
//!
//! # Example
//!
//! ```rust
//! use chat_core::{
//!     AssistBackend, AssistError, AssistResponse, ConversationContext, Transcript,
//! };
//! use async_trait::async_trait;
//!
//! struct CannedBackend;
//!
//! #[async_trait]
//! impl AssistBackend for CannedBackend {
//!     async fn assist(
//!         &self,
//!         _user_message: &str,
//!         _transcript: &Transcript,
//!         _ctx: &ConversationContext,
//!     ) -> Result<AssistResponse, AssistError> {
//!         Ok(AssistResponse::plain("Try turning it off and on again."))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedBackend"
//!     }
//! }
//! ```

mod assist;
mod context;
mod draft;
mod error;
mod message;
mod prompt;
mod transcript;

pub use assist::{AssistBackend, AssistResponse, SuggestedAction};
pub use context::{ConversationContext, Phase, ResolutionMethod};
pub use draft::{Sentiment, TicketDraft, TicketPriority, UrgencyLevel};
pub use error::AssistError;
pub use message::{Message, Sender};
pub use prompt::hash_prompt;
pub use transcript::Transcript;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
