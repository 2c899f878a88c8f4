//! Completion-backed assist brain with a local rule-based fallback.
//!
//! [`CompletionBrain`] implements [`chat_core::AssistBackend`] against a
//! chat-completion HTTP endpoint. Its defining property is that it
//! degrades instead of failing: when no credential is configured, the
//! local fallback responder answers without any network call; when the
//! endpoint is unreachable or returns something unusable, the same
//! fallback answers and the failure is only logged.
//!
//! The resolution flag, confidence score, and suggested actions are all
//! derived lexically from the exchanged text (see [`analysis`]); the
//! confidence score in particular is an approximation based on the
//! reply's own phrasing, not a calibrated probability.

pub mod analysis;
mod api_types;
mod brain;
mod config;
pub mod fallback;
pub mod ticket_analysis;

pub use api_types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
pub use brain::CompletionBrain;
pub use config::{CompletionConfig, CompletionConfigBuilder, DEFAULT_TIMEOUT_SECS, PLACEHOLDER_API_KEY};
