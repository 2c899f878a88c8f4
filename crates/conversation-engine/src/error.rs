//! Error types for session handling.

use thiserror::Error;

/// Errors that can occur while driving a session.
///
/// Completion-backend failures never appear here: the engine degrades
/// to its knowledge-base fallback instead (degrade-not-fail policy).
#[derive(Debug, Error)]
pub enum EngineError {
    /// A prior turn is still being processed; input is rejected until
    /// it completes.
    #[error("a turn is already in flight for this session")]
    TurnInFlight,

    /// The session was closed; any in-flight result was discarded.
    #[error("session is closed")]
    SessionClosed,
}
