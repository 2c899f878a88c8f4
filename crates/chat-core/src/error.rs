//! Error types for assist backend operations.

use thiserror::Error;

/// Errors a completion backend can report.
///
/// Note that most failure modes never surface through
/// [`AssistBackend`](crate::AssistBackend): the backend recovers them
/// internally with its local fallback responder. These variants exist
/// for the internal network path and for callers that bypass the
/// fallback wrapper.
#[derive(Debug, Error)]
pub enum AssistError {
    /// No usable credential is configured. A first-class supported
    /// mode, not a failure: it selects the local fallback path.
    #[error("completion backend disabled: no credential configured")]
    Disabled,

    /// Transport-level failure reaching the completion endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The completion endpoint answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The completion endpoint's output could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The backend does not support the requested operation.
    #[error("operation not supported by backend {0}")]
    Unsupported(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
