//! Completion-service error types.

use thiserror::Error;

/// Errors from a completion call. None of these are retried: a failure is
/// final for the request it belongs to.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed completion payload: {0}")]
    MalformedPayload(String),
}
