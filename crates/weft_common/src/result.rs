//! Common result and error types for the Weft generator.

/// The result type for operations that can only fail because of a bug.
///
/// `Err` means a structural invariant was broken upstream (for example a
/// multiplexer graph with two edges between the same pair of nodes). These are
/// never user errors and are never recovered from.
pub type WeftResult<T> = Result<T, InternalError>;

/// A broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("structural invariant violated: {message}")]
pub struct InternalError {
    /// Description of the violated invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
