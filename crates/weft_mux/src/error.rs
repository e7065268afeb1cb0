//! Errors raised while building multiplexer graphs.

use weft_common::InternalError;

/// Errors from graph builders and the multiplexer library.
#[derive(Debug, thiserror::Error)]
pub enum MuxError {
    /// A multiplexer needs at least two inputs.
    #[error("invalid multiplexer size {size}: at least 2 inputs are required")]
    InvalidSize {
        /// The requested size.
        size: usize,
    },

    /// A multi-level multiplexer needs at least one level.
    #[error("invalid multiplexer level count {levels}")]
    InvalidLevels {
        /// The requested level count.
        levels: usize,
    },

    /// A usage references a circuit model missing from the catalog.
    #[error("unknown multiplexer circuit model '{0}'")]
    UnknownModel(String),

    /// A usage references a circuit model that is not a multiplexer.
    #[error("circuit model '{0}' is not a multiplexer")]
    NotAMux(String),

    /// A graph broke a structural invariant.
    #[error(transparent)]
    Internal(#[from] InternalError),
}
