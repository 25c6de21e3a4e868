//! Error types for codec operations.

use thiserror::Error;

/// Codec error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The window is too small to hold a whole message.
    #[error("truncated message: required {required} bytes, window capacity {available} bytes")]
    Truncated {
        /// Required window capacity in bytes.
        required: usize,
        /// Actual window capacity in bytes.
        available: usize,
    },

    /// A window access failed.
    #[error(transparent)]
    Window(#[from] ironbuf_core::Error),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
