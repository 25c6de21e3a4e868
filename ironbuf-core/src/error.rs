//! Error types for IronBuf core operations.

use thiserror::Error;

/// Core error type for IronBuf operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Region allocation failed or was requested with zero capacity.
    #[error("allocation failed: requested {requested} bytes")]
    Allocation {
        /// Requested region size in bytes.
        requested: usize,
    },

    /// A write would cross the window's limit.
    #[error("write overflow: offset {offset} + width {width} exceeds limit {limit}")]
    Overflow {
        /// Byte offset of the attempted write.
        offset: usize,
        /// Width of the attempted write in bytes.
        width: usize,
        /// Window limit in bytes.
        limit: usize,
    },

    /// A read would cross the window's limit.
    #[error("read underflow: offset {offset} + width {width} exceeds limit {limit}")]
    Underflow {
        /// Byte offset of the attempted read.
        offset: usize,
        /// Width of the attempted read in bytes.
        width: usize,
        /// Window limit in bytes.
        limit: usize,
    },

    /// Access to an off-heap region after it was released.
    #[error("storage accessed after release")]
    UseAfterRelease,

    /// Typed view creation over a byte count not divisible by the element width.
    #[error("view width mismatch: {len} bytes is not a multiple of element width {width}")]
    ViewWidth {
        /// Byte length of the candidate range.
        len: usize,
        /// Element width in bytes.
        width: usize,
    },

    /// Cursor reset without a preceding mark.
    #[error("reset without a mark")]
    InvalidMark,
}

/// Result type alias for IronBuf core operations.
pub type Result<T> = std::result::Result<T, Error>;
