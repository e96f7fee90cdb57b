//! Error types for the primitive codecs.

use thiserror::Error;

/// Errors produced while decoding wire data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before a field completed.
    #[error("Truncated input: needed {needed} more bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// A field is structurally impossible (bad length byte, invalid UTF-8,
    /// wrong fixed length at construction, inconsistent proof structure).
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// A declared count or length would allocate beyond a policy cap.
    #[error("Oversize declaration: {declared} exceeds maximum {max}")]
    Oversize { declared: u64, max: u64 },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
