//! Network error types.

use faircoin_core::CodecError;
use thiserror::Error;

/// Errors produced while framing or decoding peer messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The envelope checksum did not match the payload.
    #[error("Checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch { expected: String, got: String },

    /// Wire-level decoding error (truncated, malformed or oversize data).
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;
