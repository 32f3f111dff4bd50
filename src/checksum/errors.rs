//! # Verification Errors

use std::io;

use thiserror::Error;

/// Result type for stream verification
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Stream verification errors
///
/// Both are per-object conditions: the caller records them and carries on
/// with the next object.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Raised before any byte of the stream is consumed
    #[error("Checksum algorithm not supported: {0}")]
    UnsupportedAlgorithm(String),

    #[error("{0}")]
    StreamRead(#[from] io::Error),
}
