//! # HTTP Server Errors

use std::io;

use axum::http::StatusCode;
use thiserror::Error;

/// Result type for server lifecycle operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors starting or running the HTTP server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid socket address: {0}")]
    InvalidAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors reading a deposit request off the wire
///
/// These are transport failures, reported before validation starts.
#[derive(Debug, Error)]
pub enum SpoolError {
    #[error("Multipart field without a name")]
    UnnamedField,

    #[error("{message}")]
    Multipart { status: StatusCode, message: String },

    #[error("Failed to spool upload: {0}")]
    Io(#[from] io::Error),
}

impl SpoolError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            SpoolError::UnnamedField => StatusCode::BAD_REQUEST,
            SpoolError::Multipart { status, .. } => *status,
            SpoolError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
