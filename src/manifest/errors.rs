//! # Manifest Errors

use thiserror::Error;

/// Result type for manifest operations
pub type ManifestResult<T> = Result<T, ManifestParseError>;

/// Reasons a manifest document cannot be turned into a record list.
///
/// Any of these terminates a validation run with a single violation
/// carrying the `Display` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestParseError {
    #[error("Missing manifest part")]
    Missing,

    #[error("Failed to read manifest: {0}")]
    Unreadable(String),

    #[error("Invalid manifest: {0}")]
    Invalid(String),

    #[error("Duplicate object id in manifest: {0}")]
    DuplicateId(String),
}

impl From<serde_json::Error> for ManifestParseError {
    fn from(e: serde_json::Error) -> Self {
        ManifestParseError::Invalid(e.to_string())
    }
}
