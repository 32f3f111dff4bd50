//! Violation messages
//!
//! The `Display` text of each variant is the message reported to the
//! depositor; clients match on these strings, so they are stable.

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::checksum::VerifyError;
use crate::manifest::ManifestParseError;

/// A single reason a deposit does not satisfy its manifest
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{0}")]
    ManifestParse(ManifestParseError),

    #[error("Missing uploaded file expected from manifest: {0}")]
    MissingUpload(String),

    #[error("Uploaded file is missing from manifest: {0}")]
    UnexpectedUpload(String),

    #[error("File upload entry {id} contains {count} files, expected is 1")]
    DuplicateUpload { id: String, count: usize },

    #[error("Byte count mismatch with manifest for file {id} (expected={expected}, actual={actual})")]
    SizeMismatch { id: String, expected: u64, actual: u64 },

    #[error("Checksum mismatch with manifest for file {id} (expected={expected}, actual={actual})")]
    ChecksumMismatch {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("Checksum algorithm not supported for file: {id}, {algorithm}")]
    UnsupportedAlgorithm { id: String, algorithm: String },

    #[error("Failed to process file: {id}, {cause}")]
    StreamRead { id: String, cause: String },
}

impl Violation {
    /// Map a per-file verification error onto its violation
    pub fn from_verify_error(id: &str, error: VerifyError) -> Self {
        match error {
            VerifyError::UnsupportedAlgorithm(algorithm) => Violation::UnsupportedAlgorithm {
                id: id.to_string(),
                algorithm,
            },
            VerifyError::StreamRead(e) => Violation::StreamRead {
                id: id.to_string(),
                cause: e.to_string(),
            },
        }
    }

    /// Stable kind name, logged with failed phases
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::ManifestParse(_) => "manifest_parse",
            Violation::MissingUpload(_) => "missing_upload",
            Violation::UnexpectedUpload(_) => "unexpected_upload",
            Violation::DuplicateUpload { .. } => "duplicate_upload",
            Violation::SizeMismatch { .. } => "size_mismatch",
            Violation::ChecksumMismatch { .. } => "checksum_mismatch",
            Violation::UnsupportedAlgorithm { .. } => "unsupported_algorithm",
            Violation::StreamRead { .. } => "stream_read",
        }
    }
}

/// Distinct kind names of `violations`, in order of first appearance
pub(crate) fn violation_kinds(violations: &[Violation]) -> Vec<&'static str> {
    let mut kinds: Vec<&'static str> = Vec::new();
    for kind in violations.iter().map(Violation::kind) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds
}

impl From<ManifestParseError> for Violation {
    fn from(e: ManifestParseError) -> Self {
        Violation::ManifestParse(e)
    }
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
