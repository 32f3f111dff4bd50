//! The three validation phases
//!
//! Each phase compares the manifest with the upload set and returns every
//! violation it finds. None of them stops at the first problem. The
//! [`MANIFEST_PART`] key is never compared, on either side.

use tracing::debug;

use crate::checksum::{StreamVerifier, Verification};
use crate::manifest::{Manifest, ManifestRecord};
use crate::observability::Event;

use super::upload::{PartSource, UploadSet, MANIFEST_PART};
use super::violation::Violation;

/// Manifest records that take part in validation, in manifest order
fn declared_objects(manifest: &Manifest) -> impl Iterator<Item = &ManifestRecord> {
    manifest
        .records()
        .iter()
        .filter(|record| record.id() != MANIFEST_PART)
}

/// Every manifest object must have been uploaded (manifest order)
pub fn check_completeness(manifest: &Manifest, uploads: &UploadSet) -> Vec<Violation> {
    declared_objects(manifest)
        .filter(|record| !uploads.contains(record.id()))
        .map(|record| Violation::MissingUpload(record.id().to_string()))
        .collect()
}

/// Every upload other than the manifest must be declared (submission order)
pub fn check_membership(manifest: &Manifest, uploads: &UploadSet) -> Vec<Violation> {
    uploads
        .ids()
        .filter(|id| *id != MANIFEST_PART)
        .filter(|id| !manifest.contains(id))
        .map(|id| Violation::UnexpectedUpload(id.to_string()))
        .collect()
}

/// Verify size and checksum of every declared upload, in manifest order
///
/// Consumes the upload streams. Ids submitted more than once are reported
/// and skipped. Absent and undeclared uploads are ignored here; they are
/// the completeness and membership phases' concern.
pub fn verify_integrity(manifest: &Manifest, mut uploads: UploadSet) -> Vec<Violation> {
    let mut violations = Vec::new();

    for record in declared_objects(manifest) {
        let mut sources = uploads.take(record.id());
        match sources.len() {
            0 => {}
            1 => {
                if let Some(source) = sources.pop() {
                    violations.extend(verify_part(record, source));
                }
            }
            count => violations.push(Violation::DuplicateUpload {
                id: record.id().to_string(),
                count,
            }),
        }
    }

    violations
}

fn verify_part(record: &ManifestRecord, source: PartSource) -> Vec<Violation> {
    match StreamVerifier::verify(source, record.checksum_type(), record.checksum(), record.size()) {
        Ok(verification) => {
            debug!(
                event = %Event::FileVerified,
                id = record.id(),
                href = ?record.href(),
                bytes = verification.actual.byte_count,
                matched = verification.is_match()
            );
            mismatches(record, &verification)
        }
        Err(e) => vec![Violation::from_verify_error(record.id(), e)],
    }
}

fn mismatches(record: &ManifestRecord, verification: &Verification) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !verification.size_matches() {
        violations.push(Violation::SizeMismatch {
            id: record.id().to_string(),
            expected: verification.expected_size,
            actual: verification.actual.byte_count,
        });
    }

    if !verification.checksum_matches() {
        violations.push(Violation::ChecksumMismatch {
            id: record.id().to_string(),
            expected: record.checksum().to_string(),
            actual: verification.actual.checksum.clone(),
        });
    }

    violations
}
