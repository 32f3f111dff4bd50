//! Deposit validation state machine
//!
//! ```text
//! ParsingManifest -> CheckingCompleteness -> CheckingMembership -> VerifyingIntegrity -> Done
//!        |                    |                      |
//!        +--------------------+----------------------+----> Done (on any violation)
//! ```
//!
//! A stage advances only when it recorded nothing. Presence and membership
//! problems make integrity checking meaningless, so a failing stage jumps
//! straight to `Done`. Each stage owns the manifest and uploads it works on
//! and hands them to the next one.

use std::io::Read;

use tracing::{debug, info};

use crate::manifest::{JsonManifestParser, Manifest, ManifestParseError, ManifestParser};
use crate::observability::Event;

use super::outcome::{Phase, ValidationOutcome};
use super::phases::{check_completeness, check_membership, verify_integrity};
use super::upload::{UploadSet, MANIFEST_PART};
use super::violation::{violation_kinds, Violation};

/// Stages of a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    ParsingManifest,
    CheckingCompleteness,
    CheckingMembership,
    VerifyingIntegrity,
    Done,
}

/// Validates deposits against their manifest
///
/// Holds no per-deposit state; one validator can serve concurrent runs.
#[derive(Debug, Clone, Default)]
pub struct DepositValidator<P = JsonManifestParser> {
    parser: P,
}

impl DepositValidator<JsonManifestParser> {
    pub fn new() -> Self {
        Self::with_parser(JsonManifestParser::new())
    }
}

impl<P: ManifestParser> DepositValidator<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Validate a deposit whose manifest is the [`MANIFEST_PART`] upload
    pub fn validate(&self, mut uploads: UploadSet) -> ValidationOutcome {
        let manifest_bytes = read_manifest_part(&mut uploads);
        self.run(manifest_bytes, uploads)
    }

    /// Validate a deposit with the manifest supplied separately
    ///
    /// A [`MANIFEST_PART`] entry in `uploads` is ignored by every phase.
    pub fn validate_with_manifest(&self, manifest: &[u8], uploads: UploadSet) -> ValidationOutcome {
        self.run(Ok(manifest.to_vec()), uploads)
    }

    fn run(
        &self,
        manifest_bytes: Result<Vec<u8>, ManifestParseError>,
        uploads: UploadSet,
    ) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();
        let mut stage = Stage::ParsingManifest {
            manifest_bytes,
            uploads,
        };

        while stage.state() != ValidationState::Done {
            debug!(state = ?stage.state(), "validation step");
            stage = stage.step(&self.parser, &mut outcome);
        }

        outcome
    }
}

/// A stage together with the data it consumes
enum Stage {
    ParsingManifest {
        manifest_bytes: Result<Vec<u8>, ManifestParseError>,
        uploads: UploadSet,
    },
    CheckingCompleteness {
        manifest: Manifest,
        uploads: UploadSet,
    },
    CheckingMembership {
        manifest: Manifest,
        uploads: UploadSet,
    },
    VerifyingIntegrity {
        manifest: Manifest,
        uploads: UploadSet,
    },
    Done,
}

impl Stage {
    fn state(&self) -> ValidationState {
        match self {
            Stage::ParsingManifest { .. } => ValidationState::ParsingManifest,
            Stage::CheckingCompleteness { .. } => ValidationState::CheckingCompleteness,
            Stage::CheckingMembership { .. } => ValidationState::CheckingMembership,
            Stage::VerifyingIntegrity { .. } => ValidationState::VerifyingIntegrity,
            Stage::Done => ValidationState::Done,
        }
    }

    /// Execute this stage and return the next one
    fn step<P: ManifestParser>(self, parser: &P, outcome: &mut ValidationOutcome) -> Stage {
        match self {
            Stage::ParsingManifest {
                manifest_bytes,
                uploads,
            } => match manifest_bytes.and_then(|bytes| parser.parse(&bytes)) {
                Ok(manifest) => {
                    debug!(event = %Event::ManifestParsed, records = manifest.len());
                    Stage::CheckingCompleteness { manifest, uploads }
                }
                Err(e) => {
                    info!(event = %Event::ManifestRejected, error = %e);
                    outcome.record(Phase::Manifest, vec![Violation::from(e)]);
                    Stage::Done
                }
            },
            Stage::CheckingCompleteness { manifest, uploads } => {
                let violations = check_completeness(&manifest, &uploads);
                if finish_phase(outcome, Phase::Completeness, violations) {
                    Stage::CheckingMembership { manifest, uploads }
                } else {
                    Stage::Done
                }
            }
            Stage::CheckingMembership { manifest, uploads } => {
                let violations = check_membership(&manifest, &uploads);
                if finish_phase(outcome, Phase::Membership, violations) {
                    Stage::VerifyingIntegrity { manifest, uploads }
                } else {
                    Stage::Done
                }
            }
            Stage::VerifyingIntegrity { manifest, uploads } => {
                let violations = verify_integrity(&manifest, uploads);
                finish_phase(outcome, Phase::Integrity, violations);
                Stage::Done
            }
            Stage::Done => Stage::Done,
        }
    }
}

/// Record the phase result; `true` when the phase was clean
fn finish_phase(outcome: &mut ValidationOutcome, phase: Phase, violations: Vec<Violation>) -> bool {
    if violations.is_empty() {
        return true;
    }

    info!(
        event = %Event::PhaseFailed,
        phase = %phase,
        violations = violations.len(),
        kinds = %violation_kinds(&violations).join(",")
    );
    outcome.record(phase, violations);
    false
}

/// Read the manifest upload into memory, consuming it from the set
fn read_manifest_part(uploads: &mut UploadSet) -> Result<Vec<u8>, ManifestParseError> {
    let mut sources = uploads.take(MANIFEST_PART);
    if sources.len() > 1 {
        return Err(ManifestParseError::Invalid(format!(
            "deposit contains {} manifest parts, expected is 1",
            sources.len()
        )));
    }

    let mut source = sources.pop().ok_or(ManifestParseError::Missing)?;
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|e| ManifestParseError::Unreadable(e.to_string()))?;

    Ok(bytes)
}
