//! Validation outcome

use std::fmt;

use serde::Serialize;

use super::violation::Violation;

/// Validation stage that can record violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Manifest,
    Completeness,
    Membership,
    Integrity,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Manifest => "manifest",
            Phase::Completeness => "completeness",
            Phase::Membership => "membership",
            Phase::Integrity => "integrity",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one validation run
///
/// Violations are append-only while the run is in progress and read-only
/// afterwards. An outcome with no violations is a success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    violations: Vec<Violation>,
    failed_phase: Option<Phase>,
}

impl ValidationOutcome {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record the violations of `phase`; an empty list leaves the outcome untouched
    pub(crate) fn record(&mut self, phase: Phase, violations: Vec<Violation>) {
        if violations.is_empty() {
            return;
        }
        self.failed_phase.get_or_insert(phase);
        self.violations.extend(violations);
    }

    pub fn is_success(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The phase whose violations ended the run
    pub fn failed_phase(&self) -> Option<Phase> {
        self.failed_phase
    }

    /// Violation messages in recording order
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcome_succeeds() {
        let outcome = ValidationOutcome::new();
        assert!(outcome.is_success());
        assert!(outcome.messages().is_empty());
        assert_eq!(outcome.failed_phase(), None);
    }

    #[test]
    fn test_record_empty_list_is_noop() {
        let mut outcome = ValidationOutcome::new();
        outcome.record(Phase::Completeness, Vec::new());
        assert!(outcome.is_success());
        assert_eq!(outcome.failed_phase(), None);
    }

    #[test]
    fn test_record_keeps_order() {
        let mut outcome = ValidationOutcome::new();
        outcome.record(
            Phase::Membership,
            vec![
                Violation::UnexpectedUpload("x".into()),
                Violation::UnexpectedUpload("y".into()),
            ],
        );

        assert!(!outcome.is_success());
        assert_eq!(outcome.failed_phase(), Some(Phase::Membership));
        assert_eq!(
            outcome.messages(),
            vec![
                "Uploaded file is missing from manifest: x",
                "Uploaded file is missing from manifest: y",
            ]
        );
    }
}
