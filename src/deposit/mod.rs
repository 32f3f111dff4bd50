//! # Deposit Validation
//!
//! A deposit is a manifest plus a set of named upload streams. Validation
//! runs three phases in order and stops after the first phase that records
//! a violation:
//!
//! 1. completeness: every manifest object was uploaded
//! 2. membership: every upload is declared in the manifest
//! 3. integrity: every upload matches its declared size and checksum
//!
//! Within a phase every problem is collected, so one outcome lists all
//! violations of the phase that failed.

pub mod outcome;
pub mod phases;
pub mod upload;
pub mod validator;
pub mod violation;

pub use outcome::{Phase, ValidationOutcome};
pub use phases::{check_completeness, check_membership, verify_integrity};
pub use upload::{PartSource, UploadSet, UploadedPart, MANIFEST_PART};
pub use validator::{DepositValidator, ValidationState};
pub use violation::Violation;
