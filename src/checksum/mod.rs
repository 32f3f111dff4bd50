//! # Streaming Checksum Verification
//!
//! Uploaded objects are verified in a single pass: every chunk read from the
//! source is fed to a byte counter and a digest at the same time, so memory
//! use does not depend on the object size and the source is read only once.
//!
//! Supported algorithms: CRC32, MD5, SHA-1, SHA-224, SHA-256, SHA-384, SHA-512.

pub mod accumulator;
pub mod algorithm;
pub mod errors;
pub mod verifier;

pub use accumulator::ChecksumAccumulator;
pub use algorithm::ChecksumAlgorithm;
pub use errors::{VerifyError, VerifyResult};
pub use verifier::{
    normalize_checksum, StreamDigest, StreamVerifier, Verification, VerifyingReader,
    VERIFY_BUFFER_SIZE,
};
