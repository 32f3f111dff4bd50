//! Deposit pipeline tests
//!
//! Drive the validator end to end with in-memory and synthetic uploads:
//! - accepted and rejected deposits for each violation kind
//! - phase gating and exhaustiveness within a phase
//! - determinism of the outcome
//! - bounded buffering while streaming large uploads

use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ingestgate::checksum::{ChecksumAlgorithm, VERIFY_BUFFER_SIZE};
use ingestgate::deposit::{
    DepositValidator, Phase, UploadSet, UploadedPart, ValidationOutcome, MANIFEST_PART,
};

// =============================================================================
// Test Utilities
// =============================================================================

const TEN_BYTES: &[u8] = b"0123456789";

fn digest(algorithm: ChecksumAlgorithm, data: &[u8]) -> String {
    let mut accumulator = algorithm.accumulator();
    accumulator.update(data);
    accumulator.finalize_hex()
}

fn object(id: &str, size: u64, checksum_type: &str, checksum: &str) -> String {
    format!(
        r#"{{"id": "{}", "size": {}, "checksum_type": "{}", "checksum": "{}"}}"#,
        id, size, checksum_type, checksum
    )
}

fn manifest(objects: &[String]) -> String {
    format!(r#"{{"objects": [{}]}}"#, objects.join(","))
}

fn file_0001_manifest() -> String {
    manifest(&[object(
        "FILE_0001",
        10,
        "SHA-256",
        &digest(ChecksumAlgorithm::Sha256, TEN_BYTES),
    )])
}

fn submit(manifest: &str, parts: Vec<UploadedPart>) -> ValidationOutcome {
    let mut uploads = UploadSet::new().with_part(UploadedPart::from_bytes(MANIFEST_PART, manifest));
    for part in parts {
        uploads.push(part);
    }
    DepositValidator::new().validate(uploads)
}

/// Pattern bytes of a given length, generated on demand
struct SyntheticStream {
    remaining: u64,
    position: u64,
    largest_read: Arc<AtomicUsize>,
}

impl SyntheticStream {
    fn new(len: u64, largest_read: Arc<AtomicUsize>) -> Self {
        Self {
            remaining: len,
            position: 0,
            largest_read,
        }
    }

    fn byte_at(position: u64) -> u8 {
        (position % 251) as u8
    }
}

impl Read for SyntheticStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.largest_read.fetch_max(buf.len(), Ordering::SeqCst);

        let n = (buf.len() as u64).min(self.remaining) as usize;
        for slot in buf.iter_mut().take(n) {
            *slot = Self::byte_at(self.position);
            self.position += 1;
        }
        self.remaining -= n as u64;
        Ok(n)
    }
}

/// Reader that fails after yielding some bytes
struct BrokenStream {
    served: bool,
}

impl Read for BrokenStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.served {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "client went away"));
        }
        self.served = true;
        let n = buf.len().min(4);
        buf[..n].copy_from_slice(&TEN_BYTES[..n]);
        Ok(n)
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_valid_deposit_succeeds() {
    let outcome = submit(
        &file_0001_manifest(),
        vec![UploadedPart::from_bytes("FILE_0001", TEN_BYTES)],
    );

    assert!(outcome.is_success());
    assert!(outcome.messages().is_empty());
}

#[test]
fn test_omitted_upload_reported() {
    let outcome = submit(&file_0001_manifest(), Vec::new());

    assert_eq!(
        outcome.messages(),
        vec!["Missing uploaded file expected from manifest: FILE_0001"]
    );
}

#[test]
fn test_undeclared_upload_blocks_integrity() {
    let outcome = submit(
        &file_0001_manifest(),
        vec![
            UploadedPart::from_bytes("FILE_0001", TEN_BYTES),
            UploadedPart::from_bytes("FILE_9999", "anything"),
        ],
    );

    assert_eq!(
        outcome.messages(),
        vec!["Uploaded file is missing from manifest: FILE_9999"]
    );
    assert_eq!(outcome.failed_phase(), Some(Phase::Membership));
}

#[test]
fn test_short_upload_with_matching_digest_reports_size_only() {
    let nine = &TEN_BYTES[..9];
    let manifest = manifest(&[object(
        "FILE_0001",
        10,
        "sha256",
        &digest(ChecksumAlgorithm::Sha256, nine),
    )]);

    let outcome = submit(&manifest, vec![UploadedPart::from_bytes("FILE_0001", nine)]);

    assert_eq!(
        outcome.messages(),
        vec!["Byte count mismatch with manifest for file FILE_0001 (expected=10, actual=9)"]
    );
}

#[test]
fn test_truncated_upload_reports_size_and_checksum() {
    let outcome = submit(
        &file_0001_manifest(),
        vec![UploadedPart::from_bytes("FILE_0001", &TEN_BYTES[..9])],
    );

    let messages = outcome.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Byte count mismatch with manifest for file FILE_0001"));
    assert!(messages[1].starts_with("Checksum mismatch with manifest for file FILE_0001"));
}

#[test]
fn test_unknown_algorithm_reported() {
    let manifest = manifest(&[object("FILE_0001", 10, "crc9000", "00")]);
    let outcome = submit(&manifest, vec![UploadedPart::from_bytes("FILE_0001", TEN_BYTES)]);

    assert_eq!(
        outcome.messages(),
        vec!["Checksum algorithm not supported for file: FILE_0001, crc9000"]
    );
}

#[test]
fn test_malformed_manifest_single_violation() {
    let outcome = submit("<manif", vec![UploadedPart::from_bytes("FILE_0001", TEN_BYTES)]);

    assert_eq!(outcome.violations().len(), 1);
    assert_eq!(outcome.failed_phase(), Some(Phase::Manifest));
    assert!(outcome.messages()[0].starts_with("Invalid manifest: "));
}

#[test]
fn test_duplicate_manifest_ids_rejected() {
    let entry = object("FILE_0001", 10, "SHA-256", &digest(ChecksumAlgorithm::Sha256, TEN_BYTES));
    let outcome = submit(
        &manifest(&[entry.clone(), entry]),
        vec![UploadedPart::from_bytes("FILE_0001", TEN_BYTES)],
    );

    assert_eq!(
        outcome.messages(),
        vec!["Duplicate object id in manifest: FILE_0001"]
    );
}

// =============================================================================
// Phase properties
// =============================================================================

#[test]
fn test_completeness_failure_hides_membership() {
    let outcome = submit(
        &file_0001_manifest(),
        vec![UploadedPart::from_bytes("FILE_9999", TEN_BYTES)],
    );

    assert_eq!(outcome.failed_phase(), Some(Phase::Completeness));
    assert!(outcome
        .messages()
        .iter()
        .all(|m| m.starts_with("Missing uploaded file expected from manifest")));
}

#[test]
fn test_integrity_is_exhaustive() {
    let manifest = manifest(&[
        object("FILE_0001", 10, "MD5", &digest(ChecksumAlgorithm::Md5, b"xxxxxxxxxx")),
        object("FILE_0002", 10, "SHA-1", &digest(ChecksumAlgorithm::Sha1, b"yyyyyyyyyy")),
    ]);

    let outcome = submit(
        &manifest,
        vec![
            UploadedPart::from_bytes("FILE_0001", TEN_BYTES),
            UploadedPart::from_bytes("FILE_0002", TEN_BYTES),
        ],
    );

    let messages = outcome.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("FILE_0001"));
    assert!(messages[1].contains("FILE_0002"));
}

#[test]
fn test_integrity_follows_manifest_order() {
    let manifest = manifest(&[
        object("B", 1, "crc32", "00000000"),
        object("A", 1, "crc32", "00000000"),
    ]);

    let outcome = submit(
        &manifest,
        vec![
            UploadedPart::from_bytes("A", "a"),
            UploadedPart::from_bytes("B", "b"),
        ],
    );

    let messages = outcome.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("file B"));
    assert!(messages[1].contains("file A"));
}

#[test]
fn test_duplicate_upload_does_not_stop_other_files() {
    let manifest = manifest(&[
        object("FILE_0001", 10, "SHA-256", &digest(ChecksumAlgorithm::Sha256, TEN_BYTES)),
        object("FILE_0002", 10, "SHA-256", &digest(ChecksumAlgorithm::Sha256, TEN_BYTES)),
    ]);

    let outcome = submit(
        &manifest,
        vec![
            UploadedPart::from_bytes("FILE_0001", TEN_BYTES),
            UploadedPart::from_bytes("FILE_0001", Vec::new()),
            UploadedPart::from_bytes("FILE_0002", "corrupted!"),
        ],
    );

    let messages = outcome.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "File upload entry FILE_0001 contains 2 files, expected is 1");
    assert!(messages[1].starts_with("Checksum mismatch with manifest for file FILE_0002"));
}

#[test]
fn test_read_failure_is_per_file() {
    let manifest = manifest(&[
        object("FILE_0001", 10, "SHA-256", &digest(ChecksumAlgorithm::Sha256, TEN_BYTES)),
        object("FILE_0002", 10, "SHA-256", &digest(ChecksumAlgorithm::Sha256, TEN_BYTES)),
    ]);

    let outcome = submit(
        &manifest,
        vec![
            UploadedPart::new("FILE_0001", BrokenStream { served: false }),
            UploadedPart::from_bytes("FILE_0002", TEN_BYTES),
        ],
    );

    assert_eq!(
        outcome.messages(),
        vec!["Failed to process file: FILE_0001, client went away"]
    );
}

#[test]
fn test_unknown_algorithm_is_per_file() {
    let manifest = manifest(&[
        object("FILE_0001", 10, "crc9000", "00"),
        object("FILE_0002", 10, "SHA-256", &digest(ChecksumAlgorithm::Sha256, TEN_BYTES)),
    ]);

    let outcome = submit(
        &manifest,
        vec![
            UploadedPart::from_bytes("FILE_0001", TEN_BYTES),
            UploadedPart::from_bytes("FILE_0002", "9876543210"),
        ],
    );

    let messages = outcome.messages();
    assert_eq!(outcome.failed_phase(), Some(Phase::Integrity));
    assert_eq!(messages.len(), 2);
    assert_eq!(
        messages[0],
        "Checksum algorithm not supported for file: FILE_0001, crc9000"
    );
    assert!(messages[1].starts_with("Checksum mismatch with manifest for file FILE_0002"));
}

#[test]
fn test_object_named_manifest_is_not_verified() {
    let manifest = manifest(&[
        object(MANIFEST_PART, 3, "MD5", &digest(ChecksumAlgorithm::Md5, b"abc")),
        object("FILE_0001", 10, "SHA-256", &digest(ChecksumAlgorithm::Sha256, TEN_BYTES)),
    ]);
    let file = || UploadedPart::from_bytes("FILE_0001", TEN_BYTES);

    let inline = submit(&manifest, vec![file()]);
    assert!(inline.is_success(), "{:?}", inline.messages());

    let uploads = UploadSet::new()
        .with_part(UploadedPart::from_bytes(MANIFEST_PART, "zzzz"))
        .with_part(file());
    let separate = DepositValidator::new().validate_with_manifest(manifest.as_bytes(), uploads);
    assert!(separate.is_success(), "{:?}", separate.messages());
}

#[test]
fn test_outcome_is_deterministic() {
    let build = || {
        vec![
            UploadedPart::from_bytes("FILE_0001", &TEN_BYTES[..5]),
            UploadedPart::from_bytes("FILE_0002", "zz"),
        ]
    };
    let manifest = manifest(&[
        object("FILE_0001", 10, "SHA-512", "ab"),
        object("FILE_0002", 2, "crc32", "ffffffff"),
    ]);

    let first = submit(&manifest, build());
    let second = submit(&manifest, build());

    assert!(!first.is_success());
    assert_eq!(first, second);
}

#[test]
fn test_success_iff_no_violations() {
    let accepted = submit(
        &file_0001_manifest(),
        vec![UploadedPart::from_bytes("FILE_0001", TEN_BYTES)],
    );
    let rejected = submit(&file_0001_manifest(), Vec::new());

    assert_eq!(accepted.is_success(), accepted.violations().is_empty());
    assert_eq!(rejected.is_success(), rejected.violations().is_empty());
    assert!(accepted.is_success());
    assert!(!rejected.is_success());
}

// =============================================================================
// Streaming bound
// =============================================================================

#[test]
fn test_large_upload_streamed_with_fixed_buffer() {
    const LEN: u64 = 64 * 1024 * 1024;

    // Expected digest computed independently, chunk by chunk
    let mut expected = ChecksumAlgorithm::Crc32.accumulator();
    let mut chunk = vec![0u8; 1 << 20];
    let mut position = 0u64;
    while position < LEN {
        for slot in chunk.iter_mut() {
            *slot = SyntheticStream::byte_at(position);
            position += 1;
        }
        expected.update(&chunk);
    }

    let largest_read = Arc::new(AtomicUsize::new(0));
    let manifest = manifest(&[object("BIG", LEN, "CRC32", &expected.finalize_hex())]);
    let outcome = submit(
        &manifest,
        vec![UploadedPart::new(
            "BIG",
            SyntheticStream::new(LEN, Arc::clone(&largest_read)),
        )],
    );

    assert!(outcome.is_success(), "{:?}", outcome.messages());
    let largest = largest_read.load(Ordering::SeqCst);
    assert!(largest > 0);
    assert!(largest <= VERIFY_BUFFER_SIZE, "read buffer grew to {}", largest);
}
