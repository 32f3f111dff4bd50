//! Single-pass stream verification
//!
//! [`VerifyingReader`] decorates any `Read`: each chunk handed back to the
//! caller has already been counted and fed to the digest. [`StreamVerifier`]
//! drains such a reader through a fixed buffer and reports what it saw.

use std::io::{self, Read};

use super::accumulator::ChecksumAccumulator;
use super::algorithm::ChecksumAlgorithm;
use super::errors::{VerifyError, VerifyResult};

/// Fixed read buffer, independent of the stream length
pub const VERIFY_BUFFER_SIZE: usize = 8192;

/// Byte count and digest observed over a whole stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDigest {
    pub algorithm: ChecksumAlgorithm,
    pub byte_count: u64,
    /// Lowercase hex
    pub checksum: String,
}

/// Reader that counts and digests everything read through it
pub struct VerifyingReader<R> {
    inner: R,
    byte_count: u64,
    accumulator: ChecksumAccumulator,
}

impl<R: Read> VerifyingReader<R> {
    pub fn new(inner: R, algorithm: ChecksumAlgorithm) -> Self {
        Self {
            inner,
            byte_count: 0,
            accumulator: algorithm.accumulator(),
        }
    }

    pub fn finish(self) -> StreamDigest {
        StreamDigest {
            algorithm: self.accumulator.algorithm(),
            byte_count: self.byte_count,
            checksum: self.accumulator.finalize_hex(),
        }
    }
}

impl<R: Read> Read for VerifyingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.byte_count += n as u64;
        self.accumulator.update(&buf[..n]);
        Ok(n)
    }
}

/// Declared values compared against an observed [`StreamDigest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub expected_size: u64,
    /// Normalised with [`normalize_checksum`]
    pub expected_checksum: String,
    pub actual: StreamDigest,
}

impl Verification {
    pub fn size_matches(&self) -> bool {
        self.expected_size == self.actual.byte_count
    }

    pub fn checksum_matches(&self) -> bool {
        self.expected_checksum == self.actual.checksum
    }

    pub fn is_match(&self) -> bool {
        self.size_matches() && self.checksum_matches()
    }
}

/// Lowercase, whitespace-trimmed form used for checksum comparison
pub fn normalize_checksum(checksum: &str) -> String {
    checksum.trim().to_ascii_lowercase()
}

/// Verifies byte streams against declared size and checksum
pub struct StreamVerifier;

impl StreamVerifier {
    /// Read `reader` to the end once, returning its size and digest
    ///
    /// The algorithm is resolved before the first read; an unknown name
    /// leaves the stream untouched.
    pub fn digest<R: Read>(reader: R, algorithm: &str) -> VerifyResult<StreamDigest> {
        let algorithm = ChecksumAlgorithm::from_name(algorithm)
            .ok_or_else(|| VerifyError::UnsupportedAlgorithm(algorithm.to_string()))?;

        let mut reader = VerifyingReader::new(reader, algorithm);
        let mut buffer = [0u8; VERIFY_BUFFER_SIZE];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(VerifyError::StreamRead(e)),
            }
        }

        Ok(reader.finish())
    }

    /// Digest `reader` and pair the result with the declared values
    pub fn verify<R: Read>(
        reader: R,
        algorithm: &str,
        expected_checksum: &str,
        expected_size: u64,
    ) -> VerifyResult<Verification> {
        let actual = Self::digest(reader, algorithm)?;

        Ok(Verification {
            expected_size,
            expected_checksum: normalize_checksum(expected_checksum),
            actual,
        })
    }
}
