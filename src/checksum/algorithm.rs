//! Checksum algorithm names
//!
//! Manifests spell algorithms in many ways ("SHA-256", "sha256", "Sha_256").
//! Matching ignores case, hyphens and underscores.

use std::fmt;

use super::accumulator::ChecksumAccumulator;

/// Checksum algorithms a manifest may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    Crc32,
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl ChecksumAlgorithm {
    /// Resolve a manifest algorithm name, `None` if unsupported
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "crc32" => Some(ChecksumAlgorithm::Crc32),
            "md5" => Some(ChecksumAlgorithm::Md5),
            "sha1" => Some(ChecksumAlgorithm::Sha1),
            "sha224" => Some(ChecksumAlgorithm::Sha224),
            "sha256" => Some(ChecksumAlgorithm::Sha256),
            "sha384" => Some(ChecksumAlgorithm::Sha384),
            "sha512" => Some(ChecksumAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Crc32 => "CRC32",
            ChecksumAlgorithm::Md5 => "MD5",
            ChecksumAlgorithm::Sha1 => "SHA-1",
            ChecksumAlgorithm::Sha224 => "SHA-224",
            ChecksumAlgorithm::Sha256 => "SHA-256",
            ChecksumAlgorithm::Sha384 => "SHA-384",
            ChecksumAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Fresh accumulator for this algorithm
    pub fn accumulator(&self) -> ChecksumAccumulator {
        ChecksumAccumulator::new(*self)
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
