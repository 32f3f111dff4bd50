//! Incremental digest state for one algorithm

use crc32fast::Hasher as Crc32Hasher;
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use super::algorithm::ChecksumAlgorithm;

/// Running checksum, fed chunk by chunk
#[derive(Clone)]
pub enum ChecksumAccumulator {
    Crc32(Crc32Hasher),
    Md5(Md5),
    Sha1(Sha1),
    Sha224(Sha224),
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl ChecksumAccumulator {
    pub fn new(algorithm: ChecksumAlgorithm) -> Self {
        match algorithm {
            ChecksumAlgorithm::Crc32 => ChecksumAccumulator::Crc32(Crc32Hasher::new()),
            ChecksumAlgorithm::Md5 => ChecksumAccumulator::Md5(Md5::new()),
            ChecksumAlgorithm::Sha1 => ChecksumAccumulator::Sha1(Sha1::new()),
            ChecksumAlgorithm::Sha224 => ChecksumAccumulator::Sha224(Sha224::new()),
            ChecksumAlgorithm::Sha256 => ChecksumAccumulator::Sha256(Sha256::new()),
            ChecksumAlgorithm::Sha384 => ChecksumAccumulator::Sha384(Sha384::new()),
            ChecksumAlgorithm::Sha512 => ChecksumAccumulator::Sha512(Sha512::new()),
        }
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        match self {
            ChecksumAccumulator::Crc32(_) => ChecksumAlgorithm::Crc32,
            ChecksumAccumulator::Md5(_) => ChecksumAlgorithm::Md5,
            ChecksumAccumulator::Sha1(_) => ChecksumAlgorithm::Sha1,
            ChecksumAccumulator::Sha224(_) => ChecksumAlgorithm::Sha224,
            ChecksumAccumulator::Sha256(_) => ChecksumAlgorithm::Sha256,
            ChecksumAccumulator::Sha384(_) => ChecksumAlgorithm::Sha384,
            ChecksumAccumulator::Sha512(_) => ChecksumAlgorithm::Sha512,
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            ChecksumAccumulator::Crc32(hasher) => hasher.update(data),
            ChecksumAccumulator::Md5(hasher) => hasher.update(data),
            ChecksumAccumulator::Sha1(hasher) => hasher.update(data),
            ChecksumAccumulator::Sha224(hasher) => hasher.update(data),
            ChecksumAccumulator::Sha256(hasher) => hasher.update(data),
            ChecksumAccumulator::Sha384(hasher) => hasher.update(data),
            ChecksumAccumulator::Sha512(hasher) => hasher.update(data),
        }
    }

    /// Consume the accumulator, returning the lowercase hex digest
    ///
    /// CRC32 is rendered as 8 zero-padded hex characters.
    pub fn finalize_hex(self) -> String {
        match self {
            ChecksumAccumulator::Crc32(hasher) => format!("{:08x}", hasher.finalize()),
            ChecksumAccumulator::Md5(hasher) => hex::encode(hasher.finalize()),
            ChecksumAccumulator::Sha1(hasher) => hex::encode(hasher.finalize()),
            ChecksumAccumulator::Sha224(hasher) => hex::encode(hasher.finalize()),
            ChecksumAccumulator::Sha256(hasher) => hex::encode(hasher.finalize()),
            ChecksumAccumulator::Sha384(hasher) => hex::encode(hasher.finalize()),
            ChecksumAccumulator::Sha512(hasher) => hex::encode(hasher.finalize()),
        }
    }
}
