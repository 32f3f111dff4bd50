//! Manifest records
//!
//! A `ManifestRecord` describes one expected object. Records are created by
//! a parser and never mutated afterwards; a `Manifest` owns them in document
//! order and rejects duplicate ids.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::{ManifestParseError, ManifestResult};

/// One expected object of a deposit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    id: String,
    size: u64,
    checksum_type: String,
    checksum: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    href: Option<String>,
}

impl ManifestRecord {
    pub fn new(
        id: impl Into<String>,
        size: u64,
        checksum_type: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            size,
            checksum_type: checksum_type.into(),
            checksum: checksum.into(),
            href: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Checksum algorithm name as written in the manifest
    pub fn checksum_type(&self) -> &str {
        &self.checksum_type
    }

    /// Expected checksum value as written in the manifest
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }
}

/// Ordered, id-unique list of manifest records
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    records: Vec<ManifestRecord>,
    ids: HashSet<String>,
}

impl Manifest {
    /// Build a manifest, failing on the first id listed twice
    pub fn new(records: Vec<ManifestRecord>) -> ManifestResult<Self> {
        let mut ids = HashSet::with_capacity(records.len());
        for record in &records {
            if !ids.insert(record.id.clone()) {
                return Err(ManifestParseError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records, ids })
    }

    /// Records in document order
    pub fn records(&self) -> &[ManifestRecord] {
        &self.records
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
