//! Manifest parsing
//!
//! The validator talks to a [`ManifestParser`]. The shipped implementation
//! reads a JSON document:
//!
//! ```json
//! {
//!   "objects": [
//!     { "id": "FILE_0001", "size": 10, "checksum_type": "SHA-256", "checksum": "…" }
//!   ],
//!   "metadata": { "id": "metadata", "size": 120, "checksum_type": "MD5", "checksum": "…" }
//! }
//! ```
//!
//! The metadata object is optional and, when present, is expected as an
//! upload like any other object. It is appended after `objects`.

use std::sync::Arc;

use serde::Deserialize;

use super::errors::ManifestResult;
use super::record::{Manifest, ManifestRecord};

/// Turns raw manifest bytes into a validated [`Manifest`]
pub trait ManifestParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> ManifestResult<Manifest>;
}

impl<T: ManifestParser + ?Sized> ManifestParser for Arc<T> {
    fn parse(&self, bytes: &[u8]) -> ManifestResult<Manifest> {
        (**self).parse(bytes)
    }
}

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    objects: Vec<ManifestRecord>,
    #[serde(default)]
    metadata: Option<ManifestRecord>,
}

/// JSON manifest parser
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestParser;

impl JsonManifestParser {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestParser for JsonManifestParser {
    fn parse(&self, bytes: &[u8]) -> ManifestResult<Manifest> {
        let document: ManifestDocument = serde_json::from_slice(bytes)?;

        let mut records = document.objects;
        records.extend(document.metadata);

        Manifest::new(records)
    }
}
