//! Uploaded parts of a deposit
//!
//! Parts are grouped by id in submission order. An id may carry more than
//! one stream; that is a violation detected by the integrity phase, so the
//! set keeps every stream it is given.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Key of the part that carries the manifest document itself
pub const MANIFEST_PART: &str = "manifest";

/// A read-once byte source
pub type PartSource = Box<dyn Read + Send>;

/// One named upload stream
pub struct UploadedPart {
    id: String,
    source: PartSource,
}

impl UploadedPart {
    pub fn new(id: impl Into<String>, source: impl Read + Send + 'static) -> Self {
        Self {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// In-memory part, mostly for tests and small metadata files
    pub fn from_bytes(id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(id, std::io::Cursor::new(bytes.into()))
    }
}

impl fmt::Debug for UploadedPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedPart").field("id", &self.id).finish()
    }
}

struct UploadEntry {
    id: String,
    sources: Vec<PartSource>,
}

/// Uploaded parts grouped by id, ordered by first appearance
#[derive(Default)]
pub struct UploadSet {
    entries: Vec<UploadEntry>,
    index: HashMap<String, usize>,
}

impl UploadSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, part: UploadedPart) {
        let UploadedPart { id, source } = part;
        match self.index.get(&id) {
            Some(&position) => self.entries[position].sources.push(source),
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push(UploadEntry {
                    id,
                    sources: vec![source],
                });
            }
        }
    }

    /// Builder-style [`push`](Self::push)
    pub fn with_part(mut self, part: UploadedPart) -> Self {
        self.push(part);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Ids in submission order, each listed once
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Remove and return every stream submitted under `id`
    ///
    /// Later calls for the same id return an empty list.
    pub fn take(&mut self, id: &str) -> Vec<PartSource> {
        match self.index.get(id) {
            Some(&position) => std::mem::take(&mut self.entries[position].sources),
            None => Vec::new(),
        }
    }

    /// Number of distinct ids
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<UploadedPart> for UploadSet {
    fn from_iter<I: IntoIterator<Item = UploadedPart>>(iter: I) -> Self {
        let mut set = UploadSet::new();
        for part in iter {
            set.push(part);
        }
        set
    }
}

impl fmt::Debug for UploadSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|e| (&e.id, e.sources.len())))
            .finish()
    }
}
