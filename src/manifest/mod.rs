//! # Deposit Manifest
//!
//! A manifest enumerates the objects a deposit is expected to contain.
//! Each object carries an id, a declared byte size and a checksum under a
//! named algorithm.
//!
//! The validator only depends on [`ManifestParser`]; the JSON document
//! format lives in [`parser`].

pub mod errors;
pub mod parser;
pub mod record;

pub use errors::{ManifestParseError, ManifestResult};
pub use parser::{JsonManifestParser, ManifestParser};
pub use record::{Manifest, ManifestRecord};
