//! ingestgate - manifest validation for archival deposits
//!
//! A deposit is a manifest plus a bundle of uploaded byte streams. The
//! crate decides whether the bundle exactly and correctly satisfies the
//! manifest: every declared object present, nothing undeclared, and every
//! object matching its declared size and checksum. Objects are verified in
//! one streaming pass each.

pub mod checksum;
pub mod cli;
pub mod deposit;
pub mod http_server;
pub mod manifest;
pub mod observability;
