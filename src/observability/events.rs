//! Observable events
//!
//! Events are explicit and typed. Their string form is the `event` field
//! of the corresponding log line.

use std::fmt;

/// Observable events in ingestgate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// HTTP server bound and serving
    ServerStart,

    // Deposits
    /// All parts of a deposit request have been received
    DepositReceived,
    /// Manifest parsed into records
    ManifestParsed,
    /// Manifest could not be parsed
    ManifestRejected,
    /// A validation phase recorded violations
    PhaseFailed,
    /// One upload streamed through the verifier
    FileVerified,
    /// Deposit satisfied its manifest
    DepositAccepted,
    /// Deposit failed validation
    DepositRejected,
    /// Request could not be read at the transport level
    TransportFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::DepositReceived => "DEPOSIT_RECEIVED",
            Event::ManifestParsed => "MANIFEST_PARSED",
            Event::ManifestRejected => "MANIFEST_REJECTED",
            Event::PhaseFailed => "PHASE_FAILED",
            Event::FileVerified => "FILE_VERIFIED",
            Event::DepositAccepted => "DEPOSIT_ACCEPTED",
            Event::DepositRejected => "DEPOSIT_REJECTED",
            Event::TransportFailed => "TRANSPORT_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
