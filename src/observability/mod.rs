//! Observability for ingestgate
//!
//! Logs are emitted through `tracing`. Lifecycle events are typed
//! ([`Event`]) and attached to each log line as the `event` field, so log
//! consumers can filter on stable names:
//!
//! ```ignore
//! use ingestgate::observability::Event;
//!
//! tracing::info!(event = %Event::DepositAccepted, deposit_id = %id);
//! ```
//!
//! Logging never feeds back into validation results.

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, LogFormat, ObservabilityError, ObservabilityResult};

