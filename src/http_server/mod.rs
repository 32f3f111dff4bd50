//! # ingestgate HTTP Server Module
//!
//! HTTP boundary for deposit validation. Transport concerns (multipart
//! decoding, spooling, status codes) live here; validation itself knows
//! nothing about HTTP.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /deposit` - Submit a deposit (multipart/form-data)

pub mod config;
pub mod deposit_routes;
pub mod errors;
pub mod health_routes;
pub mod response;
pub mod server;
pub mod spool;

pub use config::HttpServerConfig;
pub use deposit_routes::{deposit_routes, DepositState};
pub use errors::{ServerError, ServerResult, SpoolError};
pub use response::{dispatch, DepositResponse};
pub use server::HttpServer;
