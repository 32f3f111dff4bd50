//! Deposit HTTP Routes
//!
//! `POST /deposit` accepts a multipart form. The `manifest` field holds the
//! manifest document; every other field name is an object id.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::deposit::DepositValidator;
use crate::manifest::{JsonManifestParser, ManifestParser};
use crate::observability::Event;

use super::config::HttpServerConfig;
use super::response::{dispatch, DepositResponse};
use super::spool::spool_multipart;

// ==================
// Shared State
// ==================

/// Deposit state shared across handlers
pub struct DepositState {
    pub validator: DepositValidator<Arc<dyn ManifestParser>>,
    pub spool_dir: Option<PathBuf>,
    pub body_limit: usize,
}

impl DepositState {
    /// JSON manifests, settings from `config`
    pub fn new(config: &HttpServerConfig) -> Self {
        Self::with_parser(config, Arc::new(JsonManifestParser::new()))
    }

    pub fn with_parser(config: &HttpServerConfig, parser: Arc<dyn ManifestParser>) -> Self {
        Self {
            validator: DepositValidator::with_parser(parser),
            spool_dir: config.spool_dir.clone(),
            body_limit: config.body_limit(),
        }
    }
}

type DepositReply = (StatusCode, Json<DepositResponse>);

// ==================
// Deposit Routes
// ==================

/// Create deposit routes
pub fn deposit_routes(state: Arc<DepositState>) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route("/deposit", post(deposit_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn transport_failure(status: StatusCode, message: String) -> DepositReply {
    warn!(event = %Event::TransportFailed, status = status.as_u16(), error = %message);
    (status, Json(DepositResponse::failure(message)))
}

async fn deposit_handler(
    State(state): State<Arc<DepositState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> DepositReply {
    let deposit_id = Uuid::new_v4();

    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return transport_failure(rejection.status(), rejection.body_text()),
    };

    let uploads = match spool_multipart(&mut multipart, state.spool_dir.as_deref()).await {
        Ok(uploads) => uploads,
        Err(e) => return transport_failure(e.status_code(), e.to_string()),
    };

    info!(event = %Event::DepositReceived, deposit_id = %deposit_id, parts = uploads.len());

    let worker_state = Arc::clone(&state);
    let outcome =
        match tokio::task::spawn_blocking(move || worker_state.validator.validate(uploads)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(deposit_id = %deposit_id, error = %e, "validation worker failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(DepositResponse::failure("Deposit validation failed unexpectedly")),
                );
            }
        };

    if outcome.is_success() {
        info!(event = %Event::DepositAccepted, deposit_id = %deposit_id);
    } else {
        info!(
            event = %Event::DepositRejected,
            deposit_id = %deposit_id,
            phase = ?outcome.failed_phase(),
            violations = outcome.violations().len()
        );
    }

    dispatch(&outcome)
}
