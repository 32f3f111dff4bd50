//! Outcome dispatch
//!
//! Maps a [`ValidationOutcome`] to an HTTP response. Success is `200 OK`,
//! any violation is `400 Bad Request`; both carry the ordered messages.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::deposit::ValidationOutcome;

/// Response body for `POST /deposit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositResponse {
    pub messages: Vec<String>,
    pub success: bool,
}

impl From<&ValidationOutcome> for DepositResponse {
    fn from(outcome: &ValidationOutcome) -> Self {
        Self {
            messages: outcome.messages(),
            success: outcome.is_success(),
        }
    }
}

impl DepositResponse {
    /// Failure body carrying a single transport-level message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
            success: false,
        }
    }
}

/// Status code and body for a finished validation run
pub fn dispatch(outcome: &ValidationOutcome) -> (StatusCode, Json<DepositResponse>) {
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(DepositResponse::from(outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposit::{DepositValidator, UploadSet};

    #[test]
    fn test_failure_dispatch() {
        let outcome = DepositValidator::new().validate(UploadSet::new());
        let (status, Json(body)) = dispatch(&outcome);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.messages, vec!["Missing manifest part"]);
    }

    #[test]
    fn test_success_dispatch() {
        let outcome =
            DepositValidator::new().validate_with_manifest(br#"{"objects": []}"#, UploadSet::new());
        let (status, Json(body)) = dispatch(&outcome);

        assert_eq!(status, StatusCode::OK);
        assert!(body.success);
        assert!(body.messages.is_empty());
    }

    #[test]
    fn test_body_shape() {
        let json = serde_json::to_value(DepositResponse::failure("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"messages": ["boom"], "success": false}));
    }
}
