//! Error types for the issuance service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use presence_ticket_core::{IssueError, KeyError, KeyErrorKind, ValidationError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by HTTP handlers.
///
/// Every variant renders as `{ "error": "<message>" }`. Key errors carry
/// only a failure class, so nothing secret can reach a response body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request body or identifiers.
    #[error("{0}")]
    BadRequest(String),

    /// The authority key could not be used.
    #[error(transparent)]
    Key(#[from] KeyError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Key(e) => match e.kind() {
                KeyErrorKind::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                KeyErrorKind::Misconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<IssueError> for ApiError {
    fn from(e: IssueError) -> Self {
        match e {
            IssueError::Validation(e) => e.into(),
            IssueError::Configuration(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        } else {
            warn!(status = %status, error = %self, "request rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("missing event_id".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(KeyError::NotConfigured).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(KeyError::InvalidBase64).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_issue_error_conversion() {
        let err: ApiError = IssueError::Validation(ValidationError::Missing("event_id")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "missing event_id");

        let err: ApiError = IssueError::Configuration(KeyError::UnsupportedScheme("Secp256k1")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
