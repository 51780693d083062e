//! Mapping of failures to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use super::ApiResponse;
use crate::shared::errors::{DomainError, DUPLICATE_NAME_MESSAGE};

pub type ApiResult<T> = Result<T, ApiError>;

/// Every failure a handler can return. `IntoResponse` is the single place
/// where a failure kind becomes a status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed request input (path, query or body)
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Vec<String>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn invalid(message: impl Into<String>, errors: Vec<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            errors,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Domain(e) => match e {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::DuplicateName(_) => StatusCode::CONFLICT,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest { message, errors } if errors.is_empty() => {
                ApiResponse::error(message)
            }
            ApiError::BadRequest { message, errors } => ApiResponse::with_errors(message, errors),
            ApiError::Domain(DomainError::Validation(errors)) => {
                ApiResponse::with_errors("Validation failed", errors)
            }
            ApiError::Domain(DomainError::NotFound { entity, .. }) => {
                ApiResponse::error(format!("{} not found", entity))
            }
            ApiError::Domain(DomainError::DuplicateName(_)) => {
                ApiResponse::error(DUPLICATE_NAME_MESSAGE)
            }
            ApiError::Domain(DomainError::Internal(detail)) => {
                error!(error = %detail, "Request failed");
                ApiResponse::error("Internal server error")
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::not_found(1), StatusCode::NOT_FOUND),
            (DomainError::DuplicateName("A".into()), StatusCode::CONFLICT),
            (DomainError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let response = ApiError::from(DomainError::Internal("disk I/O error".into())).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Internal server error");
        assert!(!String::from_utf8_lossy(&bytes).contains("disk"));
    }

    #[tokio::test]
    async fn not_found_names_the_entity() {
        let response = ApiError::from(DomainError::not_found(3)).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["message"], "Crustacean not found");
        assert_eq!(body["success"], false);
    }
}
