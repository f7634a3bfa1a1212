use std::time::Duration;

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use devstats_core::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

/// Message returned for failures whose detail must not reach the client.
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound(String),
    #[error("Invalid username")]
    BadRequest(String),
    #[error("Invalid request")]
    InvalidQuery(String),
    #[error("Request timed out")]
    Timeout(Duration),
    /// `context` names the failed operation, e.g. "Failed to fetch GitHub data".
    #[error("{context}")]
    Upstream {
        context: &'static str,
        message: String,
    },
    #[error("Internal server error")]
    Internal,
}

/// The failure envelope shared by every endpoint.
#[derive(Serialize, Debug, Clone)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ApiError {
    /// Wraps a core error, tagging upstream failures with `context`.
    pub fn from_core(err: CoreError, context: &'static str) -> Self {
        match err {
            CoreError::NotFound(username) => {
                ApiError::UserNotFound(format!("No user named '{}'", username))
            }
            CoreError::InvalidUsername(username) => ApiError::BadRequest(format!(
                "'{}' is not a valid username",
                username
            )),
            CoreError::Upstream(message) => ApiError::Upstream { context, message },
            CoreError::Internal(message) => {
                tracing::error!("Internal failure: {}", message);
                ApiError::Internal
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Upstream { .. } | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        let message = match self {
            ApiError::UserNotFound(message)
            | ApiError::BadRequest(message)
            | ApiError::InvalidQuery(message) => message.clone(),
            ApiError::Timeout(limit) => {
                format!("No response within {} ms", limit.as_millis())
            }
            ApiError::Upstream { message, .. } => message.clone(),
            ApiError::Internal => GENERIC_FAILURE_MESSAGE.to_string(),
        };
        ErrorBody {
            success: false,
            error: self.to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from_core(
            CoreError::NotFound("ghost_user_404".to_string()),
            "Failed to fetch LeetCode data",
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let body = err.body();
        assert!(!body.success);
        assert_eq!(body.error, "User not found");
    }

    #[test]
    fn test_upstream_keeps_context() {
        let err = ApiError::from_core(
            CoreError::Upstream("Timeout: GITHUB_CONTRIBUTIONS".to_string()),
            "Failed to fetch GitHub data",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = err.body();
        assert_eq!(body.error, "Failed to fetch GitHub data");
        assert_eq!(body.message, "Timeout: GITHUB_CONTRIBUTIONS");
    }

    #[test]
    fn test_timeout_is_gateway_timeout() {
        let err = ApiError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
        let body = err.body();
        assert_eq!(body.error, "Request timed out");
        assert_eq!(body.message, "No response within 1500 ms");
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = ApiError::from_core(
            CoreError::Internal("index out of bounds at reshape".to_string()),
            "Failed to fetch GitHub data",
        );
        let body = err.body();
        assert_eq!(body.error, "Internal server error");
        assert_eq!(body.message, GENERIC_FAILURE_MESSAGE);
    }
}
