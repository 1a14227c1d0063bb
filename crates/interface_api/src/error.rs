//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use core_kernel::PortError;
use domain_authorization::AuthorizationError;
use infra_bluebutton::UpstreamError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream error: {0}")]
    BadGateway(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
///
/// `message` is what the records view shows as the error content.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.as_str()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.as_str()),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", msg.as_str()),
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg.as_str())
            }
            ApiError::Configuration(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", msg.as_str())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.as_str()),
        }
    }

    /// The JSON body this error is rendered as
    pub fn body(&self) -> Value {
        let (_, error_type, message) = self.parts();
        json!({ "error": error_type, "message": message })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.parts();

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: message.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthorizationError> for ApiError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::MissingSetting(_) => ApiError::Configuration(err.to_string()),
            AuthorizationError::NotAuthorized | AuthorizationError::RefreshUnavailable => {
                ApiError::Unauthorized(err.to_string())
            }
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Authorization(e) => e.into(),
            UpstreamError::Timeout(_) => ApiError::ServiceUnavailable(err.to_string()),
            other => ApiError::BadGateway(other.to_string()),
        }
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Unauthorized { message } => ApiError::Unauthorized(message),
            PortError::Validation { message, .. } => ApiError::BadRequest(message),
            e if e.is_transient() => ApiError::ServiceUnavailable(e.to_string()),
            e => ApiError::BadGateway(e.to_string()),
        }
    }
}
