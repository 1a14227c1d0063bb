//! Upstream error types
//!
//! Errors raised while talking to the Blue Button API, and their translation
//! into the port error shared by all adapters.

use thiserror::Error;

use core_kernel::PortError;
use domain_authorization::AuthorizationError;

/// Errors that can occur during upstream calls
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent or the response could not be read
    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream request timed out after {0}ms")]
    Timeout(u64),

    /// The upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
}

impl UpstreamError {
    pub fn status(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        UpstreamError::Status {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// Checks if the upstream rejected the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        match self {
            UpstreamError::Status { status, .. } => *status == 401 || *status == 403,
            UpstreamError::Authorization(
                AuthorizationError::NotAuthorized | AuthorizationError::RefreshUnavailable,
            ) => true,
            _ => false,
        }
    }
}

impl From<UpstreamError> for PortError {
    fn from(error: UpstreamError) -> Self {
        if error.is_unauthorized() {
            return PortError::unauthorized(error.to_string());
        }
        match error {
            UpstreamError::Timeout(duration_ms) => PortError::Timeout {
                operation: "bluebutton request".to_string(),
                duration_ms,
            },
            UpstreamError::Http(e) => PortError::Connection {
                message: e.to_string(),
                source: Some(Box::new(e)),
            },
            UpstreamError::Status { status, .. } if status >= 500 => PortError::ServiceUnavailable {
                service: "bluebutton".to_string(),
            },
            UpstreamError::InvalidResponse(message) => PortError::Transformation { message },
            UpstreamError::Authorization(AuthorizationError::MissingSetting(field)) => {
                PortError::validation_field(
                    AuthorizationError::MissingSetting(field).to_string(),
                    field,
                )
            }
            UpstreamError::Authorization(e) => PortError::validation(e.to_string()),
            other => PortError::internal(other.to_string()),
        }
    }
}
