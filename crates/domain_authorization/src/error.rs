//! Authorization domain errors

use thiserror::Error;

/// Errors that can occur while authorizing against the upstream API
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Authorization code missing.")]
    MissingCode,

    #[error("Callback parameter 'state' missing.")]
    MissingState,

    #[error("Provided callback state does not match.")]
    StateMismatch,

    #[error("Configuration setting \"{0}\" is missing")]
    MissingSetting(&'static str),

    #[error("No authorization token. Authorize first.")]
    NotAuthorized,

    #[error("Access token expired and no refresh token is available")]
    RefreshUnavailable,

    #[error("Token lifetime of {0} seconds is out of range")]
    InvalidExpiry(i64),
}
