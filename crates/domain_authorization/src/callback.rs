//! Callback validation

use crate::error::AuthorizationError;
use crate::pkce::AuthData;

/// Validates the parameters of an authorization callback
///
/// Checks run in a fixed order: the code must be present, then the state
/// must be present, then the state must match the one issued with the
/// authorize URL. Empty strings count as missing.
///
/// # Errors
///
/// Returns the first failed check as `MissingCode`, `MissingState` or
/// `StateMismatch`.
pub fn validate_callback<'a>(
    auth_data: &AuthData,
    code: Option<&'a str>,
    state: Option<&str>,
) -> Result<&'a str, AuthorizationError> {
    let code = code
        .filter(|c| !c.is_empty())
        .ok_or(AuthorizationError::MissingCode)?;
    let state = state
        .filter(|s| !s.is_empty())
        .ok_or(AuthorizationError::MissingState)?;

    if state != auth_data.state {
        return Err(AuthorizationError::StateMismatch);
    }

    Ok(code)
}
