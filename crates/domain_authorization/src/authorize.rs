//! Authorize and token endpoint URLs

use core_kernel::ApiVersion;

use crate::credentials::ClientCredentials;
use crate::pkce::{AuthData, CODE_CHALLENGE_METHOD};

/// Builds the URL the browser is sent to for consent
///
/// `{base_url}/v{n}/o/authorize?client_id=..&redirect_uri=..&state=..&response_type=code`,
/// followed by `code_challenge_method` and `code_challenge` when `pkce` is set.
/// All values are percent-encoded.
pub fn authorize_url(
    base_url: &str,
    version: ApiVersion,
    credentials: &ClientCredentials,
    auth_data: &AuthData,
    pkce: bool,
) -> String {
    let mut params: Vec<(&str, &str)> = vec![
        ("client_id", &credentials.client_id),
        ("redirect_uri", &credentials.callback_url),
        ("state", &auth_data.state),
        ("response_type", "code"),
    ];
    if pkce {
        params.push(("code_challenge_method", CODE_CHALLENGE_METHOD));
        params.push(("code_challenge", &auth_data.code_challenge));
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}/{}/o/authorize?{}", base_url.trim_end_matches('/'), version, query)
}

/// Returns the token endpoint, used for both code exchange and refresh
pub fn token_url(base_url: &str, version: ApiVersion) -> String {
    format!("{}/{}/o/token/", base_url.trim_end_matches('/'), version)
}
