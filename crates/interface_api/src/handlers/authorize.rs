//! Authorization handlers

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use tracing::info;

use domain_authorization::AuthorizeSettings;

use crate::dto::authorize::CallbackParams;
use crate::{error::ApiError, AppState};

/// Where the browser lands after a successful callback
pub const POST_CALLBACK_REDIRECT: &str = "/";

/// Returns the authorize URL as plain text
pub async fn authorize_url(
    State(state): State<AppState>,
    Query(settings): Query<AuthorizeSettings>,
) -> Result<String, ApiError> {
    let url = state.bluebutton.start_authorization(settings).await?;
    Ok(url)
}

/// Completes the authorization and redirects to the application root
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state
        .bluebutton
        .complete_authorization(params.code.as_deref(), params.state.as_deref())
        .await?;

    info!(scopes = token.scope.len(), "Beneficiary authorized");
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, POST_CALLBACK_REDIRECT)],
    ))
}
