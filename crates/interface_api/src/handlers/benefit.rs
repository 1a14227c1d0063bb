//! Benefit data handlers

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::warn;

use domain_claims::{normalize, RawClaimsBundle};

use crate::dto::records::RecordsResponse;
use crate::{error::ApiError, AppState};

/// Proxies the beneficiary's Explanation-of-Benefit bundle
///
/// Failures are returned as `{error, message}` so clients can feed the body
/// straight into the normalizer.
pub async fn benefit(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let bundle = state.benefits.fetch_benefits().await?;
    Ok(Json(bundle.into_value()))
}

/// Returns the bundle normalized into claim records
///
/// Fetch failures become the error outcome instead of an error status.
pub async fn records(State(state): State<AppState>) -> Json<RecordsResponse> {
    let bundle = match state.benefits.fetch_benefits().await {
        Ok(bundle) => bundle,
        Err(e) => {
            warn!(error = %e, "Benefits fetch failed");
            RawClaimsBundle::new(ApiError::from(e).body())
        }
    };

    Json(RecordsResponse::from(normalize(&bundle)))
}
