//! Beneficiary resource handlers
//!
//! Patient, Coverage and Profile are proxied from the upstream API as-is.

use axum::{extract::State, Json};
use serde_json::Value;

use infra_bluebutton::FhirResource;

use crate::{error::ApiError, AppState};

async fn fetch(state: &AppState, resource: FhirResource) -> Result<Json<Value>, ApiError> {
    let value = state.bluebutton.fetch_resource(resource).await?;
    Ok(Json(value))
}

pub async fn patient(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    fetch(&state, FhirResource::Patient).await
}

pub async fn coverage(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    fetch(&state, FhirResource::Coverage).await
}

/// Userinfo of the authorized beneficiary
pub async fn profile(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    fetch(&state, FhirResource::Profile).await
}
