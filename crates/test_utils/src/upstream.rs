//! Stub Upstream Server
//!
//! A minimal stand-in for the Blue Button API bound to an ephemeral local
//! port: the OAuth token endpoint, the Patient, Coverage and
//! Explanation-of-Benefit searches, and the userinfo endpoint.
//! Requests are recorded so tests can assert on what the client sent.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::fixtures::{BundleFixtures, ResourceFixtures, TokenFixtures};

/// Authorization code the stub token endpoint rejects
pub const REJECTED_CODE: &str = "rejected-code";

/// Authorization code the stub answers with a token lifetime of `i64::MAX`
pub const UNBOUNDED_EXPIRY_CODE: &str = "unbounded-expiry-code";

/// A request received by the stub token endpoint
#[derive(Debug, Clone)]
pub struct RecordedTokenRequest {
    pub version: String,
    pub form: HashMap<String, String>,
    pub authorization: Option<String>,
    pub sdk_header: Option<String>,
}

/// A resource request received by the stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedResourceRequest {
    pub resource: String,
    pub authorization: Option<String>,
}

/// Shared state of the stub server
#[derive(Debug, Clone)]
pub struct StubState {
    bundle: Arc<Mutex<Value>>,
    token_requests: Arc<Mutex<Vec<RecordedTokenRequest>>>,
    resource_requests: Arc<Mutex<Vec<RecordedResourceRequest>>>,
}

impl StubState {
    fn new(bundle: Value) -> Self {
        Self {
            bundle: Arc::new(Mutex::new(bundle)),
            token_requests: Arc::new(Mutex::new(Vec::new())),
            resource_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Handle to a running stub server
#[derive(Debug, Clone)]
pub struct StubUpstream {
    pub addr: SocketAddr,
    state: StubState,
}

impl StubUpstream {
    /// Starts the stub serving the two-prescription fixture
    pub async fn spawn() -> std::io::Result<Self> {
        Self::spawn_with_bundle(BundleFixtures::two_prescriptions()).await
    }

    /// Starts the stub serving `bundle` from the EOB endpoint
    pub async fn spawn_with_bundle(bundle: Value) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = StubState::new(bundle);
        let app = router(state.clone());

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::warn!(error = %e, "Stub upstream stopped");
            }
        });

        Ok(Self { addr, state })
    }

    /// Base URL to configure as the local environment
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Replaces the EOB response body
    pub fn set_bundle(&self, bundle: Value) {
        *self.state.bundle.lock().expect("stub lock") = bundle;
    }

    pub fn token_requests(&self) -> Vec<RecordedTokenRequest> {
        self.state.token_requests.lock().expect("stub lock").clone()
    }

    pub fn resource_requests(&self) -> Vec<RecordedResourceRequest> {
        self.state.resource_requests.lock().expect("stub lock").clone()
    }

    /// `Authorization` headers of the EOB requests received so far
    pub fn eob_authorizations(&self) -> Vec<Option<String>> {
        self.resource_requests()
            .into_iter()
            .filter(|request| request.resource == "ExplanationOfBenefit")
            .map(|request| request.authorization)
            .collect()
    }
}

fn router(state: StubState) -> Router {
    Router::new()
        .route("/:version/o/token/", post(token))
        .route("/:version/fhir/ExplanationOfBenefit/", get(explanation_of_benefit))
        .route("/:version/fhir/Patient/", get(patient))
        .route("/:version/fhir/Coverage/", get(coverage))
        .route("/:version/connect/userinfo", get(userinfo))
        .with_state(state)
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

async fn token(
    State(state): State<StubState>,
    Path(version): Path<String>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let grant_type = form.get("grant_type").cloned().unwrap_or_default();
    let code = form.get("code").cloned().unwrap_or_default();

    state.token_requests.lock().expect("stub lock").push(RecordedTokenRequest {
        version,
        form,
        authorization: header(&headers, "authorization"),
        sdk_header: header(&headers, "x-bluebutton-sdk"),
    });

    match grant_type.as_str() {
        "refresh_token" => (StatusCode::OK, Json(TokenFixtures::refresh_response())),
        "authorization_code" if code == UNBOUNDED_EXPIRY_CODE => {
            let mut body = TokenFixtures::token_response();
            body["expires_in"] = json!(i64::MAX);
            (StatusCode::OK, Json(body))
        }
        "authorization_code" if code != REJECTED_CODE => {
            (StatusCode::OK, Json(TokenFixtures::token_response()))
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        ),
    }
}

/// Records the request and answers with `body` if the bearer token is known
fn serve_resource(
    state: &StubState,
    resource: &str,
    headers: &HeaderMap,
    body: impl FnOnce() -> Value,
) -> (StatusCode, Json<Value>) {
    let authorization = header(headers, "authorization");
    state
        .resource_requests
        .lock()
        .expect("stub lock")
        .push(RecordedResourceRequest {
            resource: resource.to_string(),
            authorization: authorization.clone(),
        });

    let accepted = [
        format!("Bearer {}", TokenFixtures::ACCESS_TOKEN),
        format!("Bearer {}", TokenFixtures::REFRESHED_ACCESS_TOKEN),
    ];
    match authorization {
        Some(value) if accepted.contains(&value) => (StatusCode::OK, Json(body())),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Authentication credentials were not provided." })),
        ),
    }
}

async fn explanation_of_benefit(
    State(state): State<StubState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    serve_resource(&state, "ExplanationOfBenefit", &headers, || {
        state.bundle.lock().expect("stub lock").clone()
    })
}

async fn patient(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    serve_resource(&state, "Patient", &headers, ResourceFixtures::patient)
}

async fn coverage(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    serve_resource(&state, "Coverage", &headers, ResourceFixtures::coverage)
}

async fn userinfo(State(state): State<StubState>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    serve_resource(&state, "Profile", &headers, ResourceFixtures::profile)
}
