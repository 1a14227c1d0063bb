//! HTTP API Layer
//!
//! This crate provides the REST API of the Blue Button claims sample using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: benefit data, normalized records, beneficiary resources,
//!   authorization flow, health
//! - **Middleware**: tracing and request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: `{error, message}` JSON bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(config)?);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_claims::BenefitPort;
use infra_bluebutton::{BlueButtonBenefitAdapter, BlueButtonClient, UpstreamError};

use crate::config::ApiConfig;
use crate::handlers::{authorize, benefit, health, resource};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub bluebutton: Arc<BlueButtonClient>,
    pub benefits: Arc<dyn BenefitPort>,
}

impl AppState {
    /// Builds the upstream client and the benefit adapter on top of it
    pub fn new(config: ApiConfig) -> Result<Self, UpstreamError> {
        let bluebutton = Arc::new(BlueButtonClient::new(config.bluebutton())?);
        let benefits: Arc<dyn BenefitPort> =
            Arc::new(BlueButtonBenefitAdapter::new(bluebutton.clone()));
        Ok(Self {
            config,
            bluebutton,
            benefits,
        })
    }

    /// Replaces the benefit source, keeping the authorization client
    pub fn with_benefits(mut self, benefits: Arc<dyn BenefitPort>) -> Self {
        self.benefits = benefits;
        self
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/data/benefit", get(benefit::benefit))
        .route("/data/records", get(benefit::records))
        .route("/data/patient", get(resource::patient))
        .route("/data/coverage", get(resource::coverage))
        .route("/data/profile", get(resource::profile))
        .route("/authorize/authurl", get(authorize::authorize_url))
        .route("/bluebutton/callback", get(authorize::callback))
        .route("/bluebutton/callback/", get(authorize::callback))
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
