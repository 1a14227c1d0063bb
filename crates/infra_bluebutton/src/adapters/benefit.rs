//! Blue Button Benefit Adapter
//!
//! Implements `BenefitPort` on top of [`BlueButtonClient`], translating
//! upstream errors into port errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_bluebutton::adapters::BlueButtonBenefitAdapter;
//! use domain_claims::BenefitPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn BenefitPort> = Arc::new(BlueButtonBenefitAdapter::new(client));
//! let bundle = port.fetch_benefits().await?;
//! ```

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{BenefitPort, RawClaimsBundle};

use crate::client::BlueButtonClient;

const ADAPTER_ID: &str = "bluebutton-benefit-adapter";

/// Upstream-backed implementation of `BenefitPort`
#[derive(Debug, Clone)]
pub struct BlueButtonBenefitAdapter {
    client: Arc<BlueButtonClient>,
}

impl BlueButtonBenefitAdapter {
    pub fn new(client: Arc<BlueButtonClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<BlueButtonClient> {
        &self.client
    }
}

impl DomainPort for BlueButtonBenefitAdapter {}

#[async_trait]
impl HealthCheckable for BlueButtonBenefitAdapter {
    /// Reports the session state without calling the upstream
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let session = self.client.session().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match session {
            Some(session) if !session.token.is_expired() => {
                HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Healthy, latency_ms)
            }
            Some(_) => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Degraded, latency_ms)
                .with_message("Access token expired"),
            None => HealthCheckResult::new(ADAPTER_ID, AdapterHealth::Degraded, latency_ms)
                .with_message("Not authorized"),
        }
    }
}

#[async_trait]
impl BenefitPort for BlueButtonBenefitAdapter {
    #[instrument(skip(self))]
    async fn fetch_benefits(&self) -> Result<RawClaimsBundle, PortError> {
        debug!("Fetching Explanation-of-Benefit bundle");
        let value = self.client.fetch_eob().await.map_err(PortError::from)?;
        Ok(RawClaimsBundle::new(value))
    }
}
