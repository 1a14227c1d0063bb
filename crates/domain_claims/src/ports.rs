//! Claims Domain Ports
//!
//! `BenefitPort` is the source of benefits responses. The upstream adapter in
//! `infra_bluebutton` fetches Explanation-of-Benefit bundles from the Blue
//! Button API; the mock adapter returns a fixed response for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::{normalize, BenefitPort};
//!
//! let bundle = port.fetch_benefits().await?;
//! let outcome = normalize(&bundle);
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::bundle::RawClaimsBundle;

/// Source of benefits (Explanation-of-Benefit) responses
#[async_trait]
pub trait BenefitPort: DomainPort + HealthCheckable {
    /// Fetches the current beneficiary's claims bundle
    ///
    /// Upstream error bodies that parse as JSON are returned as bundles, not
    /// as errors, so their `message` reaches the normalizer.
    async fn fetch_benefits(&self) -> Result<RawClaimsBundle, PortError>;
}

/// Mock implementation of BenefitPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use core_kernel::{AdapterHealth, HealthCheckResult};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted response of the mock port
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        Bundle(Value),
        Unauthorized(String),
        Unavailable,
    }

    /// In-memory mock implementation of BenefitPort
    #[derive(Debug)]
    pub struct MockBenefitPort {
        response: Mutex<MockResponse>,
        calls: AtomicUsize,
    }

    impl MockBenefitPort {
        /// Creates a port that always returns `bundle`
        pub fn with_bundle(bundle: Value) -> Self {
            Self::with_response(MockResponse::Bundle(bundle))
        }

        pub fn with_response(response: MockResponse) -> Self {
            Self {
                response: Mutex::new(response),
                calls: AtomicUsize::new(0),
            }
        }

        /// Replaces the scripted response
        pub fn set_response(&self, response: MockResponse) {
            if let Ok(mut current) = self.response.lock() {
                *current = response;
            }
        }

        /// Number of fetches served so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl DomainPort for MockBenefitPort {}

    #[async_trait]
    impl HealthCheckable for MockBenefitPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("mock-benefit-port", AdapterHealth::Healthy, 0)
                .with_message("Mock adapter always healthy")
        }
    }

    #[async_trait]
    impl BenefitPort for MockBenefitPort {
        async fn fetch_benefits(&self) -> Result<RawClaimsBundle, PortError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            let response = self
                .response
                .lock()
                .map_err(|_| PortError::internal("mock response lock poisoned"))?
                .clone();

            match response {
                MockResponse::Bundle(value) => Ok(RawClaimsBundle::new(value)),
                MockResponse::Unauthorized(message) => Err(PortError::unauthorized(message)),
                MockResponse::Unavailable => Err(PortError::ServiceUnavailable {
                    service: "mock-benefit-port".to_string(),
                }),
            }
        }
    }
}
