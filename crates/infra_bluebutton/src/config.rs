//! Upstream client configuration

use std::time::Duration;

use core_kernel::Environment;
use domain_authorization::{AuthorizationError, ClientCredentials};

/// Header identifying the SDK on every upstream request
pub const SDK_HEADER_KEY: &str = "X-BLUEBUTTON-SDK";
pub const SDK_HEADER: &str = "rust";

/// Configuration for the Blue Button client
///
/// # Example
///
/// ```rust
/// use infra_bluebutton::BlueButtonConfig;
/// use std::time::Duration;
///
/// let config = BlueButtonConfig::new("id", "secret", "http://localhost:3001/api/bluebutton/callback")
///     .local_base_url("http://127.0.0.1:8000")
///     .request_timeout(Duration::from_secs(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BlueButtonConfig {
    pub credentials: ClientCredentials,
    /// Overrides the base URL of the `local` environment
    pub local_base_url: Option<String>,
    pub request_timeout: Duration,
}

impl BlueButtonConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            credentials: ClientCredentials::new(client_id, client_secret, callback_url),
            local_base_url: None,
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn local_base_url(mut self, url: impl Into<String>) -> Self {
        self.local_base_url = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Rejects empty client id, client secret or callback URL
    pub fn validate(&self) -> Result<(), AuthorizationError> {
        self.credentials.validate()
    }

    /// Base URL of the given environment, honouring the local override
    pub fn base_url(&self, env: Environment) -> String {
        env.resolve_base_url(self.local_base_url.as_deref())
            .trim_end_matches('/')
            .to_string()
    }
}
