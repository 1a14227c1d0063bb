//! API configuration

use std::time::Duration;

use serde::Deserialize;

use infra_bluebutton::BlueButtonConfig;

/// Optional configuration file, any format the `config` crate recognises
pub const CONFIG_FILE: &str = ".bluebutton-config";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Client id of the registered Blue Button application
    pub client_id: String,
    /// Client secret of the registered Blue Button application
    pub client_secret: String,
    /// Redirect URI registered with the application
    pub callback_url: String,
    /// Base URL used when `env=local`
    pub local_base_url: Option<String>,
    /// Upstream request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            log_level: "info".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            callback_url: "http://localhost:3001/api/bluebutton/callback/".to_string(),
            local_base_url: None,
            request_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `.bluebutton-config.*` and the environment
    ///
    /// Environment variables use the `API_` prefix (`API_CLIENT_ID`,
    /// `API_PORT`, ...) and override file values.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the upstream client
    pub fn bluebutton(&self) -> BlueButtonConfig {
        let config = BlueButtonConfig::new(&self.client_id, &self.client_secret, &self.callback_url)
            .request_timeout(Duration::from_secs(self.request_timeout_secs));
        match &self.local_base_url {
            Some(url) => config.local_base_url(url),
            None => config,
        }
    }
}
