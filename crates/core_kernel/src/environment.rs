//! Upstream environments and API versions
//!
//! The Blue Button service runs a sandbox and a production deployment, and
//! developers frequently point the sample at a local server. Each deployment
//! serves two API versions under `/v1` and `/v2`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Base URL of the sandbox deployment
pub const SANDBOX_BASE_URL: &str = "https://sandbox.bluebutton.cms.gov";

/// Base URL of the production deployment
pub const PRODUCTION_BASE_URL: &str = "https://api.bluebutton.cms.gov";

/// Default base URL of a locally running server
pub const LOCAL_BASE_URL: &str = "http://localhost:8000";

/// Deployment the sample talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Synthetic beneficiary data
    #[default]
    #[serde(alias = "SANDBOX")]
    Sandbox,
    /// Developer's own server
    #[serde(alias = "LOCAL")]
    Local,
    /// Real beneficiary data
    #[serde(alias = "PRODUCTION")]
    Production,
}

impl Environment {
    /// Returns the default base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Local => LOCAL_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }

    /// Returns the base URL, substituting `local_override` for the local environment
    pub fn resolve_base_url<'a>(&self, local_override: Option<&'a str>) -> &'a str {
        match (self, local_override) {
            (Environment::Local, Some(url)) => url,
            _ => self.base_url(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            _ => Err(CoreError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Version of the Blue Button API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

impl ApiVersion {
    /// Returns the numeric version used in URL paths
    pub fn number(&self) -> u8 {
        match self {
            ApiVersion::V1 => 1,
            ApiVersion::V2 => 2,
        }
    }

    /// Returns the path segment, e.g. `v2`
    pub fn path_segment(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ApiVersion {
    type Err = CoreError;

    /// Accepts `v1`/`v2` as well as the bare numbers used in config files
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(ApiVersion::V1),
            "v2" | "2" => Ok(ApiVersion::V2),
            _ => Err(CoreError::UnsupportedVersion(s.to_string())),
        }
    }
}
