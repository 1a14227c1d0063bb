//! Settings the browser sends with an authorize request

use serde::{Deserialize, Serialize};

use core_kernel::{ApiVersion, Environment};

/// Query parameters of `/api/authorize/authurl`
///
/// Missing parameters take the sample's defaults: PKCE on, API v2, sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizeSettings {
    #[serde(default = "default_pkce")]
    pub pkce: bool,
    #[serde(default)]
    pub version: ApiVersion,
    #[serde(default)]
    pub env: Environment,
}

fn default_pkce() -> bool {
    true
}

impl Default for AuthorizeSettings {
    fn default() -> Self {
        Self {
            pkce: default_pkce(),
            version: ApiVersion::default(),
            env: Environment::default(),
        }
    }
}

impl AuthorizeSettings {
    /// Renders the settings as a query string, e.g. `pkce=true&version=v2&env=sandbox`
    pub fn to_query(&self) -> String {
        format!("pkce={}&version={}&env={}", self.pkce, self.version, self.env)
    }
}
