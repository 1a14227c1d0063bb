//! Registered application credentials

use serde::{Deserialize, Serialize};

use crate::error::AuthorizationError;

/// Credentials of the application registered with the upstream API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    pub callback_url: String,
}

impl ClientCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: callback_url.into(),
        }
    }

    /// Checks that every setting is filled in
    ///
    /// # Errors
    ///
    /// Returns `AuthorizationError::MissingSetting` naming the first empty setting.
    pub fn validate(&self) -> Result<(), AuthorizationError> {
        for (name, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("callback_url", &self.callback_url),
        ] {
            if value.trim().is_empty() {
                return Err(AuthorizationError::MissingSetting(name));
            }
        }
        Ok(())
    }
}
