//! Authorize command issued by the client
//!
//! The client asks the server for an authorize URL and then navigates the
//! browser there. Navigation is returned as an explicit effect instead of
//! being performed, so callers decide how to apply it.

use serde::{Deserialize, Serialize};

use crate::settings::AuthorizeSettings;

/// Endpoint that returns the authorize URL as plain text
pub const AUTHORIZE_URL_PATH: &str = "/api/authorize/authurl";

/// Where the browser goes when the server returns no URL
pub const FALLBACK_TARGET: &str = "/";

/// Effect produced by an authorize command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum NavigationEffect {
    Navigate { target: String },
}

impl NavigationEffect {
    pub fn target(&self) -> &str {
        match self {
            Self::Navigate { target } => target,
        }
    }
}

/// Command issued when the user clicks "Authorize"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorizeCommand {
    pub settings: AuthorizeSettings,
}

impl AuthorizeCommand {
    pub fn new(settings: AuthorizeSettings) -> Self {
        Self { settings }
    }

    /// Relative request path, e.g. `/api/authorize/authurl?pkce=true&version=v2&env=sandbox`
    pub fn request_path(&self) -> String {
        format!("{}?{}", AUTHORIZE_URL_PATH, self.settings.to_query())
    }

    /// Turns the server's response body into a navigation effect
    pub fn from_response(body: &str) -> NavigationEffect {
        let target = body.trim();
        let target = if target.is_empty() { FALLBACK_TARGET } else { target };
        NavigationEffect::Navigate {
            target: target.to_string(),
        }
    }
}
