//! Authorization DTOs

use serde::Deserialize;

/// Query parameters of the OAuth callback
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}
