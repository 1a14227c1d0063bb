//! Authorization Domain
//!
//! This crate implements the OAuth2 authorization-code flow against the Blue
//! Button API, from building the authorize URL to holding the access token.
//!
//! # Flow
//!
//! ```text
//! AuthorizeSettings -> AuthData (state + PKCE) -> authorize URL
//!   -> browser redirect -> callback(code, state) -> validate -> token exchange
//!   -> AuthorizationToken (refreshed when expired)
//! ```
//!
//! Token exchange itself is HTTP and lives in `infra_bluebutton`; this crate
//! holds the pure parts and the in-memory pending-authorization store.

pub mod settings;
pub mod credentials;
pub mod pkce;
pub mod authorize;
pub mod callback;
pub mod token;
pub mod pending;
pub mod command;
pub mod error;

pub use settings::AuthorizeSettings;
pub use credentials::ClientCredentials;
pub use pkce::AuthData;
pub use authorize::{authorize_url, token_url};
pub use callback::validate_callback;
pub use token::{AuthorizationToken, TokenResponse};
pub use pending::{PendingAuthorization, PendingAuthorizations};
pub use command::{AuthorizeCommand, NavigationEffect};
pub use error::AuthorizationError;
