//! Blue Button HTTP client
//!
//! Drives the authorization-code flow and fetches the beneficiary's FHIR
//! resources with the resulting access token.

use chrono::Utc;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use domain_authorization::{
    authorize_url, token_url, AuthData, AuthorizationError, AuthorizationToken, AuthorizeSettings,
    PendingAuthorization, PendingAuthorizations, TokenResponse,
};

use crate::config::{BlueButtonConfig, SDK_HEADER, SDK_HEADER_KEY};
use crate::error::UpstreamError;
use crate::resource::FhirResource;

/// Token together with the settings it was obtained with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedSession {
    pub token: AuthorizationToken,
    pub settings: AuthorizeSettings,
}

/// Client for the Blue Button API
#[derive(Debug)]
pub struct BlueButtonClient {
    http: reqwest::Client,
    config: BlueButtonConfig,
    pending: PendingAuthorizations,
    session: RwLock<Option<AuthorizedSession>>,
}

impl BlueButtonClient {
    /// Creates a client with the configured request timeout
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Http` if the HTTP client cannot be built.
    pub fn new(config: BlueButtonConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            pending: PendingAuthorizations::new(),
            session: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &BlueButtonConfig {
        &self.config
    }

    pub fn pending(&self) -> &PendingAuthorizations {
        &self.pending
    }

    // =====================
    // Authorization
    // =====================

    /// Issues fresh auth data and returns the authorize URL for `settings`
    #[instrument(skip(self), fields(env = %settings.env, version = %settings.version, pkce = settings.pkce))]
    pub async fn start_authorization(
        &self,
        settings: AuthorizeSettings,
    ) -> Result<String, UpstreamError> {
        self.config.validate()?;

        let auth_data = AuthData::generate();
        let url = authorize_url(
            &self.config.base_url(settings.env),
            settings.version,
            &self.config.credentials,
            &auth_data,
            settings.pkce,
        );
        self.pending
            .insert(PendingAuthorization::new(auth_data, settings))
            .await;

        info!("Authorize URL issued");
        Ok(url)
    }

    /// Validates callback parameters, exchanges the code and stores the session
    #[instrument(skip_all)]
    pub async fn complete_authorization(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<AuthorizationToken, UpstreamError> {
        let (code, pending) = self.pending.complete(code, state).await?;
        let token = self.exchange_code(&code, &pending).await?;

        self.set_session(AuthorizedSession {
            token: token.clone(),
            settings: pending.settings,
        })
        .await;

        info!(patient = token.patient.as_deref().unwrap_or(""), "Authorization completed");
        Ok(token)
    }

    /// Exchanges an authorization code for an access token
    pub async fn exchange_code(
        &self,
        code: &str,
        pending: &PendingAuthorization,
    ) -> Result<AuthorizationToken, UpstreamError> {
        let settings = pending.settings;
        let credentials = &self.config.credentials;

        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.callback_url.as_str()),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];
        if settings.pkce {
            form.push(("code_verifier", pending.auth_data.code_verifier.as_str()));
            form.push(("code_challenge", pending.auth_data.code_challenge.as_str()));
        }

        let url = token_url(&self.config.base_url(settings.env), settings.version);
        debug!(url = %url, "Exchanging authorization code");

        let response = self.send(self.http.post(&url).form(&form)).await?;
        let token_response = read_token(response).await?;
        issue_token(token_response)
    }

    /// Obtains a new access token with the session's refresh token
    ///
    /// A response without a refresh token keeps the previous one.
    pub async fn refresh(
        &self,
        session: &AuthorizedSession,
    ) -> Result<AuthorizationToken, UpstreamError> {
        let refresh_token = session
            .token
            .refresh_token
            .as_deref()
            .ok_or(AuthorizationError::RefreshUnavailable)?;
        let credentials = &self.config.credentials;
        let url = token_url(
            &self.config.base_url(session.settings.env),
            session.settings.version,
        );

        let request = self
            .http
            .post(&url)
            .basic_auth(&credentials.client_id, Some(credentials.client_secret.as_str()))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", credentials.client_id.as_str()),
            ]);
        let response = self.send(request).await?;

        let mut token = issue_token(read_token(response).await?)?;
        if token.refresh_token.is_none() {
            token.refresh_token = Some(refresh_token.to_string());
        }
        Ok(token)
    }

    // =====================
    // Session
    // =====================

    pub async fn session(&self) -> Option<AuthorizedSession> {
        self.session.read().await.clone()
    }

    pub async fn set_session(&self, session: AuthorizedSession) {
        *self.session.write().await = Some(session);
    }

    pub async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    /// Returns the current session, refreshing an expired token first
    async fn current_session(&self) -> Result<AuthorizedSession, UpstreamError> {
        let session = self
            .session()
            .await
            .ok_or(AuthorizationError::NotAuthorized)?;
        if !session.token.is_expired() {
            return Ok(session);
        }

        info!("Access token expired, refreshing");
        let refreshed = AuthorizedSession {
            token: self.refresh(&session).await?,
            settings: session.settings,
        };
        self.set_session(refreshed.clone()).await;
        Ok(refreshed)
    }

    // =====================
    // FHIR Resources
    // =====================

    /// Fetches `resource` for the authorized beneficiary
    ///
    /// An expired access token is refreshed first. Error responses whose
    /// JSON body carries a `message` are returned as the body itself so the
    /// message reaches the caller's error display.
    #[instrument(skip(self), fields(resource = %resource))]
    pub async fn fetch_resource(&self, resource: FhirResource) -> Result<Value, UpstreamError> {
        let session = self.current_session().await?;
        let url = format!(
            "{}/{}/{}",
            self.config.base_url(session.settings.env),
            session.settings.version,
            resource.path()
        );

        let request = self
            .http
            .get(&url)
            .header(AUTHORIZATION, session.token.bearer());
        let response = self.send(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map_err(|e| UpstreamError::InvalidResponse(e.to_string()));
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) if value.get("message").is_some() => {
                warn!(status = status.as_u16(), "Upstream returned an error message");
                Ok(value)
            }
            _ => Err(UpstreamError::status(status, body)),
        }
    }

    pub async fn fetch_patient(&self) -> Result<Value, UpstreamError> {
        self.fetch_resource(FhirResource::Patient).await
    }

    pub async fn fetch_coverage(&self) -> Result<Value, UpstreamError> {
        self.fetch_resource(FhirResource::Coverage).await
    }

    /// Fetches the beneficiary's Explanation-of-Benefit bundle
    pub async fn fetch_eob(&self) -> Result<Value, UpstreamError> {
        self.fetch_resource(FhirResource::ExplanationOfBenefit).await
    }

    /// Fetches the userinfo of the beneficiary
    pub async fn fetch_profile(&self) -> Result<Value, UpstreamError> {
        self.fetch_resource(FhirResource::Profile).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, UpstreamError> {
        request
            .header(SDK_HEADER_KEY, SDK_HEADER)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(self.config.request_timeout.as_millis() as u64)
                } else {
                    UpstreamError::Http(e)
                }
            })
    }
}

async fn read_token(response: reqwest::Response) -> Result<TokenResponse, UpstreamError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        warn!(status = status.as_u16(), "Token request rejected");
        return Err(UpstreamError::status(status, body));
    }
    serde_json::from_str(&body).map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
}

fn issue_token(response: TokenResponse) -> Result<AuthorizationToken, UpstreamError> {
    AuthorizationToken::from_response(response, Utc::now())
        .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
}
