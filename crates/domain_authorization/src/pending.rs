//! Pending authorizations awaiting their callback

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::callback::validate_callback;
use crate::error::AuthorizationError;
use crate::pkce::AuthData;
use crate::settings::AuthorizeSettings;

/// How long an issued authorize URL may wait for its callback
pub const PENDING_TTL_MINUTES: i64 = 10;

/// Auth data issued with an authorize URL, kept until the callback arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAuthorization {
    pub auth_data: AuthData,
    pub settings: AuthorizeSettings,
    pub created_at: DateTime<Utc>,
}

impl PendingAuthorization {
    pub fn new(auth_data: AuthData, settings: AuthorizeSettings) -> Self {
        Self {
            auth_data,
            settings,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired_at(&self, ttl: TimeDelta, at: DateTime<Utc>) -> bool {
        self.created_at + ttl <= at
    }
}

/// In-memory store keyed by the `state` parameter
///
/// Entries older than the TTL are dropped whenever the store is written to,
/// so abandoned authorizations do not accumulate.
#[derive(Debug)]
pub struct PendingAuthorizations {
    inner: RwLock<HashMap<String, PendingAuthorization>>,
    ttl: TimeDelta,
}

impl Default for PendingAuthorizations {
    fn default() -> Self {
        Self::with_ttl(TimeDelta::minutes(PENDING_TTL_MINUTES))
    }
}

impl PendingAuthorizations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: TimeDelta) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    pub async fn insert(&self, pending: PendingAuthorization) {
        let state = pending.auth_data.state.clone();
        debug!(settings = %pending.settings.to_query(), "Authorization pending");

        let mut inner = self.inner.write().await;
        self.evict_expired(&mut inner, Utc::now());
        inner.insert(state, pending);
    }

    /// Removes and returns the authorization issued with `state`
    ///
    /// An authorization past the TTL is removed but not returned.
    pub async fn take(&self, state: &str) -> Option<PendingAuthorization> {
        let now = Utc::now();
        let mut inner = self.inner.write().await;
        self.evict_expired(&mut inner, now);
        inner.remove(state)
    }

    fn evict_expired(&self, inner: &mut HashMap<String, PendingAuthorization>, now: DateTime<Utc>) {
        let before = inner.len();
        inner.retain(|_, pending| !pending.is_expired_at(self.ttl, now));
        let evicted = before - inner.len();
        if evicted > 0 {
            info!(evicted, "Expired pending authorizations dropped");
        }
    }

    /// Validates callback parameters and claims the matching authorization
    ///
    /// Returns the authorization code together with the claimed pending
    /// authorization. An unknown or expired state is reported as a mismatch.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`validate_callback`], in the same order.
    pub async fn complete(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<(String, PendingAuthorization), AuthorizationError> {
        if code.map_or(true, str::is_empty) {
            return Err(AuthorizationError::MissingCode);
        }
        let state = state
            .filter(|s| !s.is_empty())
            .ok_or(AuthorizationError::MissingState)?;

        let pending = self.take(state).await.ok_or(AuthorizationError::StateMismatch)?;
        let code = validate_callback(&pending.auth_data, code, Some(state))?;
        Ok((code.to_string(), pending))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
