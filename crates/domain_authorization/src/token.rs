//! Access token model

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthorizationError;

/// `scope` arrives either space-separated or as a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum ScopeField {
    List(Vec<String>),
    Joined(String),
}

impl From<ScopeField> for Vec<String> {
    fn from(scope: ScopeField) -> Self {
        match scope {
            ScopeField::List(items) => items,
            ScopeField::Joined(joined) => joined.split_whitespace().map(str::to_string).collect(),
        }
    }
}

fn deserialize_scope<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<ScopeField>::deserialize(deserializer)?
        .map(Vec::from)
        .unwrap_or_default())
}

/// Body returned by the token endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, deserialize_with = "deserialize_scope")]
    pub scope: Vec<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub patient: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Token held for the authorized beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationToken {
    pub access_token: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
    pub scope: Vec<String>,
    pub refresh_token: Option<String>,
    pub patient: Option<String>,
}

impl AuthorizationToken {
    /// Builds a token whose expiry is `now + expires_in` seconds
    ///
    /// # Errors
    ///
    /// Returns `AuthorizationError::InvalidExpiry` when the expiry cannot be
    /// represented as a timestamp.
    pub fn from_response(
        response: TokenResponse,
        now: DateTime<Utc>,
    ) -> Result<Self, AuthorizationError> {
        let expires_at = TimeDelta::try_seconds(response.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(AuthorizationError::InvalidExpiry(response.expires_in))?;

        Ok(Self {
            expires_at,
            access_token: response.access_token,
            expires_in: response.expires_in,
            token_type: response.token_type,
            scope: response.scope,
            refresh_token: response.refresh_token,
            patient: response.patient,
        })
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, at: DateTime<Utc>) -> bool {
        self.expires_at <= at
    }

    /// Value of the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scope_accepts_string_and_list() {
        let joined: TokenResponse = serde_json::from_value(json!({
            "access_token": "a", "expires_in": 10, "scope": "profile patient/Patient.read"
        }))
        .unwrap();
        let listed: TokenResponse = serde_json::from_value(json!({
            "access_token": "a", "expires_in": 10, "scope": ["profile", "patient/Patient.read"]
        }))
        .unwrap();

        assert_eq!(joined.scope, listed.scope);
        assert_eq!(joined.token_type, "Bearer");
        assert!(joined.refresh_token.is_none());
    }

    #[test]
    fn test_expiry_is_relative_to_issue_time() {
        let now = Utc::now();
        let response: TokenResponse =
            serde_json::from_value(json!({ "access_token": "a", "expires_in": 60 })).unwrap();
        let token = AuthorizationToken::from_response(response, now).unwrap();

        assert!(!token.is_expired_at(now + TimeDelta::seconds(59)));
        assert!(token.is_expired_at(now + TimeDelta::seconds(60)));
        assert_eq!(token.bearer(), "Bearer a");
    }

    #[test]
    fn test_out_of_range_lifetime_is_rejected() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "a", "expires_in": i64::MAX
        }))
        .unwrap();

        assert_eq!(
            AuthorizationToken::from_response(response, Utc::now()),
            Err(AuthorizationError::InvalidExpiry(i64::MAX))
        );
    }

    #[test]
    fn test_lifetime_past_the_calendar_end_is_rejected() {
        let response: TokenResponse = serde_json::from_value(json!({
            "access_token": "a", "expires_in": i64::MAX / 1000
        }))
        .unwrap();

        assert!(AuthorizationToken::from_response(response, Utc::now()).is_err());
    }
}
