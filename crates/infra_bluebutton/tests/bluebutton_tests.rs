//! Tests for the Blue Button client against a local stub upstream

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;

use core_kernel::{AdapterHealth, ApiVersion, Environment, HealthCheckable};
use domain_authorization::{AuthorizationError, AuthorizationToken, AuthorizeSettings};
use domain_claims::{normalize, BenefitPort, ClaimsOutcome};
use infra_bluebutton::{
    AuthorizedSession, BlueButtonBenefitAdapter, BlueButtonClient, BlueButtonConfig, FhirResource,
    UpstreamError,
};
use test_utils::{
    BundleFixtures, ResourceFixtures, StubUpstream, TokenFixtures, REJECTED_CODE,
    UNBOUNDED_EXPIRY_CODE,
};

const CALLBACK_URL: &str = "http://localhost:3001/api/bluebutton/callback";

fn local_settings(pkce: bool) -> AuthorizeSettings {
    AuthorizeSettings {
        pkce,
        version: ApiVersion::V2,
        env: Environment::Local,
    }
}

fn client_for(stub: &StubUpstream) -> Arc<BlueButtonClient> {
    let config = BlueButtonConfig::new("client-abc", "secret-xyz", CALLBACK_URL)
        .local_base_url(stub.base_url())
        .request_timeout(Duration::from_secs(5));
    Arc::new(BlueButtonClient::new(config).unwrap())
}

fn state_of(url: &str) -> String {
    url.split('&')
        .find_map(|pair| pair.strip_prefix("state="))
        .map(str::to_string)
        .unwrap()
}

async fn authorized_client(stub: &StubUpstream) -> Arc<BlueButtonClient> {
    let client = client_for(stub);
    let url = client.start_authorization(local_settings(true)).await.unwrap();
    client
        .complete_authorization(Some("code-123"), Some(&state_of(&url)))
        .await
        .unwrap();
    client
}

fn expired_session(refresh_token: Option<&str>) -> AuthorizedSession {
    AuthorizedSession {
        token: AuthorizationToken {
            access_token: "stale-token".to_string(),
            expires_in: 36000,
            expires_at: Utc::now() - chrono::Duration::seconds(1),
            token_type: "Bearer".to_string(),
            scope: vec![],
            refresh_token: refresh_token.map(str::to_string),
            patient: Some(TokenFixtures::PATIENT.to_string()),
        },
        settings: local_settings(true),
    }
}

// ============================================================================
// Authorization Flow Tests
// ============================================================================

mod authorization_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_authorize_url_points_at_local_base() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);

        let url = client.start_authorization(local_settings(true)).await.unwrap();

        assert!(url.starts_with(&format!("{}/v2/o/authorize?client_id=client-abc&", stub.base_url())));
        assert!(url.contains("code_challenge_method=S256"));
        assert_eq!(client.pending().len().await, 1);
    }

    #[tokio::test]
    async fn test_code_exchange_sends_pkce_and_sdk_header() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = authorized_client(&stub).await;

        let requests = stub.token_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.version, "v2");
        assert_eq!(request.sdk_header.as_deref(), Some("rust"));
        assert_eq!(request.form["grant_type"], "authorization_code");
        assert_eq!(request.form["code"], "code-123");
        assert_eq!(request.form["redirect_uri"], CALLBACK_URL);
        assert_eq!(request.form["client_id"], "client-abc");
        assert_eq!(request.form["client_secret"], "secret-xyz");
        assert!(request.form.contains_key("code_verifier"));
        assert!(request.form.contains_key("code_challenge"));

        let session = client.session().await.unwrap();
        assert_eq!(session.token.access_token, TokenFixtures::ACCESS_TOKEN);
        assert_eq!(session.token.patient.as_deref(), Some(TokenFixtures::PATIENT));
        assert_eq!(session.token.scope.len(), 4);
    }

    #[tokio::test]
    async fn test_code_exchange_without_pkce_omits_verifier() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);

        let url = client.start_authorization(local_settings(false)).await.unwrap();
        client
            .complete_authorization(Some("code-123"), Some(&state_of(&url)))
            .await
            .unwrap();

        let request = &stub.token_requests()[0];
        assert!(!request.form.contains_key("code_verifier"));
        assert!(!request.form.contains_key("code_challenge"));
    }

    #[tokio::test]
    async fn test_forged_state_is_rejected_before_exchange() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        client.start_authorization(local_settings(true)).await.unwrap();

        let error = client
            .complete_authorization(Some("code-123"), Some("forged"))
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            UpstreamError::Authorization(AuthorizationError::StateMismatch)
        ));
        assert!(stub.token_requests().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_code_surfaces_status() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        let url = client.start_authorization(local_settings(true)).await.unwrap();

        let error = client
            .complete_authorization(Some(REJECTED_CODE), Some(&state_of(&url)))
            .await
            .unwrap_err();

        assert!(matches!(error, UpstreamError::Status { status: 400, .. }));
        assert!(client.session().await.is_none());
    }

    #[tokio::test]
    async fn test_unbounded_token_lifetime_is_invalid_response() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        let url = client.start_authorization(local_settings(true)).await.unwrap();

        let error = client
            .complete_authorization(Some(UNBOUNDED_EXPIRY_CODE), Some(&state_of(&url)))
            .await
            .unwrap_err();

        assert!(matches!(error, UpstreamError::InvalidResponse(ref m) if m.contains("out of range")));
        assert!(client.session().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_credentials_block_authorization() {
        let client = BlueButtonClient::new(BlueButtonConfig::new("", "secret", CALLBACK_URL)).unwrap();

        let error = client
            .start_authorization(AuthorizeSettings::default())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            UpstreamError::Authorization(AuthorizationError::MissingSetting("client_id"))
        ));
    }
}

// ============================================================================
// Benefit Adapter Tests
// ============================================================================

mod benefit_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_benefits_normalizes_to_records() {
        let stub = StubUpstream::spawn().await.unwrap();
        let adapter = BlueButtonBenefitAdapter::new(authorized_client(&stub).await);

        let bundle = adapter.fetch_benefits().await.unwrap();
        let outcome = normalize(&bundle);

        assert_eq!(outcome.records().len(), 2);
        assert_eq!(
            stub.eob_authorizations(),
            vec![Some(format!("Bearer {}", TokenFixtures::ACCESS_TOKEN))]
        );
    }

    #[tokio::test]
    async fn test_message_bundle_reaches_error_branch() {
        let stub = StubUpstream::spawn_with_bundle(BundleFixtures::error_message("boom"))
            .await
            .unwrap();
        let adapter = BlueButtonBenefitAdapter::new(authorized_client(&stub).await);

        let outcome = normalize(&adapter.fetch_benefits().await.unwrap());

        assert!(matches!(outcome, ClaimsOutcome::Error(ref e) if e.content == "boom"));
    }

    #[tokio::test]
    async fn test_unauthorized_without_session() {
        let stub = StubUpstream::spawn().await.unwrap();
        let adapter = BlueButtonBenefitAdapter::new(client_for(&stub));

        let error = adapter.fetch_benefits().await.unwrap_err();

        assert!(error.is_unauthorized());
        assert!(stub.eob_authorizations().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_before_fetch() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        client
            .set_session(expired_session(Some(TokenFixtures::REFRESH_TOKEN)))
            .await;
        let adapter = BlueButtonBenefitAdapter::new(client.clone());

        adapter.fetch_benefits().await.unwrap();

        let refresh = &stub.token_requests()[0];
        assert_eq!(refresh.form["grant_type"], "refresh_token");
        assert_eq!(refresh.form["refresh_token"], TokenFixtures::REFRESH_TOKEN);
        assert_eq!(refresh.form["client_id"], "client-abc");
        assert!(refresh.authorization.as_deref().unwrap().starts_with("Basic "));
        assert_eq!(
            stub.eob_authorizations(),
            vec![Some(format!("Bearer {}", TokenFixtures::REFRESHED_ACCESS_TOKEN))]
        );

        let session = client.session().await.unwrap();
        assert_eq!(session.token.access_token, TokenFixtures::REFRESHED_ACCESS_TOKEN);
        assert_eq!(session.token.scope, vec!["patient/ExplanationOfBenefit.read".to_string()]);
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_token_is_unauthorized() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        client.set_session(expired_session(None)).await;

        let error = BlueButtonBenefitAdapter::new(client)
            .fetch_benefits()
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
        assert!(stub.token_requests().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_bearer_is_unauthorized() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        let mut session = expired_session(None);
        session.token.expires_at = Utc::now() + chrono::Duration::hours(1);
        client.set_session(session).await;

        let error = BlueButtonBenefitAdapter::new(client)
            .fetch_benefits()
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
    }

    #[tokio::test]
    async fn test_health_reflects_session() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        let adapter = BlueButtonBenefitAdapter::new(client.clone());

        assert_eq!(adapter.health_check().await.status, AdapterHealth::Degraded);

        client.set_session(expired_session(None)).await;
        let expired = adapter.health_check().await;
        assert_eq!(expired.message.as_deref(), Some("Access token expired"));

        client.clear_session().await;
        stub.set_bundle(json!({}));
        let adapter = BlueButtonBenefitAdapter::new(authorized_client(&stub).await);
        assert_eq!(adapter.health_check().await.status, AdapterHealth::Healthy);
    }
}

// ============================================================================
// Resource Fetch Tests
// ============================================================================

mod resource_fetch_tests {
    use super::*;

    #[tokio::test]
    async fn test_patient_coverage_and_profile() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = authorized_client(&stub).await;

        assert_eq!(client.fetch_patient().await.unwrap(), ResourceFixtures::patient());
        assert_eq!(client.fetch_coverage().await.unwrap(), ResourceFixtures::coverage());
        assert_eq!(client.fetch_profile().await.unwrap(), ResourceFixtures::profile());

        let requested: Vec<String> = stub
            .resource_requests()
            .into_iter()
            .map(|request| request.resource)
            .collect();
        assert_eq!(requested, vec!["Patient", "Coverage", "Profile"]);
        assert!(stub.resource_requests().iter().all(|request| {
            request.authorization == Some(format!("Bearer {}", TokenFixtures::ACCESS_TOKEN))
        }));
    }

    #[tokio::test]
    async fn test_custom_path_reaches_upstream() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = authorized_client(&stub).await;

        let value = client
            .fetch_resource(FhirResource::Custom("/fhir/Patient/".to_string()))
            .await
            .unwrap();

        assert_eq!(value, ResourceFixtures::patient());
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_before_patient_fetch() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);
        client
            .set_session(expired_session(Some(TokenFixtures::REFRESH_TOKEN)))
            .await;

        client.fetch_patient().await.unwrap();

        assert_eq!(stub.token_requests()[0].form["grant_type"], "refresh_token");
        assert_eq!(
            stub.resource_requests()[0].authorization,
            Some(format!("Bearer {}", TokenFixtures::REFRESHED_ACCESS_TOKEN))
        );
    }

    #[tokio::test]
    async fn test_profile_requires_authorization() {
        let stub = StubUpstream::spawn().await.unwrap();
        let client = client_for(&stub);

        let error = client.fetch_profile().await.unwrap_err();

        assert!(error.is_unauthorized());
        assert!(stub.resource_requests().is_empty());
    }
}
