// BizGPT: Credential Exchange
//
// Turns a third-party identity assertion into a locally signed session
// credential: introspect the assertion, read the profile, mint. Two
// sequential provider calls, single attempt each.

use std::sync::Arc;

use log::{info, warn};

use crate::atoms::error::ExchangeError;
use crate::atoms::traits::IdentityProvider;
use crate::atoms::types::{AppCredential, SessionIdentity};
use crate::auth::credential::{CredentialKeys, IssuedCredential};

pub struct CredentialExchange {
    provider: Arc<dyn IdentityProvider>,
    app: Option<AppCredential>,
    keys: Arc<CredentialKeys>,
}

/// What a successful exchange hands back to the caller.
#[derive(Debug, Clone)]
pub struct ExchangeOutcome {
    pub session_credential: String,
    pub profile: SessionIdentity,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<IssuedCredential> for ExchangeOutcome {
    fn from(issued: IssuedCredential) -> Self {
        ExchangeOutcome {
            session_credential: issued.token,
            profile: issued.claims.identity,
            issued_at: issued.claims.iat,
            expires_at: issued.claims.exp,
        }
    }
}

impl CredentialExchange {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        app: Option<AppCredential>,
        keys: Arc<CredentialKeys>,
    ) -> Self {
        CredentialExchange { provider, app, keys }
    }

    pub async fn exchange(&self, assertion: &str) -> Result<ExchangeOutcome, ExchangeError> {
        self.exchange_at(assertion, chrono::Utc::now().timestamp()).await
    }

    /// As `exchange`, with the issuance clock supplied by the caller.
    pub async fn exchange_at(
        &self,
        assertion: &str,
        now: i64,
    ) -> Result<ExchangeOutcome, ExchangeError> {
        let assertion = assertion.trim();
        if assertion.is_empty() {
            return Err(ExchangeError::MissingAssertion);
        }
        let app = self.app.as_ref().ok_or(ExchangeError::ProviderNotConfigured)?;

        let introspection = self.provider.introspect(assertion, app).await?;
        if !introspection.is_valid {
            warn!("[exchange] {} reported the assertion invalid", self.provider.name());
            return Err(ExchangeError::InvalidAssertion { details: introspection.raw });
        }
        if let Some(issued_for) = introspection.app_id.as_deref() {
            if issued_for != app.app_id {
                warn!(
                    "[exchange] Assertion was issued for app {} (expected {})",
                    issued_for, app.app_id
                );
                return Err(ExchangeError::InvalidAssertion { details: introspection.raw });
            }
        }

        let profile = self.provider.profile(assertion).await?;
        let identity = SessionIdentity::from_profile(self.provider.name(), profile);
        let issued = self.keys.mint(identity, now)?;

        info!(
            "[exchange] Issued session credential for {} user {}",
            issued.claims.identity.provider,
            issued.claims.identity.id.as_deref().unwrap_or("<unknown>")
        );
        Ok(issued.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::error::ProviderError;
    use crate::atoms::types::{Introspection, Profile};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const NOW: i64 = 1_700_000_000;

    /// In-process identity provider with call counters.
    struct FakeProvider {
        introspection: Result<Introspection, String>,
        profile: Profile,
        introspect_calls: AtomicUsize,
        profile_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn valid() -> Self {
            FakeProvider {
                introspection: Ok(Introspection {
                    is_valid: true,
                    app_id: Some("app-1".into()),
                    raw: json!({"data": {"is_valid": true, "app_id": "app-1"}}),
                }),
                profile: Profile {
                    id: Some("42".into()),
                    name: Some("Ada".into()),
                    email: Some("ada@example.com".into()),
                },
                introspect_calls: AtomicUsize::new(0),
                profile_calls: AtomicUsize::new(0),
            }
        }

        fn with_introspection(introspection: Result<Introspection, String>) -> Self {
            FakeProvider { introspection, ..Self::valid() }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        fn name(&self) -> &str {
            "facebook"
        }

        async fn introspect(
            &self,
            assertion: &str,
            app: &AppCredential,
        ) -> Result<Introspection, ProviderError> {
            assert_eq!(assertion, "valid-token-123");
            assert_eq!(app.access_token(), "app-1|app-secret");
            self.introspect_calls.fetch_add(1, Ordering::SeqCst);
            self.introspection.clone().map_err(ProviderError::Transport)
        }

        async fn profile(&self, _assertion: &str) -> Result<Profile, ProviderError> {
            self.profile_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.profile.clone())
        }
    }

    fn app() -> Option<AppCredential> {
        Some(AppCredential { app_id: "app-1".into(), app_secret: "app-secret".into() })
    }

    fn service(provider: Arc<FakeProvider>, app: Option<AppCredential>) -> CredentialExchange {
        CredentialExchange::new(provider, app, Arc::new(CredentialKeys::from_secret("s")))
    }

    #[tokio::test]
    async fn test_valid_assertion_mints_six_hour_credential() {
        let provider = Arc::new(FakeProvider::valid());
        let outcome = service(provider.clone(), app())
            .exchange_at("valid-token-123", NOW)
            .await
            .unwrap();

        assert_eq!(outcome.issued_at, NOW);
        assert_eq!(outcome.expires_at, NOW + 6 * 3600);
        assert_eq!(outcome.profile.provider, "facebook");
        assert_eq!(outcome.profile.id.as_deref(), Some("42"));
        assert_eq!(outcome.profile.name.as_deref(), Some("Ada"));
        assert_eq!(outcome.profile.email.as_deref(), Some("ada@example.com"));

        let claims = CredentialKeys::from_secret("s")
            .verify(&outcome.session_credential, NOW)
            .unwrap();
        assert_eq!(claims.identity, outcome.profile);
        assert_eq!(provider.introspect_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_assertion() {
        let provider = Arc::new(FakeProvider::valid());
        let err = service(provider.clone(), app()).exchange_at("   ", NOW).await.unwrap_err();
        assert!(matches!(err, ExchangeError::MissingAssertion));
        assert_eq!(provider.introspect_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_not_configured() {
        let provider = Arc::new(FakeProvider::valid());
        let err = service(provider.clone(), None)
            .exchange_at("valid-token-123", NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ProviderNotConfigured));
        assert_eq!(provider.introspect_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_assertion_issues_nothing() {
        let raw = json!({"data": {"is_valid": false, "error": {"message": "Session has expired"}}});
        let provider = Arc::new(FakeProvider::with_introspection(Ok(Introspection {
            is_valid: false,
            app_id: None,
            raw: raw.clone(),
        })));
        let err = service(provider.clone(), app())
            .exchange_at("valid-token-123", NOW)
            .await
            .unwrap_err();
        match err {
            ExchangeError::InvalidAssertion { details } => assert_eq!(details, raw),
            other => panic!("expected InvalidAssertion, got {:?}", other),
        }
        assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_assertion_for_other_app_is_invalid() {
        let provider = Arc::new(FakeProvider::with_introspection(Ok(Introspection {
            is_valid: true,
            app_id: Some("someone-else".into()),
            raw: json!({"data": {"is_valid": true, "app_id": "someone-else"}}),
        })));
        let err = service(provider.clone(), app())
            .exchange_at("valid-token-123", NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::InvalidAssertion { .. }));
        assert_eq!(provider.profile_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_exchange_failed() {
        let provider = Arc::new(FakeProvider::with_introspection(Err("connection reset".into())));
        let err = service(provider.clone(), app())
            .exchange_at("valid-token-123", NOW)
            .await
            .unwrap_err();
        assert!(matches!(err, ExchangeError::ExchangeFailed(_)));
        // Single attempt, no retry.
        assert_eq!(provider.introspect_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_profile_fields_pass_through() {
        let provider = Arc::new(FakeProvider {
            profile: Profile::default(),
            ..FakeProvider::valid()
        });
        let outcome = service(provider, app()).exchange_at("valid-token-123", NOW).await.unwrap();
        assert_eq!(outcome.profile.id, None);
        assert_eq!(outcome.profile.email, None);
        assert_eq!(outcome.profile.provider, "facebook");
    }
}
