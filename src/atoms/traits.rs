// ── BizGPT Atoms: Provider Traits ──────────────────────────────────────────
// The two external collaborators sit behind these traits so the exchange
// service and the forwarder can be driven by in-process fakes in tests.

use async_trait::async_trait;

use crate::atoms::error::ProviderError;
use crate::atoms::types::{AppCredential, ChatRequest, Introspection, Profile};

/// Third-party identity provider (Facebook Graph API in production).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Tag written into the `provider` claim of minted credentials.
    fn name(&self) -> &str;

    /// Ask the provider whether `assertion` is a live token, authenticating
    /// as the application with `app`.
    async fn introspect(
        &self,
        assertion: &str,
        app: &AppCredential,
    ) -> Result<Introspection, ProviderError>;

    /// Read `{id, name, email}` using the assertion itself.
    async fn profile(&self, assertion: &str) -> Result<Profile, ProviderError>;
}

/// Chat-completion backend (OpenAI-compatible API in production).
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Run one completion. `Ok(None)` means the provider answered without text.
    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, ProviderError>;
}
