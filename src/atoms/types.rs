// ── BizGPT Atoms: Shared Types ─────────────────────────────────────────────

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ── Identity provider data ─────────────────────────────────────────────────

/// Provider-application credential, sent to the introspection endpoint as
/// `<app_id>|<app_secret>`.
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredential {
    pub app_id: String,
    pub app_secret: String,
}

impl AppCredential {
    pub fn access_token(&self) -> String {
        format!("{}|{}", self.app_id, self.app_secret)
    }
}

impl fmt::Debug for AppCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredential")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Result of asking the identity provider about an assertion.
#[derive(Debug, Clone, PartialEq)]
pub struct Introspection {
    pub is_valid: bool,
    /// Application the assertion was issued for, when the provider says.
    pub app_id: Option<String>,
    /// Full provider body, returned to the client as diagnostic detail.
    pub raw: Value,
}

/// Minimal profile read from the identity provider. Every field may be
/// missing; nothing is validated beyond what the provider returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

// ── Session credential ─────────────────────────────────────────────────────

/// Identity embedded in a session credential and attached to requests that
/// pass the gate with one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub provider: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionIdentity {
    pub fn from_profile(provider: &str, profile: Profile) -> Self {
        SessionIdentity {
            provider: provider.to_string(),
            id: profile.id,
            name: profile.name,
            email: profile.email,
        }
    }
}

/// JWT claim set: the identity plus `iat`/`exp` in Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: SessionIdentity,
    pub iat: i64,
    pub exp: i64,
}

// ── Generation ─────────────────────────────────────────────────────────────

/// One non-streaming chat completion: a system instruction plus one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}
