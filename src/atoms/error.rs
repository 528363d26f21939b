// ── BizGPT Atoms: Error Types ──────────────────────────────────────────────
// One `thiserror` enum per domain. HTTP status mapping lives in the server
// layer (server/response.rs), so nothing here knows about axum.
//
// Design rules:
//   • No variant carries secret material (keys, tokens, signing secret).
//   • `reason()` returns the short machine-readable code sent to clients.
//   • All errors are terminal for the current request; none are retried.

use serde_json::Value;
use thiserror::Error;

// ── Outbound provider calls ────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connect, TLS, timeout or body-read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider answered, but not with the JSON shape we expect.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

// reqwest appends the request URL to its messages, and Graph URLs carry the
// user's assertion and the app secret in the query string.
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Transport(e.without_url().to_string())
    }
}

// ── Credential exchange ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Missing identity assertion")]
    MissingAssertion,

    /// Server misconfiguration: app id or app secret absent.
    #[error("Identity provider app credentials not configured on server")]
    ProviderNotConfigured,

    /// The identity provider rejected the assertion. `details` is the
    /// provider's own diagnostic body.
    #[error("Invalid identity assertion")]
    InvalidAssertion { details: Value },

    #[error("Identity verification failed: {0}")]
    ExchangeFailed(String),
}

impl ExchangeError {
    pub fn reason(&self) -> &'static str {
        match self {
            ExchangeError::MissingAssertion => "missing_assertion",
            ExchangeError::ProviderNotConfigured => "provider_not_configured",
            ExchangeError::InvalidAssertion { .. } => "invalid_assertion",
            ExchangeError::ExchangeFailed(_) => "exchange_failed",
        }
    }
}

impl From<ProviderError> for ExchangeError {
    fn from(e: ProviderError) -> Self {
        ExchangeError::ExchangeFailed(e.to_string())
    }
}

impl From<CredentialError> for ExchangeError {
    fn from(e: CredentialError) -> Self {
        ExchangeError::ExchangeFailed(e.to_string())
    }
}

// ── Session credentials ────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CredentialError {
    /// Bad signature, wrong algorithm, malformed token or unusable key.
    #[error("Token rejected: {0}")]
    Rejected(#[from] jsonwebtoken::errors::Error),

    #[error("Token expired at {exp}")]
    Expired { exp: i64 },
}

// ── Access gate ────────────────────────────────────────────────────────────

/// Why the access gate refused a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Invalid auth format")]
    MalformedCredentials,

    #[error("Invalid or expired token")]
    InvalidOrExpiredCredential,
}

impl Denial {
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::MissingCredentials => "missing_credentials",
            Denial::MalformedCredentials => "malformed_credentials",
            Denial::InvalidOrExpiredCredential => "invalid_or_expired_credential",
        }
    }
}

// ── Generation forwarder ───────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Generation provider call failed: {0}")]
    ProviderCallFailed(#[from] ProviderError),
}

impl GenerateError {
    pub fn reason(&self) -> &'static str {
        match self {
            GenerateError::ProviderCallFailed(_) => "provider_call_failed",
        }
    }
}

// ── Configuration ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("{0} is not set and BIZGPT_REQUIRE_SECRETS forbids the development default")]
    InsecureDefault(&'static str),

    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_are_machine_readable() {
        let all = [
            Denial::MissingCredentials.reason(),
            Denial::MalformedCredentials.reason(),
            Denial::InvalidOrExpiredCredential.reason(),
            ExchangeError::MissingAssertion.reason(),
            ExchangeError::ProviderNotConfigured.reason(),
            ExchangeError::ExchangeFailed("x".into()).reason(),
        ];
        for reason in all {
            assert!(reason.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{reason}");
        }
    }

    #[test]
    fn provider_errors_become_exchange_failures() {
        let err: ExchangeError = ProviderError::Transport("connection refused".into()).into();
        assert!(
            matches!(err, ExchangeError::ExchangeFailed(ref m) if m.contains("connection refused"))
        );
    }
}
