// BizGPT: Access Gate
//
// Decides whether a request may reach the generation endpoint. The gate is
// an ordered list of strategies evaluated against (headers, config, now);
// the first strategy that allows wins. No I/O, no suspension.

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use log::debug;
use subtle::ConstantTimeEq;

use crate::atoms::constants::SERVICE_KEY_HEADER;
use crate::atoms::error::Denial;
use crate::atoms::types::SessionClaims;
use crate::auth::credential::CredentialKeys;

// ── Outcomes ───────────────────────────────────────────────────────────

/// How an allowed request got in. Inserted into request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Trusted caller presented the static service key. No identity.
    ServiceKey,
    /// Caller presented a valid session credential.
    Session(SessionClaims),
}

impl Admission {
    /// Short label for logs; never includes identity fields.
    pub fn via(&self) -> &'static str {
        match self {
            Admission::ServiceKey => "service key",
            Admission::Session(_) => "session credential",
        }
    }
}

/// Result of a single strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow(Admission),
    Deny(Denial),
    /// Strategy does not apply to this request.
    Abstain,
}

// ── Strategies ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `x-api-key` equal to the configured service key.
    ServiceKey,
    /// `Authorization: Bearer <session credential>`.
    BearerSession,
}

/// Production evaluation order.
pub const DEFAULT_STRATEGIES: &[Strategy] = &[Strategy::ServiceKey, Strategy::BearerSession];

impl Strategy {
    pub fn evaluate(self, headers: &HeaderMap, gate: &AccessGate, now: i64) -> Verdict {
        match self {
            Strategy::ServiceKey => service_key(headers, &gate.service_key),
            Strategy::BearerSession => bearer_session(headers, &gate.keys, now),
        }
    }
}

fn service_key(headers: &HeaderMap, expected: &str) -> Verdict {
    let Some(presented) = headers.get(SERVICE_KEY_HEADER) else {
        return Verdict::Abstain;
    };
    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        Verdict::Allow(Admission::ServiceKey)
    } else {
        // A wrong key falls through to the bearer check.
        Verdict::Abstain
    }
}

fn bearer_session(headers: &HeaderMap, keys: &CredentialKeys, now: i64) -> Verdict {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Verdict::Deny(Denial::MissingCredentials);
    };
    let Some(token) = value.to_str().ok().and_then(parse_bearer) else {
        return Verdict::Deny(Denial::MalformedCredentials);
    };
    match keys.verify(token, now) {
        Ok(claims) => Verdict::Allow(Admission::Session(claims)),
        Err(e) => {
            debug!("[gate] Session credential rejected: {}", e);
            Verdict::Deny(Denial::InvalidOrExpiredCredential)
        }
    }
}

/// Exactly two parts split on a single space, the first literally `Bearer`.
/// Doubled or surrounding spaces make an empty part and are rejected.
pub fn parse_bearer(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

// ── Gate ───────────────────────────────────────────────────────────────

/// Immutable after construction; shared across requests via `Arc`.
#[derive(Clone)]
pub struct AccessGate {
    service_key: String,
    keys: Arc<CredentialKeys>,
    strategies: Vec<Strategy>,
}

impl AccessGate {
    pub fn new(service_key: impl Into<String>, keys: Arc<CredentialKeys>) -> Self {
        Self::with_strategies(service_key, keys, DEFAULT_STRATEGIES.to_vec())
    }

    pub fn with_strategies(
        service_key: impl Into<String>,
        keys: Arc<CredentialKeys>,
        strategies: Vec<Strategy>,
    ) -> Self {
        AccessGate { service_key: service_key.into(), keys, strategies }
    }

    /// First `Allow` wins. Otherwise the first denial is reported, or
    /// `MissingCredentials` if every strategy abstained.
    pub fn authorize(&self, headers: &HeaderMap, now: i64) -> Result<Admission, Denial> {
        let mut denial = None;
        for strategy in &self.strategies {
            match strategy.evaluate(headers, self, now) {
                Verdict::Allow(admission) => return Ok(admission),
                Verdict::Deny(d) => {
                    denial.get_or_insert(d);
                }
                Verdict::Abstain => {}
            }
        }
        Err(denial.unwrap_or(Denial::MissingCredentials))
    }
}
