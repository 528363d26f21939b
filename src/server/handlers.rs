// BizGPT: Route Handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::atoms::constants::HEALTH_TEXT;
use crate::atoms::error::ExchangeError;
use crate::atoms::types::SessionIdentity;
use crate::auth::{Admission, ExchangeOutcome};
use crate::server::response::InvalidBody;
use crate::server::AppState;

// ── Wire types ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExchangeRequest {
    /// `access_token` is the field name older clients send.
    #[serde(default, rename = "identityAssertion", alias = "access_token")]
    pub identity_assertion: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub session_credential: String,
    pub profile: SessionIdentity,
    pub expires_at: i64,
}

impl From<ExchangeOutcome> for ExchangeResponse {
    fn from(outcome: ExchangeOutcome) -> Self {
        ExchangeResponse {
            session_credential: outcome.session_credential,
            profile: outcome.profile,
            expires_at: outcome.expires_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub output: String,
}

// ── Handlers ───────────────────────────────────────────────────────────

pub async fn health() -> &'static str {
    HEALTH_TEXT
}

/// An unreadable body carries no usable assertion, so it is answered as
/// `MissingAssertion`.
pub async fn exchange(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ExchangeRequest>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!("[exchange] Unreadable body ({})", rejection.status());
            return ExchangeError::MissingAssertion.into_response();
        }
    };
    let assertion = body.identity_assertion.unwrap_or_default();
    match state.exchange.exchange(&assertion).await {
        Ok(outcome) => Json(ExchangeResponse::from(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Extension(admission): Extension<Admission>,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => return InvalidBody::from(rejection).into_response(),
    };
    let caller = match &admission {
        Admission::ServiceKey => "service".to_string(),
        Admission::Session(claims) => format!(
            "{}:{}",
            claims.identity.provider,
            claims.identity.id.as_deref().unwrap_or("?")
        ),
    };
    info!("[generate] mode={} prompt_len={} caller={}", body.mode, body.prompt.len(), caller);

    match state.forwarder.generate(&body.mode, &body.prompt).await {
        Ok(output) => Json(GenerateResponse { output }).into_response(),
        Err(e) => e.into_response(),
    }
}
