// BizGPT: HTTP Surface
//
// axum router over the exchange service, the access gate and the forwarder.
// Routes:
//   GET  /                    liveness text
//   POST /exchange            identity assertion → session credential
//   POST /generate            gated; {mode, prompt} → {output}
//   POST /api/auth/facebook   legacy alias of /exchange
//   POST /api/generate        legacy alias of /generate

pub mod handlers;
pub mod middleware;
pub mod response;

use std::sync::Arc;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::atoms::error::ConfigError;
use crate::atoms::traits::{GenerationProvider, IdentityProvider};
use crate::auth::{AccessGate, CredentialExchange, CredentialKeys};
use crate::config::AppConfig;
use crate::generation::Forwarder;
use crate::providers::{build_http_client, FacebookGraph, OpenAiChat};

/// Shared by every handler. Everything inside is read-only.
pub struct AppState {
    pub gate: AccessGate,
    pub exchange: CredentialExchange,
    pub forwarder: Forwarder,
}

impl AppState {
    /// Wire the components around explicit provider implementations.
    pub fn new(
        config: &AppConfig,
        identity: Arc<dyn IdentityProvider>,
        generation: Arc<dyn GenerationProvider>,
    ) -> Self {
        let keys = Arc::new(CredentialKeys::from_secret(&config.signing_secret));
        let model = config.openai.model.clone();
        AppState {
            gate: AccessGate::new(config.service_key.clone(), keys.clone()),
            exchange: CredentialExchange::new(identity, config.app_credential(), keys),
            forwarder: Forwarder::new(generation, model, config.openai.max_tokens),
        }
    }

    /// Production wiring: Graph API for identity, OpenAI-compatible chat for generation.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let client = build_http_client(&config.http)?;
        let identity =
            Arc::new(FacebookGraph::new(client.clone(), config.facebook.graph_url.clone()));
        let generation = Arc::new(OpenAiChat::new(
            client,
            config.openai.base_url.clone(),
            config.openai.api_key.clone(),
        ));
        Ok(Self::new(config, identity, generation))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let gated = Router::new()
        .route("/generate", post(handlers::generate))
        .route("/api/generate", post(handlers::generate))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_access));

    Router::new()
        .route("/", get(handlers::health))
        .route("/exchange", post(handlers::exchange))
        .route("/api/auth/facebook", post(handlers::exchange))
        .merge(gated)
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_id))
        .with_state(state)
}
