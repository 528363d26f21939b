// BizGPT: HTTP Middleware

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use log::{debug, warn};
use uuid::Uuid;

use crate::atoms::constants::REQUEST_ID_HEADER;
use crate::server::AppState;

/// Run the access gate. On success the `Admission` rides along in request
/// extensions for the handler.
pub async fn require_access(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let now = chrono::Utc::now().timestamp();
    match state.gate.authorize(req.headers(), now) {
        Ok(admission) => {
            debug!("[gate] Admitted {} {} via {}", req.method(), req.uri().path(), admission.via());
            req.extensions_mut().insert(admission);
            next.run(req).await
        }
        Err(denial) => {
            warn!("[gate] Denied {} {}: {}", req.method(), req.uri().path(), denial.reason());
            denial.into_response()
        }
    }
}

/// Tag every response with a fresh `x-request-id`.
pub async fn request_id(req: Request, next: Next) -> Response {
    let id = Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        resp.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    resp
}
