// BizGPT: Error → HTTP Response Mapping
//
// Client-caused failures get 4xx with a short machine-readable `reason`.
// Server/provider failures get 5xx with a generic message; the detail is
// logged here and never sent to the client.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::{debug, error};
use serde::Serialize;
use serde_json::{json, Value};

use crate::atoms::constants::GENERATION_ERROR_TEXT;
use crate::atoms::error::{Denial, ExchangeError, GenerateError};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    fn new(error: impl Into<String>, reason: &'static str) -> Self {
        ErrorBody { error: error.into(), reason, details: None }
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        let body = ErrorBody::new(self.to_string(), self.reason());
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// A request body that is not the JSON object the route expects: missing
/// `content-type`, broken syntax, or a field of the wrong type.
#[derive(Debug)]
pub struct InvalidBody {
    status: StatusCode,
}

impl From<JsonRejection> for InvalidBody {
    fn from(rejection: JsonRejection) -> Self {
        InvalidBody { status: rejection.status() }
    }
}

impl IntoResponse for InvalidBody {
    fn into_response(self) -> Response {
        // The rejection text can quote the body, so only its status is logged.
        debug!("[server] Rejected request body ({})", self.status);
        let body = ErrorBody::new("Invalid request body", "invalid_body");
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl IntoResponse for ExchangeError {
    fn into_response(self) -> Response {
        let reason = self.reason();
        let (status, body) = match self {
            ExchangeError::MissingAssertion => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("Missing identity assertion", reason))
            }
            ExchangeError::ProviderNotConfigured => {
                error!("[exchange] FACEBOOK_APP_ID / FACEBOOK_APP_SECRET not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Identity provider not configured on server", reason),
                )
            }
            ExchangeError::InvalidAssertion { details } => (
                StatusCode::UNAUTHORIZED,
                ErrorBody {
                    error: "Invalid Facebook token".into(),
                    reason,
                    details: Some(details),
                },
            ),
            ExchangeError::ExchangeFailed(detail) => {
                error!("[exchange] Verification failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Facebook verification failed", reason),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        // Provider detail was already logged by the forwarder.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "output": GENERATION_ERROR_TEXT, "reason": self.reason() })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::error::ProviderError;

    #[test]
    fn test_status_codes() {
        let unauthorized = StatusCode::UNAUTHORIZED;
        assert_eq!(Denial::MissingCredentials.into_response().status(), unauthorized);
        assert_eq!(Denial::InvalidOrExpiredCredential.into_response().status(), unauthorized);
        assert_eq!(
            ExchangeError::MissingAssertion.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExchangeError::ProviderNotConfigured.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ExchangeError::InvalidAssertion { details: json!({}) }.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ExchangeError::ExchangeFailed("dns".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let gen = GenerateError::ProviderCallFailed(ProviderError::Transport("x".into()));
        assert_eq!(gen.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let body = ErrorBody::new("Missing credentials", "missing_credentials");
        let v = serde_json::to_value(body).unwrap();
        assert_eq!(v, json!({"error": "Missing credentials", "reason": "missing_credentials"}));
    }

    #[test]
    fn test_invalid_body_is_bad_request() {
        let invalid = InvalidBody { status: StatusCode::UNSUPPORTED_MEDIA_TYPE };
        let resp = invalid.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()["content-type"], "application/json");
    }
}
