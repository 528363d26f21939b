// BizGPT: Facebook Graph API Identity Provider
//
//   GET {graph}/debug_token?input_token=<assertion>&access_token=<app_id>|<app_secret>
//   GET {graph}/me?fields=id,name,email&access_token=<assertion>
//
// Graph answers rejected tokens with a 4xx JSON error body, which counts as
// "not valid" rather than a transport failure. 5xx and non-JSON bodies are
// provider failures.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde_json::Value;

use crate::atoms::constants::{PROFILE_FIELDS, PROVIDER_FACEBOOK};
use crate::atoms::error::ProviderError;
use crate::atoms::traits::IdentityProvider;
use crate::atoms::types::{AppCredential, Introspection, Profile};
use crate::providers::truncate_utf8;

pub struct FacebookGraph {
    client: Client,
    base_url: String,
}

impl FacebookGraph {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        FacebookGraph { client, base_url: base_url.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Send a GET and return (status, parsed JSON body).
    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(u16, Value), ProviderError> {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        if status >= 500 {
            error!("[graph] {} answered {}: {}", path, status, truncate_utf8(&body, 500));
            return Err(ProviderError::Api {
                status,
                message: truncate_utf8(&body, 200).to_string(),
            });
        }
        let json = serde_json::from_str(&body).map_err(|e| {
            ProviderError::UnexpectedResponse(format!("{} returned non-JSON body: {}", path, e))
        })?;
        Ok((status, json))
    }
}

/// Read a `debug_token` body. Anything without `data.is_valid == true` is invalid.
pub fn parse_introspection(raw: Value) -> Introspection {
    let data = &raw["data"];
    let is_valid = data["is_valid"].as_bool() == Some(true);
    let app_id = string_field(data, "app_id");
    Introspection { is_valid, app_id, raw }
}

/// Read a `/me` body. Fields Graph leaves out stay `None`.
pub fn parse_profile(raw: &Value) -> Result<Profile, ProviderError> {
    if !raw.is_object() {
        return Err(ProviderError::UnexpectedResponse("profile body is not a JSON object".into()));
    }
    Ok(Profile {
        id: string_field(raw, "id"),
        name: string_field(raw, "name"),
        email: string_field(raw, "email"),
    })
}

/// Graph ids are strings, but accept bare numbers too.
fn string_field(obj: &Value, key: &str) -> Option<String> {
    match &obj[key] {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl IdentityProvider for FacebookGraph {
    fn name(&self) -> &str {
        PROVIDER_FACEBOOK
    }

    async fn introspect(
        &self,
        assertion: &str,
        app: &AppCredential,
    ) -> Result<Introspection, ProviderError> {
        let app_token = app.access_token();
        let query = [("input_token", assertion), ("access_token", app_token.as_str())];
        let (status, body) = self.get_json("debug_token", &query).await?;
        debug!("[graph] debug_token answered {}", status);
        Ok(parse_introspection(body))
    }

    async fn profile(&self, assertion: &str) -> Result<Profile, ProviderError> {
        let (status, body) = self
            .get_json("me", &[("fields", PROFILE_FIELDS), ("access_token", assertion)])
            .await?;
        if status >= 400 {
            return Err(ProviderError::Api {
                status,
                message: truncate_utf8(&body.to_string(), 200).to_string(),
            });
        }
        parse_profile(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_introspection() {
        let i = parse_introspection(json!({
            "data": {"app_id": "138483919580948", "type": "USER", "is_valid": true, "user_id": "42"}
        }));
        assert!(i.is_valid);
        assert_eq!(i.app_id.as_deref(), Some("138483919580948"));
    }

    #[test]
    fn test_parse_invalid_introspection_shapes() {
        assert!(!parse_introspection(json!({"data": {"is_valid": false}})).is_valid);
        assert!(!parse_introspection(json!({"data": {}})).is_valid);
        assert!(!parse_introspection(json!({"data": {"is_valid": "true"}})).is_valid);
        let err_body = json!({"error": {"message": "Invalid OAuth access token.", "code": 190}});
        let i = parse_introspection(err_body.clone());
        assert!(!i.is_valid);
        assert_eq!(i.raw, err_body);
    }

    #[test]
    fn test_parse_profile() {
        let body = json!({"id": "42", "name": "Ada", "email": "ada@example.com"});
        let p = parse_profile(&body).unwrap();
        assert_eq!(p.id.as_deref(), Some("42"));
        assert_eq!(p.email.as_deref(), Some("ada@example.com"));

        let partial = parse_profile(&json!({"id": 42})).unwrap();
        assert_eq!(partial.id.as_deref(), Some("42"));
        assert_eq!(partial.name, None);

        assert!(parse_profile(&json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn test_url_joining() {
        let graph = FacebookGraph::new(Client::new(), "https://graph.facebook.com/");
        assert_eq!(graph.url("me"), "https://graph.facebook.com/me");
    }

    #[tokio::test]
    async fn test_transport_error_hides_query_secrets() {
        // Bind then drop to get a local port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let graph = FacebookGraph::new(Client::new(), format!("http://{}", addr));
        let app = AppCredential { app_id: "app-1".into(), app_secret: "TOPSECRET".into() };

        let err = graph.introspect("USER-ASSERTION", &app).await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)), "{:?}", err);
        let text = err.to_string();
        assert!(!text.contains("TOPSECRET"), "{}", text);
        assert!(!text.contains("USER-ASSERTION"), "{}", text);

        let err = graph.profile("USER-ASSERTION").await.unwrap_err();
        assert!(!err.to_string().contains("USER-ASSERTION"), "{}", err);
    }
}
