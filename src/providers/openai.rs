// BizGPT: OpenAI-Compatible Generation Provider
// Non-streaming `POST {base}/chat/completions` with a Bearer key.
// Single attempt; any failure surfaces to the forwarder as ProviderError.

use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use serde_json::{json, Value};

use crate::atoms::error::ProviderError;
use crate::atoms::traits::GenerationProvider;
use crate::atoms::types::ChatRequest;
use crate::providers::truncate_utf8;

pub struct OpenAiChat {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiChat {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        OpenAiChat { client, base_url: base_url.into(), api_key: api_key.into() }
    }

    fn format_body(request: &ChatRequest) -> Value {
        json!({
            "model": request.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt},
            ],
            "max_tokens": request.max_tokens,
        })
    }

    /// First choice's message text. Empty text counts as no text.
    fn parse_completion(v: &Value) -> Option<String> {
        v["choices"]
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl GenerationProvider for OpenAiChat {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        info!("[openai] Request to {} model={}", url, request.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&Self::format_body(request))
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            error!("[openai] API error {}: {}", status.as_u16(), truncate_utf8(&body_text, 500));
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: truncate_utf8(&body_text, 200).to_string(),
            });
        }

        let v: Value = serde_json::from_str(&body_text)
            .map_err(|e| ProviderError::UnexpectedResponse(format!("completion body: {}", e)))?;
        Ok(Self::parse_completion(&v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_body() {
        let body = OpenAiChat::format_body(&ChatRequest {
            model: "gpt-4o-mini".into(),
            system: "sys".into(),
            prompt: "hello".into(),
            max_tokens: 900,
        });
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 900);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn test_parse_completion() {
        let message = json!({"role": "assistant", "content": "Market is large."});
        let v = json!({"choices": [{"message": message}]});
        assert_eq!(OpenAiChat::parse_completion(&v).as_deref(), Some("Market is large."));
        assert_eq!(OpenAiChat::parse_completion(&json!({"choices": []})), None);

        let empty = json!({"choices": [{"message": {"content": ""}}]});
        assert_eq!(OpenAiChat::parse_completion(&empty), None);
        let null = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(OpenAiChat::parse_completion(&null), None);
    }
}
