// BizGPT: Generation Forwarder
// Wraps {mode, prompt} in the fixed BizGPT system instruction and hands it
// to the generation provider. No retry, no streaming.

use std::sync::Arc;

use log::error;

use crate::atoms::constants::{NO_RESPONSE_TEXT, SYSTEM_INSTRUCTION_PREFIX};
use crate::atoms::error::GenerateError;
use crate::atoms::traits::GenerationProvider;
use crate::atoms::types::ChatRequest;

pub struct Forwarder {
    provider: Arc<dyn GenerationProvider>,
    model: String,
    max_tokens: u32,
}

impl Forwarder {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Forwarder { provider, model: model.into(), max_tokens }
    }

    pub fn system_instruction(mode: &str) -> String {
        format!("{}{}", SYSTEM_INSTRUCTION_PREFIX, mode)
    }

    pub fn build_request(&self, mode: &str, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            system: Self::system_instruction(mode),
            prompt: prompt.to_string(),
            max_tokens: self.max_tokens,
        }
    }

    /// Provider text verbatim, or the fixed fallback when it sent none.
    pub async fn generate(&self, mode: &str, prompt: &str) -> Result<String, GenerateError> {
        let request = self.build_request(mode, prompt);
        match self.provider.complete(&request).await {
            Ok(text) => Ok(text.unwrap_or_else(|| NO_RESPONSE_TEXT.to_string())),
            Err(e) => {
                error!("[generate] {} call failed: {}", self.provider.name(), e);
                Err(GenerateError::ProviderCallFailed(e))
            }
        }
    }
}
