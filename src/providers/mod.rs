// BizGPT: External Provider Clients
// Facebook Graph API (identity) and OpenAI-compatible chat (generation).
// Each client is a thin reqwest wrapper implementing an atoms trait.

pub mod facebook;
pub mod openai;

pub use facebook::FacebookGraph;
pub use openai::OpenAiChat;

use std::time::Duration;

use crate::atoms::error::ConfigError;
use crate::config::HttpConfig;

/// Shared client settings for every outbound call. No retries anywhere:
/// each request is a single attempt bounded by these timeouts.
pub fn build_http_client(http: &HttpConfig) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .timeout(Duration::from_secs(http.timeout_secs))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Truncate provider bodies before they go into logs or error messages.
pub(crate) fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_utf8("hello", 10), "hello");
        assert_eq!(truncate_utf8("hello", 3), "hel");
        // "é" is two bytes; cutting at 1 must back off to 0.
        assert_eq!(truncate_utf8("é", 1), "");
    }

    #[test]
    fn client_builds_from_defaults() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }
}
