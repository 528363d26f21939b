// BizGPT: Process Configuration
//
// Read once at startup from the environment (optionally seeded by `.env`)
// and then shared read-only behind an `Arc`. Nothing reads the environment
// after `AppConfig::from_env` returns.

use std::fmt;

use log::warn;

use crate::atoms::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_GRAPH_URL, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEV_SERVICE_KEY, DEV_SIGNING_SECRET,
};
use crate::atoms::error::ConfigError;
use crate::atoms::types::AppCredential;

// ── Config Structs ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    /// Static shared secret accepted in `x-api-key`.
    pub service_key: String,
    /// HMAC secret for session credentials.
    pub signing_secret: String,
    pub facebook: FacebookConfig,
    pub openai: OpenAiConfig,
    pub http: HttpConfig,
    /// Variables that fell back to a development default.
    pub insecure_defaults: Vec<&'static str>,
}

#[derive(Clone)]
pub struct FacebookConfig {
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub graph_url: String,
}

#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

// ── Loading ────────────────────────────────────────────────────────────

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let require_secrets = parse_or(&get, "BIZGPT_REQUIRE_SECRETS", false)?;
        let mut insecure_defaults = Vec::new();

        let service_key = match get("BIZGPT_API_KEY") {
            Some(v) => v,
            None if require_secrets => return Err(ConfigError::InsecureDefault("BIZGPT_API_KEY")),
            None => {
                insecure_defaults.push("BIZGPT_API_KEY");
                DEV_SERVICE_KEY.to_string()
            }
        };
        let signing_secret = match get("JWT_SECRET") {
            Some(v) => v,
            None if require_secrets => return Err(ConfigError::InsecureDefault("JWT_SECRET")),
            None => {
                insecure_defaults.push("JWT_SECRET");
                DEV_SIGNING_SECRET.to_string()
            }
        };

        Ok(AppConfig {
            bind_address: get("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            service_key,
            signing_secret,
            facebook: FacebookConfig {
                app_id: get("FACEBOOK_APP_ID"),
                app_secret: get("FACEBOOK_APP_SECRET"),
                graph_url: get("FACEBOOK_GRAPH_URL")
                    .unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string()),
            },
            openai: OpenAiConfig {
                api_key: get("OPENAI_API_KEY").unwrap_or_default(),
                base_url: get("OPENAI_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
                model: get("BIZGPT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: parse_or(&get, "BIZGPT_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
            },
            http: HttpConfig {
                connect_timeout_secs: parse_or(
                    &get,
                    "HTTP_CONNECT_TIMEOUT_SECS",
                    DEFAULT_CONNECT_TIMEOUT_SECS,
                )?,
                timeout_secs: parse_or(&get, "HTTP_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            },
            insecure_defaults,
        })
    }

    /// App credential for the identity provider, if both halves are set.
    pub fn app_credential(&self) -> Option<AppCredential> {
        match (&self.facebook.app_id, &self.facebook.app_secret) {
            (Some(app_id), Some(app_secret)) => Some(AppCredential {
                app_id: app_id.clone(),
                app_secret: app_secret.clone(),
            }),
            _ => None,
        }
    }

    /// Log every development fallback and every missing provider setting.
    pub fn log_warnings(&self) {
        for var in &self.insecure_defaults {
            warn!(
                "[config] {} is not set, using the INSECURE development default. \
                 Set it (or BIZGPT_REQUIRE_SECRETS=true) before exposing this server",
                var
            );
        }
        if self.app_credential().is_none() {
            warn!(
                "[config] FACEBOOK_APP_ID / FACEBOOK_APP_SECRET not set, /exchange will answer 500"
            );
        }
        if self.openai.api_key.is_empty() {
            warn!(
                "[config] OPENAI_API_KEY not set, generation calls will be rejected by the provider"
            );
        }
    }
}

fn parse_or<G, T>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(var) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
        None => Ok(default),
    }
}

// ── Redacted Debug ─────────────────────────────────────────────────────
// Startup logs the config with `{:?}`; secrets must never reach the log.

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("service_key", &redact(&self.service_key))
            .field("signing_secret", &redact(&self.signing_secret))
            .field("facebook", &self.facebook)
            .field("openai", &self.openai)
            .field("http", &self.http)
            .field("insecure_defaults", &self.insecure_defaults)
            .finish()
    }
}

impl fmt::Debug for FacebookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacebookConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_deref().map(redact))
            .field("graph_url", &self.graph_url)
            .finish()
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}
