// ── BizGPT Atoms: Constants ────────────────────────────────────────────────
// All named constants for the crate live here.

// ── Session credentials ───────────────────────────────────────────────────
// Session tokens are HS256 JWTs valid for six hours from issuance.
pub const SESSION_TTL_SECS: i64 = 6 * 60 * 60;

/// Provider tag embedded in every session credential minted by the exchange.
pub const PROVIDER_FACEBOOK: &str = "facebook";

// ── Request headers ───────────────────────────────────────────────────────
pub const SERVICE_KEY_HEADER: &str = "x-api-key";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// ── Development fallbacks ─────────────────────────────────────────────────
// Used only when the environment does not provide a value. Startup warns
// about each one, and BIZGPT_REQUIRE_SECRETS=true turns them into errors.
pub const DEV_SERVICE_KEY: &str = "dev_key";
pub const DEV_SIGNING_SECRET: &str = "dev_jwt_secret";

// ── Server ────────────────────────────────────────────────────────────────
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const HEALTH_TEXT: &str = "BizGPT backend is running";

// ── Identity provider (Facebook Graph API) ────────────────────────────────
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com";
pub const PROFILE_FIELDS: &str = "id,name,email";

// ── Generation provider (OpenAI-compatible) ───────────────────────────────
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 900;
pub const SYSTEM_INSTRUCTION_PREFIX: &str =
    "You are BizGPT, an assistant that ONLY provides business, research \
     and feasibility outputs. Mode: ";
pub const NO_RESPONSE_TEXT: &str = "No response from model";
pub const GENERATION_ERROR_TEXT: &str = "Error generating content.";

// ── Outbound HTTP ─────────────────────────────────────────────────────────
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
