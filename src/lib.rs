// BizGPT backend
//
// Layering (imports only flow downward):
//   atoms/       constants, types, errors, provider traits (no I/O)
//   config.rs    environment → immutable AppConfig
//   auth/        session credentials, access gate, assertion exchange
//   providers/   Facebook Graph + OpenAI-compatible reqwest clients
//   generation   system-instruction wrapper around the generation provider
//   server/      axum router, middleware, handlers, error responses

pub mod atoms;
pub mod auth;
pub mod config;
pub mod generation;
pub mod providers;
pub mod server;
