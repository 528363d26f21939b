// ── BizGPT Atoms Layer ─────────────────────────────────────────────────────
// Pure constants, data types, error enums and provider traits. No I/O.
// Dependency rule: atoms may only depend on std and external pure crates.
// Nothing here may import from auth/, providers/, server/ or config.rs.

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
