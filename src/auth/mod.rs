// BizGPT: Authentication
// Session credentials, the access gate in front of /generate, and the
// identity-assertion exchange that issues credentials.

pub mod credential;
pub mod exchange;
pub mod gate;

pub use credential::{CredentialKeys, IssuedCredential};
pub use exchange::{CredentialExchange, ExchangeOutcome};
pub use gate::{AccessGate, Admission, Strategy};
