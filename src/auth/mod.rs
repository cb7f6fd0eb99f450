//! Authentication module
//!
//! One `loginAPI` mutation exchanges the operator's API key for a bearer
//! token. The token is held in memory for the rest of the run.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AccessToken;
