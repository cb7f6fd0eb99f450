//! Authenticator implementation
//!
//! Performs the `loginAPI` mutation. A single failure aborts; there is no
//! retry and no refresh.

use super::types::AccessToken;
use crate::error::{Error, Result};
use crate::graphql::{operations, value_at, GraphQlClient};
use serde_json::Value;
use tracing::{debug, info};

const TOKEN_PATH: &str = "data.loginAPI.accessToken";

/// Exchanges an API key for an access token
pub struct Authenticator {
    api_key: String,
}

impl Authenticator {
    /// Create an authenticator for the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(Error::auth("API key cannot be empty"));
        }
        Ok(Self { api_key })
    }

    /// Perform the login mutation and return the token
    pub async fn login(&self, client: &GraphQlClient) -> Result<AccessToken> {
        debug!(endpoint = %client.endpoint(), "Logging in with API key");

        let response = client
            .execute(&operations::login(&self.api_key))
            .await
            .map_err(|e| Error::auth(e.to_string()))?;

        let token = extract_token(&response)?;
        info!("Authentication successful");
        Ok(token)
    }

    /// Log in and attach the token to the client
    pub async fn authenticate(&self, client: &mut GraphQlClient) -> Result<()> {
        let token = self.login(client).await?;
        client.set_token(token);
        Ok(())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Pull a usable token out of a `loginAPI` response
fn extract_token(response: &Value) -> Result<AccessToken> {
    if value_at(response, "data.loginAPI").is_none() {
        return Err(Error::auth("Invalid API response"));
    }

    match value_at(response, TOKEN_PATH).and_then(Value::as_str) {
        Some(token) if !token.is_empty() && token != "null" => Ok(AccessToken::new(token)),
        _ => Err(Error::auth("Failed to obtain access token")),
    }
}

#[cfg(test)]
mod extract_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_token() {
        let token = extract_token(&json!({
            "data": {"loginAPI": {"accessToken": "abc"}}
        }))
        .unwrap();
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn test_extract_rejects_null_string_and_empty() {
        for bad in [json!("null"), json!(""), json!(null), json!(42)] {
            let response = json!({"data": {"loginAPI": {"accessToken": bad}}});
            assert!(matches!(extract_token(&response), Err(Error::Auth { .. })));
        }
    }

    #[test]
    fn test_extract_missing_login_block() {
        let err = extract_token(&json!({"data": {}})).unwrap_err();
        assert_eq!(err.to_string(), "Authentication failed: Invalid API response");
    }
}
