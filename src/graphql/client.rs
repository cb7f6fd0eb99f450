//! GraphQL client over the shared HTTP client

use crate::auth::AccessToken;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// A GraphQL request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    /// Operation document
    pub query: String,
    /// Operation variables
    pub variables: Value,
}

impl GraphQlRequest {
    /// Create a request with no variables
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: json!({}),
        }
    }

    /// Set the variables object
    #[must_use]
    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }
}

/// Client for the CloudHealth GraphQL endpoint
#[derive(Debug)]
pub struct GraphQlClient {
    http: HttpClient,
    endpoint: String,
    token: Option<AccessToken>,
}

impl GraphQlClient {
    /// Create an unauthenticated client
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// The endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Attach the access token used by `execute_authenticated`
    pub fn set_token(&mut self, token: AccessToken) {
        self.token = Some(token);
    }

    /// Whether a token is attached
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Send a request without an `Authorization` header
    pub async fn execute(&self, request: &GraphQlRequest) -> Result<Value> {
        let response = self.send(request, None).await?;
        check_errors(&response)?;
        Ok(response)
    }

    /// Send a request with the bearer token
    pub async fn execute_authenticated(&self, request: &GraphQlRequest) -> Result<Value> {
        let response = self.execute_authenticated_raw(request).await?;
        check_errors(&response)?;
        Ok(response)
    }

    /// Send a request with the bearer token and return the response even
    /// when it carries an `errors` array. Callers decide whether the `data`
    /// part is still usable.
    pub async fn execute_authenticated_raw(&self, request: &GraphQlRequest) -> Result<Value> {
        let token = self.token.as_ref().ok_or(Error::NotAuthenticated)?;
        self.send(request, Some(token.as_str())).await
    }

    async fn send(&self, request: &GraphQlRequest, bearer: Option<&str>) -> Result<Value> {
        debug!(endpoint = %self.endpoint, authenticated = bearer.is_some(), "GraphQL request");

        let body = serde_json::to_value(request)?;
        self.http.post_json(&self.endpoint, &body, bearer).await
    }
}

/// Fail when the response carries a non-empty `errors` array
pub fn check_errors(response: &Value) -> Result<()> {
    let Some(errors) = response.get("errors").and_then(Value::as_array) else {
        return Ok(());
    };
    if errors.is_empty() {
        return Ok(());
    }

    let messages = errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_string()
        })
        .collect();

    Err(Error::GraphQl { messages })
}

/// Walk a dotted path such as `"data.loginAPI.accessToken"` (a leading `$.`
/// is accepted). Returns `None` when any segment is missing or `null`.
pub fn value_at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);

    let mut current = value;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}
