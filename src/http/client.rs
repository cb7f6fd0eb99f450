//! HTTP client with fixed timeouts
//!
//! Every call is attempted exactly once. Transport failures, timeouts and
//! non-2xx responses are returned to the caller as errors.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::config::HttpSettings;
use crate::error::{Error, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("flexreport-ops/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Build a config from the `http` section of the settings
    pub fn from_settings(settings: &HttpSettings) -> Self {
        let mut builder = Self::builder()
            .timeout(settings.api_timeout())
            .user_agent(&settings.user_agent);
        for (key, value) in &settings.headers {
            builder = builder.header(key, value);
        }
        if let Some(rps) = settings.requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::new(rps, 1));
        }
        builder.build()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client used for GraphQL calls and downloads
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// POST a JSON body and parse the JSON response
    pub async fn post_json(&self, url: &str, body: &Value, bearer: Option<&str>) -> Result<Value> {
        let mut req = self
            .prepare(Method::POST, url, self.config.timeout)
            .await
            .json(body);

        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }

        let response = self.send(req, self.config.timeout).await?;
        let text = response.text().await?;
        let json: Value = serde_json::from_str(&text)?;
        Ok(json)
    }

    /// GET a URL, returning the successful response for streaming
    pub async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<Response> {
        let timeout = timeout.unwrap_or(self.config.timeout);
        let req = self.prepare(Method::GET, url, timeout).await;
        self.send(req, timeout).await
    }

    async fn prepare(&self, method: Method, url: &str, timeout: Duration) -> RequestBuilder {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method, url).timeout(timeout);
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        req
    }

    async fn send(&self, req: RequestBuilder, timeout: Duration) -> Result<Response> {
        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: {}", response.url());
        Ok(response)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
