//! Error types for flexreport-ops
//!
//! Every flow in the crate returns `Result<T, Error>`. The taxonomy is flat:
//! configuration, transport, API-level, malformed response, report lifecycle,
//! and local filesystem failures.

use thiserror::Error;

/// The main error type for flexreport-ops
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Not authenticated: log in before calling the API")]
    NotAuthenticated,

    // ============================================================================
    // HTTP / API Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("GraphQL query failed: {}", messages.join(", "))]
    GraphQl { messages: Vec<String> },

    #[error("Missing field in API response: {path}")]
    MissingField { path: String },

    // ============================================================================
    // Report Lifecycle Errors
    // ============================================================================
    #[error("Report '{name}' is QUEUED; it may be waiting for resources")]
    ReportQueued { name: String },

    #[error("Report '{name}' execution FAILED")]
    ReportFailed { name: String },

    #[error("Report still running after {checks} checks")]
    PollTimeout { checks: u32 },

    #[error("Download failed: {message}")]
    Download { message: String },

    // ============================================================================
    // Conversion Errors
    // ============================================================================
    #[error("Conversion from CSV to Parquet failed: {0}")]
    Conversion(#[from] duckdb::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("{path} is not a file")]
    NotAFile { path: String },

    #[error("Operation cancelled by user")]
    Cancelled,

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a missing response field error
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    /// Create a download error
    pub fn download(message: impl Into<String>) -> Self {
        Self::Download {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// True for the three terminal non-success outcomes of the poll loop
    pub fn is_poll_terminal(&self) -> bool {
        matches!(
            self,
            Error::ReportQueued { .. } | Error::ReportFailed { .. } | Error::PollTimeout { .. }
        )
    }
}

/// Result type alias for flexreport-ops
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("data.createFlexReport.id");
        assert_eq!(
            err.to_string(),
            "Missing field in API response: data.createFlexReport.id"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::GraphQl {
            messages: vec!["bad id".to_string(), "denied".to_string()],
        };
        assert_eq!(err.to_string(), "GraphQL query failed: bad id, denied");
    }

    #[test]
    fn test_is_poll_terminal() {
        assert!(Error::ReportQueued {
            name: "r".to_string()
        }
        .is_poll_terminal());
        assert!(Error::ReportFailed {
            name: "r".to_string()
        }
        .is_poll_terminal());
        assert!(Error::PollTimeout { checks: 5 }.is_poll_terminal());

        assert!(!Error::NotAuthenticated.is_poll_terminal());
        assert!(!Error::http_status(500, "").is_poll_terminal());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
