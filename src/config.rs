//! Runtime settings
//!
//! Settings come from built-in defaults, optionally overridden by a YAML
//! file, then by the `CLOUDHEALTH_GRAPHQL_URL` environment variable.
//!
//! ```yaml
//! endpoint: https://apps.cloudhealthtech.com/graphql
//! http:
//!   api_timeout_secs: 30
//!   download_timeout_secs: 60
//! poll:
//!   initial_delay_secs: 15
//!   interval_secs: 10
//!   multiplier: 1.5
//!   max_checks: 5
//! bulk:
//!   ids_file: previous-run.list
//!   names_file: successful_reports.list
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Default CloudHealth GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://apps.cloudhealthtech.com/graphql";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "CLOUDHEALTH_GRAPHQL_URL";

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete settings for all three flows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// GraphQL endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Report status polling
    #[serde(default)]
    pub poll: PollSettings,

    /// Bulk creation outputs
    #[serde(default)]
    pub bulk: BulkSettings,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            http: HttpSettings::default(),
            poll: PollSettings::default(),
            bulk: BulkSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional YAML file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::file_not_found(p.display().to_string()));
                }
                let content = std::fs::read_to_string(p)?;
                Self::from_yaml(&content)?
            }
            None => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                settings.endpoint = endpoint.trim().to_string();
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a YAML string (no environment overrides)
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.endpoint)?;

        if self.poll.max_checks == 0 {
            return Err(Error::invalid_value(
                "poll.max_checks",
                "must be at least 1",
            ));
        }
        if self.poll.multiplier.is_nan() || self.poll.multiplier < 1.0 {
            return Err(Error::invalid_value(
                "poll.multiplier",
                format!("must be >= 1.0, got {}", self.poll.multiplier),
            ));
        }
        if self.bulk.suffix_len == 0 {
            return Err(Error::invalid_value("bulk.suffix_len", "must be at least 1"));
        }
        if self.http.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "http.requests_per_second",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Timeout for GraphQL calls in seconds
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,

    /// Timeout for report downloads in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Extra headers sent with every GraphQL request
    #[serde(default = "default_headers")]
    pub headers: HashMap<String, String>,

    /// Optional pacing of GraphQL requests
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

fn default_api_timeout() -> u64 {
    30
}

fn default_download_timeout() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("flexreport-ops/{}", env!("CARGO_PKG_VERSION"))
}

fn default_headers() -> HashMap<String, String> {
    HashMap::from([("Accept".to_string(), "application/json".to_string())])
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            api_timeout_secs: default_api_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
            headers: default_headers(),
            requests_per_second: None,
        }
    }
}

impl HttpSettings {
    /// API call timeout
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    /// Download timeout
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

// ============================================================================
// Poll Settings
// ============================================================================

/// Report status polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    /// Wait before the first status check
    #[serde(default = "default_initial_delay")]
    pub initial_delay_secs: u64,

    /// Base interval; multiplied before every wait between checks
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Growth factor applied to the interval
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Number of status checks before giving up
    #[serde(default = "default_max_checks")]
    pub max_checks: u32,
}

fn default_initial_delay() -> u64 {
    15
}

fn default_interval() -> u64 {
    10
}

fn default_multiplier() -> f64 {
    1.5
}

fn default_max_checks() -> u32 {
    5
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_delay_secs: default_initial_delay(),
            interval_secs: default_interval(),
            multiplier: default_multiplier(),
            max_checks: default_max_checks(),
        }
    }
}

// ============================================================================
// Bulk Settings
// ============================================================================

/// Bulk creation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSettings {
    /// File receiving the created report IDs
    #[serde(default = "default_ids_file")]
    pub ids_file: String,

    /// File receiving the names of successfully created reports
    #[serde(default = "default_names_file")]
    pub names_file: String,

    /// Length of the random suffix appended to report names
    #[serde(default = "default_suffix_len")]
    pub suffix_len: usize,
}

fn default_ids_file() -> String {
    "previous-run.list".to_string()
}

fn default_names_file() -> String {
    "successful_reports.list".to_string()
}

fn default_suffix_len() -> usize {
    6
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            ids_file: default_ids_file(),
            names_file: default_names_file(),
            suffix_len: default_suffix_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.http.api_timeout(), Duration::from_secs(30));
        assert_eq!(settings.http.download_timeout(), Duration::from_secs(60));
        assert_eq!(settings.poll.initial_delay_secs, 15);
        assert_eq!(settings.poll.interval_secs, 10);
        assert_eq!(settings.poll.max_checks, 5);
        assert_eq!(settings.bulk.ids_file, "previous-run.list");
        assert_eq!(settings.bulk.names_file, "successful_reports.list");
        assert_eq!(settings.bulk.suffix_len, 6);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r"
endpoint: http://localhost:9999/graphql
poll:
  max_checks: 8
";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.endpoint, "http://localhost:9999/graphql");
        assert_eq!(settings.poll.max_checks, 8);
        assert_eq!(settings.poll.interval_secs, 10);
        assert_eq!(settings.http.api_timeout_secs, 30);
        assert_eq!(
            settings.http.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let settings = Settings::from_yaml("   \n").unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = Settings::from_yaml("poll: [1, 2");
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.poll.max_checks = 0;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidConfigValue { .. })
        ));

        let mut settings = Settings::default();
        settings.poll.multiplier = 0.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.endpoint = "not a url".to_string();
        assert!(matches!(settings.validate(), Err(Error::InvalidUrl(_))));

        let mut settings = Settings::default();
        settings.http.requests_per_second = Some(0);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bulk:\n  suffix_len: 4").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.bulk.suffix_len, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load(Some(Path::new("/definitely/not/here.yaml")));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
