//! Common types used throughout flexreport-ops
//!
//! The report status enumeration used by both the poll loop and the CLI
//! output.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Report Status
// ============================================================================

/// Execution status of a FlexReport as reported by the latest poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReportStatus {
    /// Waiting for resources on the platform side
    Queued,
    /// Executing
    Running,
    /// Finished; contents carry download URLs
    Completed,
    /// Execution failed
    Failed,
    /// Any status value this client does not know about
    Other(String),
}

impl ReportStatus {
    /// Parse a raw API status string
    pub fn parse(raw: &str) -> Self {
        match raw {
            "QUEUED" => Self::Queued,
            "RUNNING" => Self::Running,
            "COMPLETED" => Self::Completed,
            "FAILED" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    /// The status as the API spells it
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ReportStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("QUEUED", ReportStatus::Queued ; "queued")]
    #[test_case("RUNNING", ReportStatus::Running ; "running")]
    #[test_case("COMPLETED", ReportStatus::Completed ; "completed")]
    #[test_case("FAILED", ReportStatus::Failed ; "failed")]
    #[test_case("PROCESSING", ReportStatus::Other("PROCESSING".to_string()) ; "unknown")]
    fn test_parse_status(raw: &str, expected: ReportStatus) {
        assert_eq!(ReportStatus::parse(raw), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[test]
    fn test_status_serde() {
        let status: ReportStatus = serde_json::from_str("\"COMPLETED\"").unwrap();
        assert_eq!(status, ReportStatus::Completed);
        assert_eq!(
            serde_json::to_string(&ReportStatus::Other("X".to_string())).unwrap(),
            "\"X\""
        );
    }
}
