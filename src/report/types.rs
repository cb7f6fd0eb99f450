//! Report types as returned by the `node(id)` query

use crate::error::{Error, Result};
use crate::types::ReportStatus;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A FlexReport node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInfo {
    /// Opaque report identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Latest execution result
    #[serde(default)]
    pub result: Option<ReportResult>,
}

/// Latest execution result of a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub report_updated_on: Option<String>,
    #[serde(default)]
    pub contents: Option<Vec<ReportContent>>,
}

/// One downloadable output of a completed report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContent {
    /// Time-limited download link
    #[serde(default)]
    pub pre_signed_url: Option<String>,
}

impl ReportInfo {
    /// Non-empty display name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Status of the latest result; an empty status counts as absent
    pub fn status(&self) -> Option<&ReportStatus> {
        self.result
            .as_ref()?
            .status
            .as_ref()
            .filter(|s| !s.as_str().is_empty())
    }

    /// When the platform last updated the result, if it parses as RFC 3339
    pub fn updated_on(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.result.as_ref()?.report_updated_on.as_deref()?;
        DateTime::parse_from_rfc3339(raw).ok()
    }

    /// Pre-signed URL of the first content entry
    pub fn download_url(&self) -> Result<&str> {
        self.result
            .as_ref()
            .and_then(|r| r.contents.as_ref())
            .and_then(|c| c.first())
            .and_then(|c| c.pre_signed_url.as_deref())
            .filter(|url| !url.is_empty() && *url != "null")
            .ok_or_else(|| Error::missing_field("data.node.result.contents[0].preSignedUrl"))
    }
}
