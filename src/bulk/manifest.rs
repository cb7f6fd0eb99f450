//! Report definition manifest
//!
//! The manifest is a JSON array:
//!
//! ```json
//! [
//!   {
//!     "name": "Cost by Service",
//!     "description": "Monthly cost grouped by service",
//!     "sqlStatement": "SELECT ...",
//!     "dataGranularity": "MONTHLY",
//!     "limit": 100000,
//!     "timeRange": 12,
//!     "backlinking": false,
//!     "excludeCurrent": true
//!   }
//! ]
//! ```
//!
//! `limit` and `timeRange` may also be written as strings, and the two
//! booleans as `"true"`/`"false"`.

use crate::error::{Error, Result};
use crate::graphql::{operations, GraphQlRequest};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::path::Path;

/// One FlexReport to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub name: String,
    pub description: String,
    pub sql_statement: String,
    pub data_granularity: String,
    #[serde(deserialize_with = "int_or_string")]
    pub limit: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub time_range: i64,
    #[serde(deserialize_with = "bool_or_string")]
    pub backlinking: bool,
    #[serde(deserialize_with = "bool_or_string")]
    pub exclude_current: bool,
}

impl ReportDefinition {
    /// The `createFlexReport` mutation for this definition under `name`
    pub fn to_request(&self, name: &str) -> GraphQlRequest {
        GraphQlRequest::new(operations::CREATE_REPORT).variables(json!({
            "name": name,
            "description": self.description,
            "sqlStatement": self.sql_statement,
            "dataGranularity": self.data_granularity,
            "limit": self.limit,
            "timeRangeLast": self.time_range,
            "needBackLinkingForTags": self.backlinking,
            "excludeCurrent": self.exclude_current,
        }))
    }
}

/// Read and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Vec<ReportDefinition>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_manifest(&content)
}

/// Parse manifest JSON
pub fn parse_manifest(content: &str) -> Result<Vec<ReportDefinition>> {
    let definitions: Vec<ReportDefinition> = serde_json::from_str(content)?;
    if definitions.is_empty() {
        return Err(Error::config("Manifest contains no report definitions"));
    }
    Ok(definitions)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

fn int_or_string<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got '{s}'"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(b) => Ok(b),
        BoolOrString::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "expected a boolean, got '{s}'"
            ))),
        },
    }
}
