//! Bulk creation loop

use super::manifest::ReportDefinition;
use crate::error::{Error, Result};
use crate::graphql::{check_errors, value_at};
use crate::report::FlexReportApi;
use rand::Rng;
use serde_json::Value;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, warn};

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `"{base} {SUFFIX}"` with a random uppercase alphanumeric suffix
pub fn unique_name(base: &str, suffix_len: usize) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..suffix_len)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("{base} {suffix}")
}

/// A report the API confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedReport {
    pub id: String,
    pub name: String,
}

/// A report that could not be created
#[derive(Debug, Clone)]
pub struct FailedReport {
    pub name: String,
    pub reason: String,
}

/// Outcome of a bulk run
#[derive(Debug, Clone, Default)]
pub struct BulkSummary {
    pub created: Vec<CreatedReport>,
    pub failed: Vec<FailedReport>,
}

impl BulkSummary {
    /// IDs of created reports, in manifest order
    pub fn ids(&self) -> Vec<&str> {
        self.created.iter().map(|r| r.id.as_str()).collect()
    }

    /// Names of created reports, in manifest order
    pub fn names(&self) -> Vec<&str> {
        self.created.iter().map(|r| r.name.as_str()).collect()
    }

    /// Write both newline-delimited list files, even when empty
    pub fn write_lists(&self, ids_file: &Path, names_file: &Path) -> Result<()> {
        std::fs::write(ids_file, to_lines(&self.ids()))?;
        std::fs::write(names_file, to_lines(&self.names()))?;
        Ok(())
    }
}

fn to_lines(items: &[&str]) -> String {
    items.iter().fold(String::new(), |mut out, item| {
        let _ = writeln!(out, "{item}");
        out
    })
}

/// Creates FlexReports one after another
pub struct BulkCreator<'a> {
    api: &'a FlexReportApi,
    suffix_len: usize,
}

impl<'a> BulkCreator<'a> {
    /// Create a bulk creator
    pub fn new(api: &'a FlexReportApi, suffix_len: usize) -> Self {
        Self { api, suffix_len }
    }

    /// Create every definition; per-item failures are logged and skipped
    pub async fn run(&self, definitions: &[ReportDefinition]) -> BulkSummary {
        let mut summary = BulkSummary::default();

        for definition in definitions {
            let name = unique_name(&definition.name, self.suffix_len);

            match self.create_one(definition, &name).await {
                Ok(id) => {
                    info!(id = %id, "FlexReport '{name}' created successfully");
                    summary.created.push(CreatedReport { id, name });
                }
                Err(e) => {
                    warn!("Failed to create FlexReport '{name}': {e}");
                    summary.failed.push(FailedReport {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        summary
    }

    async fn create_one(&self, definition: &ReportDefinition, name: &str) -> Result<String> {
        let response = self.api.create_report(&definition.to_request(name)).await?;

        match created_id(&response) {
            Ok(id) => {
                if let Err(e) = check_errors(&response) {
                    warn!(id = %id, "FlexReport '{name}' created with errors: {e}");
                }
                Ok(id)
            }
            Err(missing) => {
                check_errors(&response)?;
                Err(missing)
            }
        }
    }
}

/// Unwrap `data.createFlexReport.id`, naming the first missing key
fn created_id(response: &Value) -> Result<String> {
    for path in ["data", "data.createFlexReport", "data.createFlexReport.id"] {
        if value_at(response, path).is_none() {
            return Err(Error::missing_field(path));
        }
    }

    value_at(response, "data.createFlexReport.id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::missing_field("data.createFlexReport.id"))
}
