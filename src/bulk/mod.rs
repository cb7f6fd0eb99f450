//! Bulk FlexReport creation
//!
//! Reads report definitions from a JSON manifest and creates one FlexReport
//! per entry. A failed entry is logged and skipped; the run always ends by
//! writing the created IDs and names to two list files.

mod creator;
mod manifest;

pub use creator::{unique_name, BulkCreator, BulkSummary, CreatedReport, FailedReport};
pub use manifest::{load_manifest, parse_manifest, ReportDefinition};
