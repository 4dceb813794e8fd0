//! CSV row schema
//!
//! Columns, in file order:
//!
//! ```text
//! Project Name,Officer,Status,Start Date,Target Completion Date,Last Update,Remarks
//! ```
//!
//! Rows are read as raw strings and validated separately so a bad cell
//! rejects only its own row.

use projlight_core::{ProjectRecord, RecordError};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One register row as it appears on disk
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRow {
    #[serde(rename = "Project Name")]
    pub name: String,
    #[serde(rename = "Officer", default)]
    pub officer: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "Target Completion Date")]
    pub target_completion_date: String,
    #[serde(rename = "Last Update")]
    pub last_update: String,
    #[serde(rename = "Remarks", default)]
    pub remarks: String,
}

impl ProjectRow {
    /// Validate and convert into a domain record
    pub fn into_record(self) -> Result<ProjectRecord, RecordError> {
        ProjectRecord::from_fields(
            self.name,
            self.officer,
            &self.status,
            &self.start_date,
            &self.target_completion_date,
            &self.last_update,
            self.remarks,
        )
    }
}

impl From<&ProjectRecord> for ProjectRow {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            name: record.name.clone(),
            officer: record.officer.clone(),
            status: record.status.to_string(),
            start_date: record.start_date.format(DATE_FORMAT).to_string(),
            target_completion_date: record.target_completion_date.format(DATE_FORMAT).to_string(),
            last_update: record.last_update.format(DATE_FORMAT).to_string(),
            remarks: record.remarks.clone(),
        }
    }
}
