//! In-memory project register and its lifecycle mutations
//!
//! Projects are addressed by name. Names are not required to be unique; when
//! several records share a name, the first one in register order is the one
//! edited or completed.

use chrono::NaiveDate;
use projlight_core::{ProjectRecord, ProjectStatus};
use tracing::info;

use crate::{SkippedRow, StoreError};

/// Field changes for an edit; `None` leaves a field untouched
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectEdit {
    pub name: Option<String>,
    pub officer: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub target_completion_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

impl ProjectEdit {
    pub fn is_empty(&self) -> bool {
        self == &ProjectEdit::default()
    }
}

/// Ordered collection of project records.
///
/// Rows that failed validation on load ride along untouched so a save does
/// not drop them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Register {
    records: Vec<ProjectRecord>,
    skipped: Vec<SkippedRow>,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_skipped(records: Vec<ProjectRecord>, skipped: Vec<SkippedRow>) -> Self {
        Self { records, skipped }
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Rows kept from the loaded file that are not valid records
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn into_records(self) -> Vec<ProjectRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of the first record called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&ProjectRecord> {
        self.position(name).map(|i| &self.records[i])
    }

    /// Append a new project, stamping `last_update` with `today`
    pub fn add(&mut self, record: ProjectRecord, today: NaiveDate) -> Result<&ProjectRecord, StoreError> {
        record.validate()?;
        let record = record.last_update(today);
        info!(project = %record.name, status = %record.status, "project added");
        self.records.push(record);
        let last = self.records.len() - 1;
        Ok(&self.records[last])
    }

    /// Apply `edit` to the first record called `name`
    pub fn update(
        &mut self,
        name: &str,
        edit: ProjectEdit,
        today: NaiveDate,
    ) -> Result<&ProjectRecord, StoreError> {
        let index = self.position(name).ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let mut updated = self.records[index].clone();
        if let Some(new_name) = edit.name {
            updated.name = new_name;
        }
        if let Some(officer) = edit.officer {
            updated.officer = officer;
        }
        if let Some(status) = edit.status {
            updated.status = status;
        }
        if let Some(start) = edit.start_date {
            updated.start_date = start;
        }
        if let Some(target) = edit.target_completion_date {
            updated.target_completion_date = target;
        }
        if let Some(remarks) = edit.remarks {
            updated.remarks = remarks;
        }
        updated.validate()?;
        updated.last_update = today;

        info!(project = %name, renamed_to = %updated.name, "project updated");
        self.records[index] = updated;
        Ok(&self.records[index])
    }

    /// Set the first record called `name` to Completed
    pub fn mark_completed(&mut self, name: &str, today: NaiveDate) -> Result<&ProjectRecord, StoreError> {
        let index = self.position(name).ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        let record = &mut self.records[index];
        record.status = ProjectStatus::Completed;
        record.last_update = today;
        info!(project = %name, "project marked completed");
        Ok(&self.records[index])
    }
}

impl From<Vec<ProjectRecord>> for Register {
    fn from(records: Vec<ProjectRecord>) -> Self {
        Self {
            records,
            skipped: Vec::new(),
        }
    }
}
