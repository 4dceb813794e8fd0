//! Status derivation
//!
//! Turns a stored `ProjectRecord` into its computed status, category and
//! traffic light relative to a fixed reference date.
//!
//! The rules, first match wins:
//!
//! | Computed status | Target in next working days | Category | Light |
//! |-----------------|-----------------------------|-------------|--------|
//! | Completed | - | Completed | Blue |
//! | Overdue | - | Overdue | Red |
//! | In Progress | yes | Due Soon | Yellow |
//! | In Progress | no | In Progress | Green |
//! | Not Started | - | In Progress | Green |
//!
//! A record is overdue when it is not completed and its target date is
//! strictly before the reference date. The working-day window starts the day
//! after the reference date, so a target equal to the reference date is
//! neither overdue nor due soon.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, DEFAULT_LOOKAHEAD};
use crate::{ComputedStatus, ProjectCategory, ProjectRecord, ProjectStatus, TrafficLight};

/// The three derived fields for one record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStatus {
    pub computed_status: ComputedStatus,
    pub project_category: ProjectCategory,
    pub traffic_light: TrafficLight,
}

/// A record together with its derived fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedProject {
    #[serde(flatten)]
    pub record: ProjectRecord,
    #[serde(flatten)]
    pub derived: DerivedStatus,
}

impl DerivedProject {
    pub fn is_overdue(&self) -> bool {
        self.derived.computed_status == ComputedStatus::Overdue
    }

    pub fn is_due_soon(&self) -> bool {
        self.derived.project_category == ProjectCategory::DueSoon
    }

    pub fn category(&self) -> ProjectCategory {
        self.derived.project_category
    }
}

/// Derives statuses for a batch judged against one reference date.
///
/// The upcoming working-day window is computed once on construction and
/// reused for every record.
#[derive(Clone, Debug)]
pub struct StatusDeriver {
    today: NaiveDate,
    upcoming: Vec<NaiveDate>,
}

impl StatusDeriver {
    /// Deriver using the standard five-working-day window
    pub fn new(today: NaiveDate) -> Self {
        Self::with_lookahead(today, DEFAULT_LOOKAHEAD)
    }

    /// Deriver with a custom due-soon window size
    pub fn with_lookahead(today: NaiveDate, lookahead: usize) -> Self {
        Self {
            today,
            upcoming: Calendar::default().next_working_days(today, lookahead),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Working days that count as "due soon"
    pub fn upcoming(&self) -> &[NaiveDate] {
        &self.upcoming
    }

    pub fn is_upcoming(&self, date: NaiveDate) -> bool {
        self.upcoming.contains(&date)
    }

    pub fn computed_status(&self, record: &ProjectRecord) -> ComputedStatus {
        let is_overdue =
            record.status != ProjectStatus::Completed && record.target_completion_date < self.today;
        if is_overdue {
            ComputedStatus::Overdue
        } else {
            record.status.into()
        }
    }

    pub fn derive(&self, record: &ProjectRecord) -> DerivedStatus {
        let computed_status = self.computed_status(record);
        let project_category = match computed_status {
            ComputedStatus::Completed => ProjectCategory::Completed,
            ComputedStatus::Overdue => ProjectCategory::Overdue,
            ComputedStatus::InProgress if self.is_upcoming(record.target_completion_date) => {
                ProjectCategory::DueSoon
            }
            ComputedStatus::InProgress | ComputedStatus::NotStarted => ProjectCategory::InProgress,
        };

        DerivedStatus {
            computed_status,
            project_category,
            traffic_light: project_category.traffic_light(),
        }
    }

    /// Derive every record, preserving input order
    pub fn derive_all(&self, records: &[ProjectRecord]) -> Vec<DerivedProject> {
        records
            .iter()
            .map(|record| DerivedProject {
                record: record.clone(),
                derived: self.derive(record),
            })
            .collect()
    }

    /// Parallel `derive_all`; identical output
    pub fn derive_all_par(&self, records: &[ProjectRecord]) -> Vec<DerivedProject> {
        records
            .par_iter()
            .map(|record| DerivedProject {
                record: record.clone(),
                derived: self.derive(record),
            })
            .collect()
    }
}

/// Derive a single record against `today`
pub fn derive_status(record: &ProjectRecord, today: NaiveDate) -> DerivedStatus {
    StatusDeriver::new(today).derive(record)
}
