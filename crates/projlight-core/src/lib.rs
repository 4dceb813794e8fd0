//! # projlight-core
//!
//! Core domain model and status-derivation engine for projlight.
//!
//! This crate provides:
//! - Domain types: `ProjectRecord`, `ProjectStatus`, and the derived
//!   `ComputedStatus`, `ProjectCategory`, `TrafficLight`
//! - Working-day calendar (`calendar`)
//! - Status derivation (`derive`)
//! - Display partitions and portfolio summary (`report`)
//! - Error types and the `Renderer` trait
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use projlight_core::{derive_status, ProjectRecord, ProjectStatus, TrafficLight};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
//! let record = ProjectRecord::new(
//!     "Website refresh",
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 18).unwrap(),
//! )
//! .officer("Dana")
//! .status(ProjectStatus::InProgress);
//!
//! let derived = derive_status(&record, today);
//! assert_eq!(derived.traffic_light, TrafficLight::Yellow);
//! ```

pub mod calendar;
pub mod derive;
pub mod report;

pub use calendar::{next_working_days, Calendar, DEFAULT_LOOKAHEAD};
pub use derive::{derive_status, DerivedProject, DerivedStatus, StatusDeriver};
pub use report::{HealthIndicator, PortfolioSummary, StatusBoard};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Stored status
// ============================================================================

/// Lifecycle status as set by the user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectStatus {
    /// All stored statuses, in lifecycle order
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "Not Started",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "not started" => Ok(ProjectStatus::NotStarted),
            "in progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            _ => Err(RecordError::InvalidRecord(format!("unknown status '{}'", s.trim()))),
        }
    }
}

/// Lowercase and unify `-`/`_` separators so "in-progress" matches "In Progress"
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c.to_ascii_lowercase() })
        .collect()
}

// ============================================================================
// Derived values
// ============================================================================

/// Effective lifecycle status after the overdue override
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComputedStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Overdue")]
    Overdue,
}

impl ComputedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComputedStatus::NotStarted => "Not Started",
            ComputedStatus::InProgress => "In Progress",
            ComputedStatus::Completed => "Completed",
            ComputedStatus::Overdue => "Overdue",
        }
    }
}

impl From<ProjectStatus> for ComputedStatus {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::NotStarted => ComputedStatus::NotStarted,
            ProjectStatus::InProgress => ComputedStatus::InProgress,
            ProjectStatus::Completed => ComputedStatus::Completed,
        }
    }
}

impl std::fmt::Display for ComputedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Four-way bucket used for filtering and chart coloring
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "Overdue")]
    Overdue,
    #[serde(rename = "Due Soon")]
    DueSoon,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl ProjectCategory {
    /// All categories, in legend order
    pub const ALL: [ProjectCategory; 4] = [
        ProjectCategory::Completed,
        ProjectCategory::InProgress,
        ProjectCategory::DueSoon,
        ProjectCategory::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::Completed => "Completed",
            ProjectCategory::Overdue => "Overdue",
            ProjectCategory::DueSoon => "Due Soon",
            ProjectCategory::InProgress => "In Progress",
        }
    }

    /// Traffic light shown for this category (one-to-one)
    pub fn traffic_light(&self) -> TrafficLight {
        match self {
            ProjectCategory::Completed => TrafficLight::Blue,
            ProjectCategory::Overdue => TrafficLight::Red,
            ProjectCategory::DueSoon => TrafficLight::Yellow,
            ProjectCategory::InProgress => TrafficLight::Green,
        }
    }

    /// Bar color used by Gantt renderers
    pub fn chart_color(&self) -> &'static str {
        match self {
            ProjectCategory::Completed => "blue",
            ProjectCategory::Overdue => "red",
            ProjectCategory::DueSoon => "yellow",
            ProjectCategory::InProgress => "green",
        }
    }
}

impl std::fmt::Display for ProjectCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectCategory {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "completed" => Ok(ProjectCategory::Completed),
            "overdue" => Ok(ProjectCategory::Overdue),
            "due soon" => Ok(ProjectCategory::DueSoon),
            "in progress" => Ok(ProjectCategory::InProgress),
            _ => Err(RecordError::InvalidRecord(format!("unknown category '{}'", s.trim()))),
        }
    }
}

/// Four-color urgency indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLight {
    Blue,
    Red,
    Yellow,
    Green,
}

impl TrafficLight {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficLight::Blue => "Blue",
            TrafficLight::Red => "Red",
            TrafficLight::Yellow => "Yellow",
            TrafficLight::Green => "Green",
        }
    }

    /// Background color for table rows carrying this light
    pub fn row_color(&self) -> &'static str {
        match self {
            TrafficLight::Blue => "lightblue",
            TrafficLight::Red => "red",
            TrafficLight::Yellow => "yellow",
            TrafficLight::Green => "lightgreen",
        }
    }
}

impl std::fmt::Display for TrafficLight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Project record
// ============================================================================

/// A tracked project as stored by the register
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Selection key (not required to be unique)
    pub name: String,
    /// Responsible officer
    pub officer: String,
    /// User-set lifecycle status
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub target_completion_date: NaiveDate,
    /// Date of the last create/edit, maintained by the register
    pub last_update: NaiveDate,
    pub remarks: String,
}

impl ProjectRecord {
    /// Create a not-started record; `last_update` defaults to the start date
    pub fn new(name: impl Into<String>, start_date: NaiveDate, target_completion_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            officer: String::new(),
            status: ProjectStatus::NotStarted,
            start_date,
            target_completion_date,
            last_update: start_date,
            remarks: String::new(),
        }
    }

    pub fn officer(mut self, officer: impl Into<String>) -> Self {
        self.officer = officer.into();
        self
    }

    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    pub fn last_update(mut self, date: NaiveDate) -> Self {
        self.last_update = date;
        self
    }

    /// Build a record from its stored text fields.
    ///
    /// Fails with `InvalidRecord` on an empty name or unknown status, and
    /// with `InvalidDate` (naming the column) on an unparseable date.
    pub fn from_fields(
        name: impl Into<String>,
        officer: impl Into<String>,
        status: &str,
        start_date: &str,
        target_completion_date: &str,
        last_update: &str,
        remarks: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let record = Self {
            name: name.into(),
            officer: officer.into(),
            status: status.parse()?,
            start_date: parse_date("Start Date", start_date)?,
            target_completion_date: parse_date("Target Completion Date", target_completion_date)?,
            last_update: parse_date("Last Update", last_update)?,
            remarks: remarks.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Reject records the loading layer must not hand to the deriver
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::InvalidRecord("project name is empty".into()));
        }
        Ok(())
    }
}

/// Parse a calendar date, ignoring any time-of-day component.
///
/// Accepts `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS` (also with a `T` separator).
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RecordError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }
    Err(RecordError::InvalidDate {
        field,
        value: trimmed.to_string(),
    })
}

// ============================================================================
// Traits
// ============================================================================

/// Output renderer for a derived status board
pub trait Renderer {
    type Output;

    fn render(&self, board: &StatusBoard) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// A record that cannot enter derivation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid date in '{field}': '{value}'")]
    InvalidDate { field: &'static str, value: String },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn record_builder() {
        let record = ProjectRecord::new("Migration", date(2024, 5, 1), date(2024, 7, 1))
            .officer("Lee")
            .status(ProjectStatus::InProgress)
            .remarks("phase 2")
            .last_update(date(2024, 6, 3));

        assert_eq!(record.name, "Migration");
        assert_eq!(record.officer, "Lee");
        assert_eq!(record.status, ProjectStatus::InProgress);
        assert_eq!(record.remarks, "phase 2");
        assert_eq!(record.last_update, date(2024, 6, 3));
    }

    #[test]
    fn record_from_fields() {
        let record = ProjectRecord::from_fields(
            "Migration",
            "Lee",
            "in progress",
            "2024-05-01",
            "2024-07-01 00:00:00",
            "2024-06-03",
            "",
        )
        .unwrap();
        assert_eq!(record.status, ProjectStatus::InProgress);
        assert_eq!(record.target_completion_date, date(2024, 7, 1));
        assert_eq!(record.last_update, date(2024, 6, 3));
    }

    #[test]
    fn record_from_fields_rejects_bad_input() {
        let unknown_status =
            ProjectRecord::from_fields("x", "", "On Hold", "2024-05-01", "2024-07-01", "2024-05-01", "");
        assert!(matches!(unknown_status, Err(RecordError::InvalidRecord(_))));

        let blank_name =
            ProjectRecord::from_fields("  ", "", "Completed", "2024-05-01", "2024-07-01", "2024-05-01", "");
        assert!(matches!(blank_name, Err(RecordError::InvalidRecord(_))));

        let bad_date = ProjectRecord::from_fields("x", "", "Completed", "2024-05-01", "soon", "2024-05-01", "");
        assert_eq!(
            bad_date,
            Err(RecordError::InvalidDate {
                field: "Target Completion Date",
                value: "soon".into(),
            })
        );
    }

    #[test]
    fn new_record_defaults() {
        let record = ProjectRecord::new("x", date(2024, 5, 1), date(2024, 7, 1));
        assert_eq!(record.status, ProjectStatus::NotStarted);
        assert_eq!(record.last_update, date(2024, 5, 1));
        assert!(record.officer.is_empty());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let record = ProjectRecord::new("   ", date(2024, 5, 1), date(2024, 7, 1));
        assert!(matches!(record.validate(), Err(RecordError::InvalidRecord(_))));
        let ok = ProjectRecord::new("a", date(2024, 5, 1), date(2024, 7, 1));
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn status_parse_and_display() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.to_string().parse::<ProjectStatus>().unwrap(), status);
        }
        assert_eq!("in-progress".parse::<ProjectStatus>().unwrap(), ProjectStatus::InProgress);
        assert_eq!(" COMPLETED ".parse::<ProjectStatus>().unwrap(), ProjectStatus::Completed);
    }

    #[test]
    fn status_parse_rejects_unknown() {
        let err = "Blocked".parse::<ProjectStatus>().unwrap_err();
        assert!(matches!(err, RecordError::InvalidRecord(_)));
        assert!(err.to_string().contains("Blocked"));
    }

    #[test]
    fn overdue_is_not_a_stored_status() {
        assert!("Overdue".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn category_parse() {
        assert_eq!("due-soon".parse::<ProjectCategory>().unwrap(), ProjectCategory::DueSoon);
        assert_eq!("Due Soon".parse::<ProjectCategory>().unwrap(), ProjectCategory::DueSoon);
        assert_eq!("in_progress".parse::<ProjectCategory>().unwrap(), ProjectCategory::InProgress);
        assert!("later".parse::<ProjectCategory>().is_err());
    }

    #[test]
    fn category_lookup_tables() {
        assert_eq!(ProjectCategory::Completed.traffic_light(), TrafficLight::Blue);
        assert_eq!(ProjectCategory::Overdue.traffic_light(), TrafficLight::Red);
        assert_eq!(ProjectCategory::DueSoon.traffic_light(), TrafficLight::Yellow);
        assert_eq!(ProjectCategory::InProgress.traffic_light(), TrafficLight::Green);

        assert_eq!(ProjectCategory::Completed.chart_color(), "blue");
        assert_eq!(ProjectCategory::InProgress.chart_color(), "green");
        assert_eq!(ProjectCategory::DueSoon.chart_color(), "yellow");
        assert_eq!(ProjectCategory::Overdue.chart_color(), "red");
    }

    #[test]
    fn traffic_light_row_colors() {
        assert_eq!(TrafficLight::Red.row_color(), "red");
        assert_eq!(TrafficLight::Yellow.row_color(), "yellow");
        assert_eq!(TrafficLight::Green.row_color(), "lightgreen");
        assert_eq!(TrafficLight::Blue.row_color(), "lightblue");
    }

    #[test]
    fn computed_status_from_stored() {
        assert_eq!(ComputedStatus::from(ProjectStatus::NotStarted), ComputedStatus::NotStarted);
        assert_eq!(ComputedStatus::from(ProjectStatus::InProgress), ComputedStatus::InProgress);
        assert_eq!(ComputedStatus::from(ProjectStatus::Completed), ComputedStatus::Completed);
        assert_eq!(ComputedStatus::Overdue.to_string(), "Overdue");
    }

    #[test]
    fn parse_date_formats() {
        assert_eq!(parse_date("Start Date", "2024-06-14").unwrap(), date(2024, 6, 14));
        assert_eq!(parse_date("Start Date", "2024-06-14 00:00:00").unwrap(), date(2024, 6, 14));
        assert_eq!(parse_date("Start Date", "2024-06-14T17:45:00").unwrap(), date(2024, 6, 14));
        assert_eq!(parse_date("Start Date", " 2024-06-14 ").unwrap(), date(2024, 6, 14));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let err = parse_date("Target Completion Date", "14/06/2024").unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidDate {
                field: "Target Completion Date",
                value: "14/06/2024".into()
            }
        );
        assert!(parse_date("Last Update", "").is_err());
        assert!(parse_date("Last Update", "2024-02-30").is_err());
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&ProjectStatus::NotStarted).unwrap();
        assert_eq!(json, "\"Not Started\"");
        let json = serde_json::to_string(&ProjectCategory::DueSoon).unwrap();
        assert_eq!(json, "\"Due Soon\"");
        let back: ComputedStatus = serde_json::from_str("\"Overdue\"").unwrap();
        assert_eq!(back, ComputedStatus::Overdue);
    }

    #[test]
    fn record_error_display() {
        let err = RecordError::InvalidRecord("project name is empty".into());
        assert!(err.to_string().contains("project name is empty"));

        let err = RenderError::InvalidData("No projects".into());
        assert!(err.to_string().contains("No projects"));
    }
}
