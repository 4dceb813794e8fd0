//! Portfolio status board
//!
//! This module provides the views built on top of derived statuses: the
//! overdue / due-soon / still-in-progress lists, the Gantt category filter,
//! and an aggregated summary answering "how is the portfolio doing today?"
//!
//! # Core Concepts
//!
//! - **StatusBoard**: one derivation batch, fixed to a single reference date
//! - **PortfolioSummary**: counts per category and per stored status
//! - **HealthIndicator**: Healthy, Attention, or Critical classification
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use projlight_core::{HealthIndicator, ProjectRecord, ProjectStatus, StatusBoard};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
//! let records = vec![
//!     ProjectRecord::new(
//!         "Audit",
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
//!     )
//!     .status(ProjectStatus::InProgress),
//! ];
//!
//! let board = StatusBoard::new("Portfolio", today, &records);
//! assert_eq!(board.overdue().count(), 1);
//! assert_eq!(board.summary().health(), HealthIndicator::Critical);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::derive::{DerivedProject, StatusDeriver};
use crate::{ComputedStatus, ProjectCategory, ProjectRecord, ProjectStatus};

// ============================================================================
// Status board
// ============================================================================

/// Derived projects for one reference date
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusBoard {
    /// Display title
    pub title: String,
    /// Reference date every project was judged against
    pub today: NaiveDate,
    /// Working days in the due-soon window
    pub upcoming: Vec<NaiveDate>,
    /// Projects in input order
    pub projects: Vec<DerivedProject>,
}

impl StatusBoard {
    /// Derive `records` against `today` with the standard window
    pub fn new(title: impl Into<String>, today: NaiveDate, records: &[ProjectRecord]) -> Self {
        Self::from_deriver(title, &StatusDeriver::new(today), records)
    }

    pub fn from_deriver(
        title: impl Into<String>,
        deriver: &StatusDeriver,
        records: &[ProjectRecord],
    ) -> Self {
        Self {
            title: title.into(),
            today: deriver.today(),
            upcoming: deriver.upcoming().to_vec(),
            projects: deriver.derive_all_par(records),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn is_upcoming(&self, date: NaiveDate) -> bool {
        self.upcoming.contains(&date)
    }

    /// Projects whose computed status is Overdue
    pub fn overdue(&self) -> impl Iterator<Item = &DerivedProject> {
        self.projects.iter().filter(|p| p.is_overdue())
    }

    /// In-progress projects due within the working-day window
    pub fn due_soon(&self) -> impl Iterator<Item = &DerivedProject> {
        self.projects.iter().filter(move |p| {
            p.derived.computed_status == ComputedStatus::InProgress
                && self.is_upcoming(p.record.target_completion_date)
        })
    }

    /// In-progress projects due after the window.
    ///
    /// A target date equal to `today` matches none of the three lists.
    pub fn other_in_progress(&self) -> impl Iterator<Item = &DerivedProject> {
        self.projects.iter().filter(move |p| {
            let target = p.record.target_completion_date;
            p.derived.computed_status == ComputedStatus::InProgress
                && !self.is_upcoming(target)
                && target > self.today
        })
    }

    /// Projects in any of `categories`, sorted by start date
    pub fn by_categories(&self, categories: &[ProjectCategory]) -> Vec<&DerivedProject> {
        let mut selected: Vec<&DerivedProject> = self
            .projects
            .iter()
            .filter(|p| categories.contains(&p.category()))
            .collect();
        selected.sort_by_key(|p| p.record.start_date);
        selected
    }

    /// Copy of this board restricted to `categories`
    pub fn filtered(&self, categories: &[ProjectCategory]) -> StatusBoard {
        StatusBoard {
            title: self.title.clone(),
            today: self.today,
            upcoming: self.upcoming.clone(),
            projects: self.by_categories(categories).into_iter().cloned().collect(),
        }
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_projects(self.today, &self.projects)
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Health classification for the portfolio
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthIndicator {
    /// Nothing overdue, nothing due in the window
    Healthy,
    /// Deadlines inside the window, nothing overdue
    Attention,
    /// At least one overdue project
    Critical,
}

impl HealthIndicator {
    /// Get the display string for this indicator
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthIndicator::Healthy => "Healthy",
            HealthIndicator::Attention => "Attention",
            HealthIndicator::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for HealthIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated portfolio metrics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// As-of date
    pub status_date: NaiveDate,

    pub total_projects: usize,

    /// Counts by category
    pub completed: usize,
    pub overdue: usize,
    pub due_soon: usize,
    pub in_progress: usize,

    /// Counts by stored status
    pub not_started: usize,
    pub started: usize,
}

impl PortfolioSummary {
    pub fn from_projects(status_date: NaiveDate, projects: &[DerivedProject]) -> Self {
        let mut summary = Self {
            status_date,
            total_projects: projects.len(),
            completed: 0,
            overdue: 0,
            due_soon: 0,
            in_progress: 0,
            not_started: 0,
            started: 0,
        };

        for project in projects {
            match project.category() {
                ProjectCategory::Completed => summary.completed += 1,
                ProjectCategory::Overdue => summary.overdue += 1,
                ProjectCategory::DueSoon => summary.due_soon += 1,
                ProjectCategory::InProgress => summary.in_progress += 1,
            }
            match project.record.status {
                ProjectStatus::NotStarted => summary.not_started += 1,
                ProjectStatus::InProgress => summary.started += 1,
                ProjectStatus::Completed => {}
            }
        }

        summary
    }

    /// - Critical: anything overdue
    /// - Attention: something due soon
    /// - Healthy: otherwise
    pub fn health(&self) -> HealthIndicator {
        if self.overdue > 0 {
            HealthIndicator::Critical
        } else if self.due_soon > 0 {
            HealthIndicator::Attention
        } else {
            HealthIndicator::Healthy
        }
    }

    /// Share of projects completed (0-100)
    pub fn completion_percent(&self) -> u8 {
        if self.total_projects == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total_projects) as u8
    }
}

// ============================================================================
// Tests
// ============================================================================
