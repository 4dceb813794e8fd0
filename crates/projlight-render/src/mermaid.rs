//! MermaidJS Gantt chart renderer
//!
//! Generates text-based Gantt charts in MermaidJS format, suitable for
//! embedding in Markdown documentation, GitHub, wikis, and other platforms.
//!
//! ## Example Output
//!
//! ```text
//! gantt
//!     title Project Gantt Chart
//!     dateFormat YYYY-MM-DD
//!
//!     section Overdue
//!     Audit            :crit, p1, 2024-04-01, 2024-06-10
//!
//!     section Due Soon
//!     Payroll upgrade  :active, p2, 2024-05-01, 2024-06-18
//! ```

use chrono::NaiveDate;
use projlight_core::{DerivedProject, ProjectCategory, RenderError, Renderer, StatusBoard};

/// MermaidJS Gantt chart renderer
#[derive(Clone, Debug)]
pub struct MermaidRenderer {
    /// Whether to group bars into one section per category
    pub show_sections: bool,
    /// Whether to add crit/active/done tags from the category
    pub show_category_tags: bool,
    /// Date format (MermaidJS format string)
    pub date_format: String,
    /// Exclude weekends from the time axis
    pub exclude_weekends: bool,
}

impl Default for MermaidRenderer {
    fn default() -> Self {
        Self {
            show_sections: true,
            show_category_tags: true,
            date_format: "YYYY-MM-DD".into(),
            exclude_weekends: false,
        }
    }
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable sections grouping
    pub fn no_sections(mut self) -> Self {
        self.show_sections = false;
        self
    }

    /// Disable crit/active/done tags
    pub fn no_tags(mut self) -> Self {
        self.show_category_tags = false;
        self
    }

    /// Exclude weekends (use excludes directive)
    pub fn exclude_weekends(mut self) -> Self {
        self.exclude_weekends = true;
        self
    }

    /// Sanitize a project name for Mermaid (escape special characters)
    fn sanitize_name(name: &str) -> String {
        // Mermaid is sensitive to colons and special chars in task names
        name.replace(':', "-")
            .replace(';', "-")
            .replace('#', "")
            .replace('\n', " ")
            .replace('\r', "")
    }

    fn tag(category: ProjectCategory) -> Option<&'static str> {
        match category {
            ProjectCategory::Completed => Some("done"),
            ProjectCategory::Overdue => Some("crit"),
            ProjectCategory::DueSoon => Some("active"),
            ProjectCategory::InProgress => None,
        }
    }

    fn format_date(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Format a single bar line
    fn format_project_line(&self, id: usize, project: &DerivedProject) -> String {
        let record = &project.record;
        let mut parts = Vec::new();

        if self.show_category_tags {
            if let Some(tag) = Self::tag(project.category()) {
                parts.push(tag.to_string());
            }
        }

        parts.push(format!("p{}", id));
        parts.push(Self::format_date(record.start_date));
        // Mermaid cannot draw a bar that ends before it starts
        parts.push(Self::format_date(record.target_completion_date.max(record.start_date)));

        format!("{} :{}", Self::sanitize_name(&record.name), parts.join(", "))
    }
}

impl Renderer for MermaidRenderer {
    type Output = String;

    fn render(&self, board: &StatusBoard) -> Result<String, RenderError> {
        if board.is_empty() {
            return Err(RenderError::InvalidData("No projects to render".into()));
        }

        let mut output = String::new();

        // Header
        output.push_str("gantt\n");
        output.push_str(&format!("    title {}\n", Self::sanitize_name(&board.title)));
        output.push_str(&format!("    dateFormat {}\n", self.date_format));

        if self.exclude_weekends {
            output.push_str("    excludes weekends\n");
        }

        output.push('\n');

        // Ids follow the board's input order so they stay stable across filters
        let mut projects: Vec<(usize, &DerivedProject)> =
            board.projects.iter().enumerate().map(|(i, p)| (i + 1, p)).collect();
        projects.sort_by_key(|(_, p)| p.record.start_date);

        if self.show_sections {
            for category in ProjectCategory::ALL {
                let in_section: Vec<_> = projects.iter().filter(|(_, p)| p.category() == category).collect();
                if in_section.is_empty() {
                    continue;
                }
                output.push_str(&format!("    section {}\n", category));
                for (id, project) in in_section {
                    output.push_str(&format!("    {}\n", self.format_project_line(*id, project)));
                }
                output.push('\n');
            }
        } else {
            for (id, project) in &projects {
                output.push_str(&format!("    {}\n", self.format_project_line(*id, project)));
            }
        }

        Ok(output)
    }
}
