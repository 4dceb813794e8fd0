//! Plain-text renderers for console output

use projlight_core::{DerivedProject, RenderError, Renderer, StatusBoard};

const HEADERS: [&str; 7] = ["Project", "Officer", "Status", "Computed", "Target", "Light", "Remarks"];

/// Console dashboard: summary, then the overdue, due-soon and
/// other-in-progress lists
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Print the summary block above the lists
    pub show_summary: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }

    fn render_summary(&self, board: &StatusBoard, out: &mut String) {
        let summary = board.summary();
        out.push_str(&format!("Project Status: {}\n", board.title));
        out.push_str(&format!("As of:    {}\n", board.today.format("%Y-%m-%d (%a)")));
        out.push_str(&format!("Health:   {}\n", summary.health().as_str().to_uppercase()));
        out.push_str(&format!(
            "Projects: {} ({}% completed)\n",
            summary.total_projects,
            summary.completion_percent()
        ));
        out.push_str(&format!(
            "  Completed: {}  In Progress: {}  Due Soon: {}  Overdue: {}\n",
            summary.completed, summary.in_progress, summary.due_soon, summary.overdue
        ));
        out.push('\n');
    }

    fn render_section<'a>(
        out: &mut String,
        heading: &str,
        projects: impl Iterator<Item = &'a DerivedProject>,
        empty_message: &str,
    ) {
        out.push_str(heading);
        out.push('\n');
        let projects: Vec<&DerivedProject> = projects.collect();
        if projects.is_empty() {
            out.push_str(&format!("  {}\n", empty_message));
        } else {
            out.push_str(&format_table(&projects));
        }
        out.push('\n');
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, board: &StatusBoard) -> Result<String, RenderError> {
        let mut out = String::new();

        if self.show_summary {
            self.render_summary(board, &mut out);
        }

        if board.is_empty() {
            out.push_str("No projects available yet. Add a new project first.\n");
            return Ok(out);
        }

        Self::render_section(&mut out, "Overdue Projects", board.overdue(), "No overdue projects!");

        let window = board.upcoming.len();
        let heading = match (board.upcoming.first(), board.upcoming.last()) {
            (Some(first), Some(last)) => format!(
                "Projects Due in the Next {} Working Days ({} .. {})",
                window,
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            ),
            _ => format!("Projects Due in the Next {} Working Days", window),
        };
        let empty = format!("No upcoming deadlines within the next {} working days!", window);
        Self::render_section(&mut out, &heading, board.due_soon(), &empty);

        Self::render_section(
            &mut out,
            "Other Projects Still In Progress",
            board.other_in_progress(),
            "No other ongoing projects.",
        );

        Ok(out)
    }
}

/// Every project on the board, one row each
#[derive(Clone, Debug, Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TableRenderer {
    type Output = String;

    fn render(&self, board: &StatusBoard) -> Result<String, RenderError> {
        if board.is_empty() {
            return Ok("No projects.\n".to_string());
        }
        let projects: Vec<&DerivedProject> = board.projects.iter().collect();
        Ok(format_table(&projects))
    }
}

fn row_cells(project: &DerivedProject) -> [String; 7] {
    let record = &project.record;
    [
        record.name.clone(),
        record.officer.clone(),
        record.status.to_string(),
        project.derived.computed_status.to_string(),
        record.target_completion_date.format("%Y-%m-%d").to_string(),
        project.derived.traffic_light.to_string(),
        record.remarks.replace(['\n', '\r'], " "),
    ]
}

/// Left-aligned columns sized to their widest cell
fn format_table(projects: &[&DerivedProject]) -> String {
    let rows: Vec<[String; 7]> = projects.iter().map(|p| row_cells(p)).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[&str]| -> String {
        let line = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        format!("  {}\n", line.trim_end())
    };

    let mut out = format_line(&HEADERS[..]);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_line(&cells[..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use projlight_core::{ProjectRecord, ProjectStatus};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_test_board() -> StatusBoard {
        let records = vec![
            ProjectRecord::new("Audit", date(2024, 4, 1), date(2024, 6, 10))
                .officer("Kim")
                .status(ProjectStatus::InProgress),
            ProjectRecord::new("Payroll", date(2024, 5, 1), date(2024, 6, 18))
                .officer("Sam")
                .status(ProjectStatus::InProgress),
            ProjectRecord::new("Archive", date(2024, 3, 1), date(2024, 4, 1)).status(ProjectStatus::Completed),
        ];
        StatusBoard::new("Portfolio", date(2024, 6, 14), &records)
    }

    #[test]
    fn dashboard_summary() {
        let out = TextRenderer::new().render(&create_test_board()).unwrap();
        assert!(out.contains("Project Status: Portfolio"));
        assert!(out.contains("As of:    2024-06-14 (Fri)"));
        assert!(out.contains("Health:   CRITICAL"));
        assert!(out.contains("Projects: 3 (33% completed)"));
    }

    #[test]
    fn dashboard_sections() {
        let out = TextRenderer::new().render(&create_test_board()).unwrap();
        let overdue = out.find("Overdue Projects").unwrap();
        let due = out.find("Projects Due in the Next 5 Working Days (2024-06-17 .. 2024-06-21)").unwrap();
        let other = out.find("Other Projects Still In Progress").unwrap();
        assert!(overdue < due && due < other);

        let audit = out.find("Audit").unwrap();
        let payroll = out.find("Payroll").unwrap();
        assert!(overdue < audit && audit < due);
        assert!(due < payroll && payroll < other);
        assert!(out.contains("No other ongoing projects."));
        // completed projects are on no list
        assert!(!out.contains("Archive"));
    }

    #[test]
    fn dashboard_empty_messages() {
        let records = vec![ProjectRecord::new("Later", date(2024, 5, 1), date(2024, 8, 1))
            .status(ProjectStatus::InProgress)];
        let board = StatusBoard::new("p", date(2024, 6, 14), &records);
        let out = TextRenderer::new().no_summary().render(&board).unwrap();
        assert!(out.starts_with("Overdue Projects\n"));
        assert!(out.contains("No overdue projects!"));
        assert!(out.contains("No upcoming deadlines within the next 5 working days!"));
        assert!(out.contains("Later"));
    }

    #[test]
    fn dashboard_empty_board() {
        let board = StatusBoard::new("p", date(2024, 6, 14), &[]);
        let out = TextRenderer::new().render(&board).unwrap();
        assert!(out.contains("Health:   HEALTHY"));
        assert!(out.contains("No projects available yet."));
    }

    #[test]
    fn table_lists_every_project() {
        let out = TableRenderer::new().render(&create_test_board()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  Project"));
        assert!(lines[1].contains("Overdue") && lines[1].contains("Red"));
        assert!(lines[2].contains("Yellow"));
        assert!(lines[3].contains("Completed") && lines[3].contains("Blue"));
    }

    #[test]
    fn table_columns_align() {
        let out = TableRenderer::new().render(&create_test_board()).unwrap();
        let positions: Vec<usize> = out.lines().map(|l| l.find("2024-").unwrap_or(0)).skip(1).collect();
        assert!(positions.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn table_empty_board() {
        let board = StatusBoard::new("p", date(2024, 6, 14), &[]);
        assert_eq!(TableRenderer::new().render(&board).unwrap(), "No projects.\n");
    }
}
