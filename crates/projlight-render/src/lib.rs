//! # projlight-render
//!
//! Rendering backends for projlight status boards.
//!
//! This crate provides:
//! - Plain-text dashboard (overdue / due soon / still in progress)
//! - Plain-text project table
//! - SVG Gantt chart rendering, bars colored by project category
//! - MermaidJS Gantt chart rendering (for Markdown/docs)
//!
//! ## Example
//!
//! ```rust,ignore
//! use projlight_core::{Renderer, StatusBoard};
//! use projlight_render::{MermaidRenderer, SvgRenderer, TextRenderer};
//!
//! let board = StatusBoard::new("Portfolio", today, &records);
//!
//! // Console dashboard
//! println!("{}", TextRenderer::new().render(&board)?);
//!
//! // Pure SVG output
//! let svg = SvgRenderer::default().render(&board)?;
//!
//! // MermaidJS for Markdown/documentation
//! let mermaid = MermaidRenderer::new().render(&board)?;
//! ```

pub mod mermaid;
pub mod text;

pub use mermaid::MermaidRenderer;
pub use text::{TableRenderer, TextRenderer};

use chrono::{Duration, NaiveDate};
use projlight_core::{DerivedProject, ProjectCategory, RenderError, Renderer, StatusBoard};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

/// SVG Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Width of the chart area (excluding labels) in pixels
    pub chart_width: u32,
    /// Height per project row in pixels
    pub row_height: u32,
    /// Width of the label column in pixels
    pub label_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Color of the reference-date marker
    pub today_color: String,
    /// Background color
    pub background_color: String,
    /// Grid line color
    pub grid_color: String,
    /// Text color
    pub text_color: String,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            chart_width: 800,
            row_height: 28,
            label_width: 180,
            header_height: 50,
            padding: 20,
            today_color: "#2c3e50".into(),
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    fn width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    fn height(&self, row_count: usize) -> u32 {
        self.padding * 2 + self.header_height + (row_count as u32 * self.row_height)
    }

    fn timeline(&self, start: NaiveDate, end: NaiveDate) -> Timeline {
        let days = (end - start).num_days().max(1) as f64;
        Timeline {
            start,
            end,
            origin_x: f64::from(self.padding + self.label_width),
            px_per_day: f64::from(self.chart_width) / days,
        }
    }

    /// Date ticks stepped from the reference date, so one tick falls on it
    /// whenever it is in range, plus the shaded due-soon window
    fn render_header(&self, board: &StatusBoard, timeline: &Timeline) -> Group {
        let mut group = Group::new().set("class", "header");
        let top = self.padding;
        let bottom = self.padding + self.header_height;

        group = group.add(
            Rectangle::new()
                .set("x", self.padding)
                .set("y", top)
                .set("width", self.label_width + self.chart_width)
                .set("height", self.header_height)
                .set("fill", "#f8f9fa"),
        );

        if let (Some(first), Some(last)) = (board.upcoming.first(), board.upcoming.last()) {
            let from = (*first).max(timeline.start);
            let to = last.succ_opt().unwrap_or(*last).min(timeline.end);
            if from < to {
                group = group.add(
                    Rectangle::new()
                        .set("class", "due-window")
                        .set("x", timeline.x(from))
                        .set("y", bottom - 10)
                        .set("width", timeline.x(to) - timeline.x(from))
                        .set("height", 10)
                        .set("fill", ProjectCategory::DueSoon.chart_color())
                        .set("fill-opacity", 0.35),
                );
            }
        }

        let step = tick_step(timeline.span_days());
        let offset = (board.today - timeline.start).num_days().rem_euclid(step);
        let mut current = timeline.start + Duration::days(offset);
        while current <= timeline.end {
            let x = timeline.x(current);
            group = group.add(
                Line::new()
                    .set("x1", x)
                    .set("y1", bottom - 10)
                    .set("x2", x)
                    .set("y2", bottom)
                    .set("stroke", self.text_color.as_str())
                    .set("stroke-width", 1),
            );

            let label = if step < 7 {
                current.format("%a %d").to_string()
            } else {
                current.format("%d %b").to_string()
            };
            let mut text = Text::new(label)
                .set("x", x)
                .set("y", bottom - 15)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 1)
                .set("fill", self.text_color.as_str())
                .set("text-anchor", "middle");
            if current == board.today {
                text = text.set("class", "today-label").set("font-weight", "bold");
            }
            group = group.add(text);

            current += Duration::days(step);
        }

        group
    }

    /// Render row separators
    fn render_grid(&self, row_count: usize) -> Group {
        let mut group = Group::new().set("class", "grid");
        let chart_top = self.padding + self.header_height;

        for i in 0..=row_count {
            let y = chart_top + (i as u32 * self.row_height);
            let line = Line::new()
                .set("x1", self.padding)
                .set("y1", y)
                .set("x2", self.padding + self.label_width + self.chart_width)
                .set("y2", y)
                .set("stroke", self.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(line);
        }

        group
    }

    /// Dashed vertical line on the reference date
    fn render_today(&self, x: f64, row_count: usize) -> Line {
        let chart_top = self.padding + self.header_height;
        Line::new()
            .set("class", "today")
            .set("x1", x)
            .set("y1", chart_top)
            .set("x2", x)
            .set("y2", chart_top + row_count as u32 * self.row_height)
            .set("stroke", self.today_color.as_str())
            .set("stroke-width", 1)
            .set("stroke-dasharray", "4 3")
    }

    /// Render a single project bar
    fn render_project(
        &self,
        project: &DerivedProject,
        row: usize,
        timeline: &Timeline,
    ) -> Group {
        let record = &project.record;
        let category = project.category();
        let mut group = Group::new()
            .set("class", "project")
            .set("data-category", category.as_str());

        let y = self.padding + self.header_height + (row as u32 * self.row_height);
        let bar_height = (self.row_height as f64 * 0.6) as u32;
        let bar_y = y + (self.row_height - bar_height) / 2;

        let label = Text::new(truncate(&record.name, 22))
            .set("x", self.padding + 8)
            .set("y", y + self.row_height / 2 + 4)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.text_color.as_str());
        group = group.add(label);

        let x_start = timeline.x(record.start_date);
        let x_end = timeline.x(record.target_completion_date);
        let bar_width = (x_end - x_start).max(4.0);

        let bar = Rectangle::new()
            .set("x", x_start)
            .set("y", bar_y)
            .set("width", bar_width)
            .set("height", bar_height)
            .set("rx", 3)
            .set("ry", 3)
            .set("fill", category.chart_color());
        group = group.add(bar);

        let highlight = Rectangle::new()
            .set("x", x_start)
            .set("y", bar_y)
            .set("width", bar_width)
            .set("height", bar_height / 3)
            .set("rx", 3)
            .set("ry", 3)
            .set("fill", "rgba(255,255,255,0.2)");
        group = group.add(highlight);

        group
    }

    /// Render the category legend
    fn render_legend(&self, y_offset: u32) -> Group {
        let mut group = Group::new().set("class", "legend");
        let x_start = self.padding as f64;
        let y = y_offset as f64 + 15.0;
        let box_size = 12.0;
        let spacing = 120.0;

        for (i, category) in ProjectCategory::ALL.iter().enumerate() {
            let x = x_start + spacing * i as f64;

            let swatch = Rectangle::new()
                .set("x", x)
                .set("y", y - box_size + 2.0)
                .set("width", box_size)
                .set("height", box_size)
                .set("rx", 2)
                .set("fill", category.chart_color());
            group = group.add(swatch);

            let label = Text::new(category.as_str())
                .set("x", x + box_size + 5.0)
                .set("y", y)
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size - 1)
                .set("fill", self.text_color.as_str());
            group = group.add(label);
        }

        group
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, board: &StatusBoard) -> Result<String, RenderError> {
        // Sort projects by start date
        let mut projects: Vec<&DerivedProject> = board.projects.iter().collect();
        projects.sort_by_key(|p| p.record.start_date);

        let (Some(chart_start), Some(chart_end)) = (
            projects.iter().map(|p| p.record.start_date).min(),
            projects
                .iter()
                .map(|p| p.record.target_completion_date.max(p.record.start_date))
                .max(),
        ) else {
            return Err(RenderError::InvalidData("No projects to render".into()));
        };

        let row_count = projects.len();
        let timeline = self.timeline(chart_start, chart_end);

        let width = self.width();
        let height = self.height(row_count) + 30; // legend

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.background_color.as_str());
        document = document.add(background);

        let title = Text::new(board.title.as_str())
            .set("x", self.padding)
            .set("y", self.padding + 15)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size + 4)
            .set("font-weight", "bold")
            .set("fill", self.text_color.as_str());
        document = document.add(title);

        document = document.add(self.render_grid(row_count));
        document = document.add(self.render_header(board, &timeline));

        for (row, project) in projects.iter().enumerate() {
            document = document.add(self.render_project(project, row, &timeline));
        }

        if (chart_start..=chart_end).contains(&board.today) {
            document = document.add(self.render_today(timeline.x(board.today), row_count));
        }

        let legend_y = self.padding + self.header_height + (row_count as u32 * self.row_height) + 10;
        document = document.add(self.render_legend(legend_y));

        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

/// Horizontal date scale of the chart area
struct Timeline {
    start: NaiveDate,
    end: NaiveDate,
    origin_x: f64,
    px_per_day: f64,
}

impl Timeline {
    fn x(&self, date: NaiveDate) -> f64 {
        self.origin_x + (date - self.start).num_days() as f64 * self.px_per_day
    }

    fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Days between header ticks: daily for short charts, otherwise whole weeks
/// sized to keep roughly a dozen labels
fn tick_step(span_days: i64) -> i64 {
    match span_days / 12 {
        0 => 1,
        n if n < 7 => n,
        n => n - n % 7,
    }
}

/// Truncate a string to a maximum number of characters with ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
