//! projlight CLI - Project Status Tracking
//!
//! Command-line interface for maintaining the project register and viewing
//! derived statuses, urgency lights and Gantt charts.

mod config;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use projlight_core::{
    next_working_days, DerivedProject, ProjectCategory, ProjectRecord, ProjectStatus, Renderer, StatusBoard,
    StatusDeriver,
};
use projlight_render::{MermaidRenderer, SvgRenderer, TableRenderer, TextRenderer};
use projlight_store::{load_register, save_register, ProjectEdit, Register};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "projlight")]
#[command(author, version, about = "Project status tracking with working-day urgency lights", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project register (CSV)
    #[arg(long, global = true, env = "PROJLIGHT_DATA", value_name = "FILE")]
    data: Option<PathBuf>,

    /// Reference date (defaults to the local date)
    #[arg(long, global = true, env = "PROJLIGHT_TODAY", value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Config file (defaults to ./projlight.toml when present)
    #[arg(long, global = true, env = "PROJLIGHT_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GanttFormat {
    Mermaid,
    Svg,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status dashboard
    Status {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List projects with their derived status
    List {
        /// Only show these categories (completed, in-progress, due-soon, overdue)
        #[arg(short, long = "category", value_delimiter = ',')]
        categories: Vec<ProjectCategory>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a new project
    Add {
        /// Project name
        #[arg(long)]
        name: String,

        /// Responsible officer
        #[arg(long, default_value = "")]
        officer: String,

        /// Not Started, In Progress or Completed
        #[arg(long, default_value = "Not Started")]
        status: ProjectStatus,

        /// Start date (defaults to the reference date)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Target completion date
        #[arg(long)]
        target: NaiveDate,

        #[arg(long, default_value = "")]
        remarks: String,
    },

    /// Edit an existing project
    Edit {
        /// Name of the project to edit
        #[arg(value_name = "PROJECT")]
        project: String,

        /// New project name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        officer: Option<String>,

        #[arg(long)]
        status: Option<ProjectStatus>,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        target: Option<NaiveDate>,

        #[arg(long)]
        remarks: Option<String>,
    },

    /// Mark a project as completed
    Complete {
        /// Name of the project
        #[arg(value_name = "PROJECT")]
        project: String,
    },

    /// Generate a Gantt chart
    Gantt {
        /// Output format
        #[arg(short, long, value_enum, default_value = "mermaid")]
        format: GanttFormat,

        /// Only chart these categories
        #[arg(short, long = "category", value_delimiter = ',')]
        categories: Vec<ProjectCategory>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the working days after the reference date
    WorkingDays {
        /// Number of working days (defaults to the due-soon window)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // The reference date is fixed here for the whole run
    let settings = Settings::resolve(cli.data, cli.today, cli.config)?;

    match cli.command {
        Some(Commands::Status { format }) => cmd_status(&settings, format),
        Some(Commands::List { categories, format }) => cmd_list(&settings, &categories, format),
        Some(Commands::Add {
            name,
            officer,
            status,
            start,
            target,
            remarks,
        }) => {
            let record = ProjectRecord::new(name, start.unwrap_or(settings.today), target)
                .officer(officer)
                .status(status)
                .remarks(remarks);
            cmd_add(&settings, record)
        }
        Some(Commands::Edit {
            project,
            name,
            officer,
            status,
            start,
            target,
            remarks,
        }) => {
            let edit = ProjectEdit {
                name,
                officer,
                status,
                start_date: start,
                target_completion_date: target,
                remarks,
            };
            cmd_edit(&settings, &project, edit)
        }
        Some(Commands::Complete { project }) => cmd_complete(&settings, &project),
        Some(Commands::Gantt {
            format,
            categories,
            output,
        }) => cmd_gantt(&settings, format, &categories, output),
        Some(Commands::WorkingDays { count }) => {
            let count = count.unwrap_or(settings.lookahead);
            if count == 0 {
                bail!("working-day count must be at least 1");
            }
            for day in next_working_days(settings.today, count) {
                println!("{}", day.format("%Y-%m-%d %a"));
            }
            Ok(())
        }
        None => {
            println!("projlight - Project Status Tracking");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    } else {
        EnvFilter::new(default_level)
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load the register; invalid rows are logged by the store and left out of
/// every view, but kept for the next save
fn load(settings: &Settings) -> Result<Register> {
    let report = load_register(&settings.data)
        .with_context(|| format!("loading register {}", settings.data.display()))?;
    Ok(report.into_register())
}

fn save(settings: &Settings, register: &Register) -> Result<()> {
    save_register(&settings.data, register)
        .with_context(|| format!("saving register {}", settings.data.display()))
}

fn board(settings: &Settings, register: &Register) -> StatusBoard {
    let deriver = StatusDeriver::with_lookahead(settings.today, settings.lookahead);
    StatusBoard::from_deriver(settings.title.clone(), &deriver, register.records())
}

fn cmd_status(settings: &Settings, format: OutputFormat) -> Result<()> {
    let register = load(settings)?;
    let board = board(settings, &register);

    match format {
        OutputFormat::Text => print!("{}", TextRenderer::new().render(&board)?),
        OutputFormat::Json => {
            let summary = board.summary();
            let overdue: Vec<&DerivedProject> = board.overdue().collect();
            let due_soon: Vec<&DerivedProject> = board.due_soon().collect();
            let other_in_progress: Vec<&DerivedProject> = board.other_in_progress().collect();
            let value = serde_json::json!({
                "today": board.today,
                "upcoming": board.upcoming,
                "health": summary.health(),
                "summary": summary,
                "overdue": overdue,
                "due_soon": due_soon,
                "other_in_progress": other_in_progress,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

fn cmd_list(settings: &Settings, categories: &[ProjectCategory], format: OutputFormat) -> Result<()> {
    let register = load(settings)?;
    let mut board = board(settings, &register);
    if !categories.is_empty() {
        board = board.filtered(categories);
    }

    match format {
        OutputFormat::Text => print!("{}", TableRenderer::new().render(&board)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&board.projects)?),
    }
    Ok(())
}

fn cmd_add(settings: &Settings, record: ProjectRecord) -> Result<()> {
    let mut register = load(settings)?;
    let name = register.add(record, settings.today)?.name.clone();
    save(settings, &register)?;
    println!("Project '{}' added successfully!", name);
    Ok(())
}

fn cmd_edit(settings: &Settings, project: &str, edit: ProjectEdit) -> Result<()> {
    if edit.is_empty() {
        bail!("nothing to change for '{}': pass at least one field to edit", project);
    }
    let mut register = load(settings)?;
    let name = register.update(project, edit, settings.today)?.name.clone();
    save(settings, &register)?;
    println!("Project '{}' updated successfully!", name);
    Ok(())
}

fn cmd_complete(settings: &Settings, project: &str) -> Result<()> {
    let mut register = load(settings)?;
    register.mark_completed(project, settings.today)?;
    save(settings, &register)?;
    println!("Project '{}' marked as Completed!", project);
    Ok(())
}

fn cmd_gantt(
    settings: &Settings,
    format: GanttFormat,
    categories: &[ProjectCategory],
    output: Option<PathBuf>,
) -> Result<()> {
    let register = load(settings)?;
    let mut board = board(settings, &register);
    if !categories.is_empty() {
        board = board.filtered(categories);
    }
    if board.is_empty() {
        bail!("no projects to chart");
    }

    let rendered = match format {
        GanttFormat::Mermaid => MermaidRenderer::new().render(&board)?,
        GanttFormat::Svg => SvgRenderer::new().render(&board)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?;
            println!("Gantt chart written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
