//! Runtime settings
//!
//! Each setting is resolved from, highest first: command-line flag,
//! environment variable (handled by clap), config file, built-in default.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use projlight_core::DEFAULT_LOOKAHEAD;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "projlight.toml";
pub const DEFAULT_DATA_FILE: &str = "projects_data.csv";
pub const DEFAULT_TITLE: &str = "Project Gantt Chart";

/// Contents of `projlight.toml`
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Register file
    pub data: Option<PathBuf>,
    /// Working days in the due-soon window
    pub lookahead_days: Option<usize>,
    /// Chart and dashboard title
    pub title: Option<String>,
}

impl FileConfig {
    pub fn parse(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Settings fixed for the whole invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data: PathBuf,
    /// Reference date every project is judged against
    pub today: NaiveDate,
    pub lookahead: usize,
    pub title: String,
}

impl Settings {
    /// Merge flags/env values over the config file.
    ///
    /// An explicitly named config file must exist; the default one is
    /// optional.
    pub fn resolve(data: Option<PathBuf>, today: Option<NaiveDate>, config: Option<PathBuf>) -> Result<Self> {
        let file = match config {
            Some(path) => FileConfig::load(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => FileConfig::load(Path::new(DEFAULT_CONFIG_FILE))?,
            None => FileConfig::default(),
        };

        let settings = Self::merge(data, today, file);
        if settings.lookahead == 0 {
            bail!("lookahead_days must be at least 1");
        }
        debug!(
            data = %settings.data.display(),
            today = %settings.today,
            lookahead = settings.lookahead,
            "settings resolved"
        );
        Ok(settings)
    }

    fn merge(data: Option<PathBuf>, today: Option<NaiveDate>, file: FileConfig) -> Self {
        Self {
            data: data
                .or(file.data)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            today: today.unwrap_or_else(|| chrono::Local::now().date_naive()),
            lookahead: file.lookahead_days.unwrap_or(DEFAULT_LOOKAHEAD),
            title: file.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        }
    }
}
