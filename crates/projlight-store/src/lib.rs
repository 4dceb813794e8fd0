//! # projlight-store
//!
//! CSV persistence for the projlight project register.
//!
//! This crate provides:
//! - The on-disk row schema (`row`)
//! - Whole-file load and save (`load_register`, `save_register`)
//! - The in-memory `Register` with add / edit / mark-completed
//!
//! Rows that fail validation are skipped and reported; they never abort the
//! load.
//!
//! ## Example
//!
//! ```rust
//! use projlight_store::read_register;
//!
//! let input = "\
//! Project Name,Officer,Status,Start Date,Target Completion Date,Last Update,Remarks
//! Archive,Kim,In Progress,2024-05-01,2024-06-18,2024-06-03,
//! Broken,Kim,Someday,2024-05-01,2024-06-18,2024-06-03,
//! ";
//!
//! let report = read_register(input.as_bytes()).unwrap();
//! assert_eq!(report.records.len(), 1);
//! assert_eq!(report.skipped.len(), 1);
//! ```

pub mod register;
pub mod row;

pub use register::{ProjectEdit, Register};
pub use row::ProjectRow;

use std::io::{Read, Write};
use std::path::Path;

use projlight_core::{ProjectRecord, RecordError};
use thiserror::Error;
use tracing::{debug, warn};

/// Column headers, in file order
pub const COLUMNS: [&str; 7] = [
    "Project Name",
    "Officer",
    "Status",
    "Start Date",
    "Target Completion Date",
    "Last Update",
    "Remarks",
];

/// Storage error
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Project not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Record(#[from] RecordError),
}

/// A row excluded from the loaded record set.
///
/// The row is kept as read so saving the register writes it back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line number in the file where the row starts (header is line 1)
    pub line: u64,
    pub reason: String,
    /// Number of loaded records that precede this row in the file
    pub after_records: usize,
    pub raw: csv::ByteRecord,
}

impl std::fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Result of loading a register
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<ProjectRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn into_register(self) -> Register {
        Register::with_skipped(self.records, self.skipped)
    }
}

/// Read a register from any CSV source
pub fn read_register<R: Read>(reader: R) -> Result<LoadReport, StoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.byte_headers()?.clone();

    let mut report = LoadReport::default();
    for result in csv_reader.byte_records() {
        let raw = result?;
        let line = raw.position().map_or(0, csv::Position::line);

        let parsed = raw
            .deserialize::<ProjectRow>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(|row| row.into_record().map_err(|e| e.to_string()));

        match parsed {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                warn!(line, %reason, "skipping invalid row");
                report.skipped.push(SkippedRow {
                    line,
                    reason,
                    after_records: report.records.len(),
                    raw,
                });
            }
        }
    }

    Ok(report)
}

/// Write every record, header first.
///
/// Skipped rows are written back verbatim at their original position
/// relative to the records.
pub fn write_register<W: Write>(
    writer: W,
    records: &[ProjectRecord],
    skipped: &[SkippedRow],
) -> Result<(), StoreError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);
    csv_writer.write_record(COLUMNS)?;

    let mut pending = skipped.iter().peekable();
    for (index, record) in records.iter().enumerate() {
        while let Some(row) = pending.next_if(|row| row.after_records <= index) {
            csv_writer.write_byte_record(&row.raw)?;
        }
        csv_writer.serialize(ProjectRow::from(record))?;
    }
    for row in pending {
        csv_writer.write_byte_record(&row.raw)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Load a register file. A missing file is an empty register.
pub fn load_register(path: &Path) -> Result<LoadReport, StoreError> {
    if !path.exists() {
        debug!(path = %path.display(), "register file not found, starting empty");
        return Ok(LoadReport::default());
    }
    let file = std::fs::File::open(path)?;
    let report = read_register(std::io::BufReader::new(file))?;
    debug!(
        path = %path.display(),
        loaded = report.records.len(),
        skipped = report.skipped.len(),
        "register loaded"
    );
    Ok(report)
}

/// Overwrite a register file, keeping any rows skipped when it was loaded
pub fn save_register(path: &Path, register: &Register) -> Result<(), StoreError> {
    let file = std::fs::File::create(path)?;
    write_register(std::io::BufWriter::new(file), register.records(), register.skipped())?;
    debug!(
        path = %path.display(),
        count = register.len(),
        kept_invalid = register.skipped().len(),
        "register saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use projlight_core::ProjectStatus;

    const HEADER: &str =
        "Project Name,Officer,Status,Start Date,Target Completion Date,Last Update,Remarks\n";

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn read_valid_rows() {
        let input = format!(
            "{HEADER}Alpha,Ann,Not Started,2024-05-01,2024-07-01,2024-05-01,first\n\
             Beta,Bo,Completed,2024-01-01 00:00:00,2024-03-01 00:00:00,2024-03-02 00:00:00,\n"
        );
        let report = read_register(input.as_bytes()).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].remarks, "first");
        assert_eq!(report.records[1].status, ProjectStatus::Completed);
        assert_eq!(report.records[1].start_date, date(2024, 1, 1));
    }

    #[test]
    fn invalid_rows_are_skipped_not_fatal() {
        let input = format!(
            "{HEADER}Good,Ann,In Progress,2024-05-01,2024-07-01,2024-05-01,\n\
             BadStatus,Ann,Waiting,2024-05-01,2024-07-01,2024-05-01,\n\
             BadDate,Ann,In Progress,2024-05-01,soon,2024-05-01,\n\
             Good2,Ann,In Progress,2024-05-01,2024-07-02,2024-05-01,\n"
        );
        let report = read_register(input.as_bytes()).unwrap();
        let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Good", "Good2"]);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line, 3);
        assert!(report.skipped[0].reason.contains("Waiting"));
        assert_eq!(report.skipped[1].line, 4);
        assert!(report.skipped[1].reason.contains("Target Completion Date"));
    }

    #[test]
    fn short_row_is_skipped() {
        let input = format!("{HEADER}Only,two\nGood,Ann,In Progress,2024-05-01,2024-07-01,2024-05-01,\n");
        let report = read_register(input.as_bytes()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn line_numbers_follow_multiline_remarks() {
        let input = format!(
            "{HEADER}Good,Ann,In Progress,2024-05-01,2024-07-01,2024-05-01,\"waiting on\nfinance\nsign-off\"\n\
             Bad,Ann,Paused,2024-05-01,2024-07-01,2024-05-01,\n"
        );
        let report = read_register(input.as_bytes()).unwrap();
        assert_eq!(report.records[0].remarks, "waiting on\nfinance\nsign-off");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 5);
    }

    #[test]
    fn skipped_rows_are_written_back_in_place() {
        let input = format!(
            "{HEADER}Legacy,Kim,On Hold,2024-01-01,2024-03-01,2024-01-01,keep me\n\
             Good,Sam,In Progress,2024-05-01,2024-07-01,2024-05-01,\n\
             Short,row\n\
             Later,Sam,Not Started,2024-08-01,2024-09-01,2024-05-01,\n"
        );
        let report = read_register(input.as_bytes()).unwrap();
        assert_eq!(report.skipped[0].after_records, 0);
        assert_eq!(report.skipped[1].after_records, 1);

        let register = report.into_register();
        let mut out = Vec::new();
        write_register(&mut out, register.records(), register.skipped()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), input);
    }

    #[test]
    fn header_read_failure_is_an_error() {
        struct FailingReader;

        impl Read for FailingReader {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
            }
        }

        let result = read_register(FailingReader);
        assert!(matches!(result, Err(StoreError::Csv(ref e)) if e.is_io_error()));
    }

    #[test]
    fn header_only_is_empty() {
        let report = read_register(HEADER.as_bytes()).unwrap();
        assert!(report.records.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn write_emits_header_and_rows() {
        let records = vec![ProjectRecord::new("Alpha, phase 1", date(2024, 5, 1), date(2024, 7, 1))
            .officer("Ann")
            .last_update(date(2024, 5, 2))];
        let mut out = Vec::new();
        write_register(&mut out, &records, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!("{HEADER}\"Alpha, phase 1\",Ann,Not Started,2024-05-01,2024-07-01,2024-05-02,\n")
        );
    }

    #[test]
    fn write_empty_register_keeps_header() {
        let mut out = Vec::new();
        write_register(&mut out, &[], &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), HEADER);
    }

    #[test]
    fn skipped_row_display() {
        let skipped = SkippedRow {
            line: 7,
            reason: "bad".into(),
            after_records: 0,
            raw: csv::ByteRecord::from(vec!["x"]),
        };
        assert_eq!(skipped.to_string(), "line 7: bad");
    }

    #[test]
    fn store_error_display() {
        let err = StoreError::NotFound("Alpha".into());
        assert!(err.to_string().contains("Alpha"));
        let err = StoreError::from(RecordError::InvalidRecord("project name is empty".into()));
        assert_eq!(err.to_string(), "Invalid record: project name is empty");
    }
}
