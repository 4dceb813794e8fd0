//! Load/save against real files

use std::fs;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use projlight_core::{ProjectRecord, ProjectStatus};
use projlight_store::{load_register, save_register, ProjectEdit, Register, StoreError};
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn missing_file_is_empty_register() {
    let dir = tempdir().unwrap();
    let report = load_register(&dir.path().join("projects_data.csv")).unwrap();
    assert!(report.records.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn saved_register_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projects_data.csv");
    let records = vec![
        ProjectRecord::new("Alpha", date(2024, 5, 1), date(2024, 7, 1))
            .officer("Ann")
            .status(ProjectStatus::InProgress)
            .remarks("needs \"sign-off\", then launch")
            .last_update(date(2024, 6, 3)),
        ProjectRecord::new("Beta", date(2024, 1, 8), date(2024, 2, 9)).status(ProjectStatus::Completed),
    ];

    save_register(&path, &Register::from(records.clone())).unwrap();
    let report = load_register(&path).unwrap();

    assert!(report.skipped.is_empty());
    assert_eq!(report.records, records);
}

#[test]
fn edit_and_complete_persist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projects_data.csv");
    let today = date(2024, 6, 14);

    let mut register = load_register(&path).unwrap().into_register();
    register
        .add(ProjectRecord::new("Gamma", date(2024, 6, 1), date(2024, 6, 20)), today)
        .unwrap();
    register
        .update(
            "Gamma",
            ProjectEdit {
                status: Some(ProjectStatus::InProgress),
                ..ProjectEdit::default()
            },
            today,
        )
        .unwrap();
    save_register(&path, &register).unwrap();

    let mut register = load_register(&path).unwrap().into_register();
    assert_eq!(register.get("Gamma").unwrap().status, ProjectStatus::InProgress);

    register.mark_completed("Gamma", date(2024, 6, 17)).unwrap();
    save_register(&path, &register).unwrap();

    let reloaded = load_register(&path).unwrap();
    assert_eq!(reloaded.records[0].status, ProjectStatus::Completed);
    assert_eq!(reloaded.records[0].last_update, date(2024, 6, 17));
}

#[test]
fn file_written_by_other_tools_is_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projects_data.csv");
    fs::write(
        &path,
        "Project Name,Officer,Status,Start Date,Target Completion Date,Last Update,Remarks\n\
         Delta,Lee,In Progress,2024-06-01,2024-06-18,2024-06-14,\n\
         Epsilon,Lee,Not Started,2024-06-01 00:00:00,2024-07-01 00:00:00,2024-06-14 00:00:00,hold\n",
    )
    .unwrap();

    let report = load_register(&path).unwrap();
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[1].target_completion_date, date(2024, 7, 1));
}

#[test]
fn unreadable_path_is_io_error() {
    let dir = tempdir().unwrap();
    // A directory cannot be opened as a register file
    let result = load_register(dir.path());
    assert!(matches!(result, Err(StoreError::Io(_)) | Err(StoreError::Csv(_))));
}

#[test]
fn invalid_rows_survive_a_mutation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("projects_data.csv");
    let original = "Project Name,Officer,Status,Start Date,Target Completion Date,Last Update,Remarks\n\
                    Legacy,Kim,On Hold,2024-01-01,2024-03-01,2024-01-01,keep me\n\
                    Good,Sam,In Progress,2024-05-01,2024-07-01,2024-05-01,\n";
    fs::write(&path, original).unwrap();

    let mut register = load_register(&path).unwrap().into_register();
    assert_eq!(register.skipped().len(), 1);
    register.mark_completed("Good", date(2024, 6, 14)).unwrap();
    save_register(&path, &register).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "Legacy,Kim,On Hold,2024-01-01,2024-03-01,2024-01-01,keep me");
    assert_eq!(lines[2], "Good,Sam,Completed,2024-05-01,2024-07-01,2024-06-14,");
}
