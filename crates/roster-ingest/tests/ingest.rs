use std::fs;
use std::path::{Path, PathBuf};

use roster_ingest::{IngestError, load_dataset_set, read_csv_dataset};
use roster_model::{EntityKind, Value};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_headers_and_trimmed_cells() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        dir.path(),
        "clients.csv",
        "\u{feff}ClientID, ClientName ,PriorityLevel,RequestedTaskIDs\n\
         C1,  Acme ,3,\"T1, T2\"\n\
         \n\
         C2,Globex,,T3\n",
    );

    let dataset = read_csv_dataset(&path, EntityKind::Clients).expect("read csv");
    assert_eq!(dataset.kind(), EntityKind::Clients);
    assert_eq!(dataset.source(), "clients.csv");
    assert_eq!(
        dataset.headers(),
        ["ClientID", "ClientName", "PriorityLevel", "RequestedTaskIDs"]
    );
    assert_eq!(dataset.len(), 2);

    let first = &dataset.rows()[0];
    assert_eq!(first.get("ClientName"), Some(&Value::from("Acme")));
    assert_eq!(first.get("RequestedTaskIDs"), Some(&Value::from("T1, T2")));

    let second = &dataset.rows()[1];
    assert_eq!(second.get("PriorityLevel"), None);
    assert_eq!(second.get("RequestedTaskIDs"), Some(&Value::from("T3")));
}

#[test]
fn short_rows_omit_trailing_columns() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "tasks.csv", "TaskID,TaskName,Duration\nT1\n");

    let dataset = read_csv_dataset(&path, EntityKind::Tasks).expect("read csv");
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.rows()[0].len(), 1);
    assert!(dataset.has_column("Duration"));
}

#[test]
fn rejects_values_beyond_last_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "workers.csv", "WorkerID,Skills\nW1,rust,extra\n");

    let err = read_csv_dataset(&path, EntityKind::Workers).unwrap_err();
    match err {
        IngestError::RowTooWide {
            line,
            width,
            expected,
            ..
        } => {
            assert_eq!(line, 2);
            assert_eq!(width, 3);
            assert_eq!(expected, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn trailing_empty_cells_are_tolerated() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "workers.csv", "WorkerID,Skills\nW1,rust,,\n");

    let dataset = read_csv_dataset(&path, EntityKind::Workers).expect("read csv");
    assert_eq!(dataset.rows()[0].len(), 2);
}

#[test]
fn duplicate_headers_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "tasks.csv", "TaskID,TaskID\nT1,T2\n");

    let err = read_csv_dataset(&path, EntityKind::Tasks).unwrap_err();
    assert!(matches!(err, IngestError::Model { .. }));
}

#[test]
fn missing_file_reports_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("clients.csv");

    let err = read_csv_dataset(&path, EntityKind::Clients).unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
    assert!(err.to_string().contains("clients.csv"));
}

#[test]
fn loads_available_tables_from_folder() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "Workers.csv", "WorkerID,Skills\nW1,rust\nW2,sql\n");
    write(dir.path(), "tasks.csv", "TaskID,RequiredSkills\nT1,rust\n");
    write(dir.path(), "notes.csv", "anything\n");

    let datasets = load_dataset_set(dir.path()).expect("load folder");
    assert!(datasets.clients().is_none());
    assert_eq!(datasets.workers().map(|d| d.len()), Some(2));
    assert_eq!(datasets.tasks().map(|d| d.source()), Some("tasks.csv"));
}

#[test]
fn empty_file_yields_empty_dataset() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(dir.path(), "clients.csv", "");

    let dataset = read_csv_dataset(&path, EntityKind::Clients).expect("read csv");
    assert!(dataset.headers().is_empty());
    assert!(dataset.is_empty());
}
