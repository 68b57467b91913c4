//! CSV file reading into datasets.

use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use roster_model::{Dataset, EntityKind, Record, Value};

use crate::error::{IngestError, Result};

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> &str {
    raw.trim().trim_matches('\u{feff}')
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Read one input table from a CSV file.
///
/// The first non-blank line is the header row. Blank lines are skipped and
/// blank cells are left out of the record, so a row only carries the values
/// it actually has. Cells stay strings; coercion happens at validation time.
/// Columns with a blank header are ignored.
pub fn read_csv_dataset(path: &Path, kind: EntityKind) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut records = reader.records();
    let mut headers: Vec<String> = Vec::new();
    for record in records.by_ref() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        if record.iter().all(|value| normalize_cell(value).is_empty()) {
            continue;
        }
        headers = record.iter().map(normalize_header).collect();
        break;
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, &e))?;
        if record.iter().all(|value| normalize_cell(value).is_empty()) {
            continue;
        }
        let mut row = Record::new();
        for (idx, raw) in record.iter().enumerate() {
            let value = normalize_cell(raw);
            if value.is_empty() {
                continue;
            }
            match headers.get(idx) {
                Some(header) if header.is_empty() => {}
                Some(header) => row.insert(header.as_str(), Value::String(value.to_string())),
                None => {
                    return Err(IngestError::RowTooWide {
                        path: path.to_path_buf(),
                        line: record.position().map_or(0, csv::Position::line),
                        width: record.len(),
                        expected: headers.len(),
                    });
                }
            }
        }
        rows.push(row);
    }

    headers.retain(|header| !header.is_empty());
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(
        path = %path.display(),
        file = %kind,
        columns = headers.len(),
        rows = rows.len(),
        "read table"
    );

    Dataset::new(kind, source, headers, rows).map_err(|e| IngestError::Model {
        path: path.to_path_buf(),
        source: e,
    })
}
