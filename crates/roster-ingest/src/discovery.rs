//! Input file discovery.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use roster_model::{DatasetSet, EntityKind};

use crate::error::{IngestError, Result};
use crate::reader::read_csv_dataset;

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Matches CSV files in `dir` to the table they hold by file stem.
///
/// `clients.csv`, `Workers.CSV` and `task.csv` all match. Other files are
/// ignored. When two files match the same table the first by name wins.
pub fn discover_dataset_files(dir: &Path) -> Result<BTreeMap<EntityKind, PathBuf>> {
    let mut found: BTreeMap<EntityKind, PathBuf> = BTreeMap::new();
    for path in list_csv_files(dir)? {
        let Some(kind) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(EntityKind::parse)
        else {
            tracing::debug!(path = %path.display(), "skipping unrecognised file");
            continue;
        };
        if let Some(existing) = found.get(&kind) {
            tracing::warn!(
                file = %kind,
                kept = %existing.display(),
                ignored = %path.display(),
                "more than one file matches table"
            );
            continue;
        }
        found.insert(kind, path);
    }
    Ok(found)
}

/// Discover and read every table in `dir`.
///
/// Tables without a matching file are left out of the set.
pub fn load_dataset_set(dir: &Path) -> Result<DatasetSet> {
    let mut datasets = DatasetSet::new();
    for (kind, path) in discover_dataset_files(dir)? {
        datasets.insert(read_csv_dataset(&path, kind)?);
    }
    for kind in EntityKind::ALL {
        if datasets.get(kind).is_none() {
            tracing::info!(dir = %dir.display(), file = %kind, "no file found for table");
        }
    }
    Ok(datasets)
}
