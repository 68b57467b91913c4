//! Loading client, worker and task tables from CSV.
//!
//! # Features
//!
//! - **CSV Loading**: read one file into a [`Dataset`](roster_model::Dataset)
//! - **Discovery**: find the clients/workers/tasks files in a folder
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use roster_ingest::load_dataset_set;
//!
//! let datasets = load_dataset_set(Path::new("data/run-01"))?;
//! let report = roster_validate::validate(&datasets);
//! ```

mod discovery;
mod error;
mod reader;

pub use discovery::{discover_dataset_files, list_csv_files, load_dataset_set};
pub use error::{IngestError, Result};
pub use reader::read_csv_dataset;
