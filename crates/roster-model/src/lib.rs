//! Data model for client/worker/task roster validation.
//!
//! - **Datasets** (`dataset`): immutable tables tagged with their entity kind
//! - **Field access** (`accessor`): schema-aware, coercing cell reads
//! - **Issues** (`issue`): rule codes, severities and located defects
//! - **Reports** (`report`): file-partitioned results of one run

pub mod accessor;
pub mod dataset;
pub mod entity;
pub mod error;
pub mod ids;
pub mod issue;
pub mod options;
pub mod report;

pub use accessor::{Cell, RecordView, parse_f64, split_list};
pub use dataset::{Dataset, DatasetSet, Record};
pub use entity::{CLIENT_COLUMNS, EntityKind, TASK_COLUMNS, WORKER_COLUMNS};
pub use error::{CoerceError, ModelError, Result};
pub use ids::IssueId;
pub use issue::{Issue, RuleCode, Severity};
pub use options::{Execution, GatePolicy, ValidationOptions};
pub use report::Report;

pub use serde_json::Value;
