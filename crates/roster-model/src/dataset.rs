#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::accessor::RecordView;
use crate::entity::EntityKind;
use crate::error::{ModelError, Result};

/// A single row: column name to untyped cell value.
///
/// Values stay as delivered by the ingestion layer (strings from delimited
/// input, numbers or nested structures from already-decoded sources).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One parsed input table.
///
/// Immutable once constructed: every row only uses declared headers.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    kind: EntityKind,
    source: String,
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, rejecting rows that introduce undeclared columns.
    pub fn new(
        kind: EntityKind,
        source: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Record>,
    ) -> Result<Self> {
        let mut declared = BTreeSet::new();
        for header in &headers {
            if !declared.insert(header.as_str()) {
                return Err(ModelError::DuplicateHeader(header.clone()));
            }
        }
        for (row, record) in rows.iter().enumerate() {
            if let Some(column) = record.columns().find(|c| !declared.contains(c)) {
                return Err(ModelError::UndeclaredColumn {
                    row,
                    column: column.to_string(),
                });
            }
        }
        Ok(Self {
            kind,
            source: source.into(),
            headers,
            rows,
        })
    }

    /// Build a dataset whose headers are the expected schema of `kind` plus any
    /// extra columns the rows use, in first-seen order.
    pub fn with_expected_headers(
        kind: EntityKind,
        source: impl Into<String>,
        rows: Vec<Record>,
    ) -> Self {
        let mut headers: Vec<String> = kind
            .required_columns()
            .iter()
            .map(|c| (*c).to_string())
            .collect();
        for record in &rows {
            for column in record.columns() {
                if !headers.iter().any(|h| h == column) {
                    headers.push(column.to_string());
                }
            }
        }
        Self {
            kind,
            source: source.into(),
            headers,
            rows,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Origin file name as supplied by the ingestion layer.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Schema-aware views over every row, paired with the row index.
    pub fn views(&self) -> impl Iterator<Item = (usize, RecordView<'_>)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(idx, record)| (idx, RecordView::new(self.kind, record)))
    }
}

/// The trio of optional tables handed to the validation pipeline.
#[derive(Debug, Clone, Default)]
pub struct DatasetSet {
    clients: Option<Dataset>,
    workers: Option<Dataset>,
    tasks: Option<Dataset>,
}

impl DatasetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a dataset in the slot matching its kind, replacing any previous one.
    pub fn with(mut self, dataset: Dataset) -> Self {
        self.insert(dataset);
        self
    }

    pub fn with_clients(self, dataset: Dataset) -> Self {
        debug_assert_eq!(dataset.kind(), EntityKind::Clients);
        self.with(dataset)
    }

    pub fn with_workers(self, dataset: Dataset) -> Self {
        debug_assert_eq!(dataset.kind(), EntityKind::Workers);
        self.with(dataset)
    }

    pub fn with_tasks(self, dataset: Dataset) -> Self {
        debug_assert_eq!(dataset.kind(), EntityKind::Tasks);
        self.with(dataset)
    }

    pub fn insert(&mut self, dataset: Dataset) {
        match dataset.kind() {
            EntityKind::Clients => self.clients = Some(dataset),
            EntityKind::Workers => self.workers = Some(dataset),
            EntityKind::Tasks => self.tasks = Some(dataset),
        }
    }

    pub fn get(&self, kind: EntityKind) -> Option<&Dataset> {
        match kind {
            EntityKind::Clients => self.clients.as_ref(),
            EntityKind::Workers => self.workers.as_ref(),
            EntityKind::Tasks => self.tasks.as_ref(),
        }
    }

    pub fn clients(&self) -> Option<&Dataset> {
        self.clients.as_ref()
    }

    pub fn workers(&self) -> Option<&Dataset> {
        self.workers.as_ref()
    }

    pub fn tasks(&self) -> Option<&Dataset> {
        self.tasks.as_ref()
    }

    /// Present datasets in kind order.
    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        EntityKind::ALL.into_iter().filter_map(|kind| self.get(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}
