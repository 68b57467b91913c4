//! Aggregated result of one validation run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::issue::{Issue, Severity};
use crate::options::GatePolicy;

/// Issues partitioned by file with per-file counts and the validity flag.
///
/// Fully derived from the flat issue list; never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    issues: Vec<Issue>,
    issues_by_file: BTreeMap<EntityKind, Vec<Issue>>,
    counts_by_file: BTreeMap<EntityKind, usize>,
    is_valid: bool,
}

impl Report {
    /// Build a report from a flat issue list.
    ///
    /// The per-file partition is stable: each file keeps emission order.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let mut issues_by_file: BTreeMap<EntityKind, Vec<Issue>> = BTreeMap::new();
        for issue in &issues {
            issues_by_file
                .entry(issue.file())
                .or_default()
                .push(issue.clone());
        }
        let counts_by_file = issues_by_file
            .iter()
            .map(|(file, list)| (*file, list.len()))
            .collect();
        let is_valid = issues.is_empty();
        Self {
            issues,
            issues_by_file,
            counts_by_file,
            is_valid,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn issues_by_file(&self) -> &BTreeMap<EntityKind, Vec<Issue>> {
        &self.issues_by_file
    }

    pub fn counts_by_file(&self) -> &BTreeMap<EntityKind, usize> {
        &self.counts_by_file
    }

    /// True iff no issue of any severity was found.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn issues_for(&self, file: EntityKind) -> &[Issue] {
        self.issues_by_file
            .get(&file)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn count_for(&self, file: EntityKind) -> usize {
        self.counts_by_file.get(&file).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.severity_count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.severity_count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.severity_count(Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn severity_count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .count()
    }

    /// Whether downstream allocation may proceed under `policy`.
    pub fn passes(&self, policy: GatePolicy) -> bool {
        !self
            .issues
            .iter()
            .any(|issue| policy.blocks(issue.severity()))
    }

    /// Files holding at least one issue that blocks under `policy`.
    pub fn blocking_files(&self, policy: GatePolicy) -> Vec<EntityKind> {
        self.issues_by_file
            .iter()
            .filter(|(_, list)| list.iter().any(|issue| policy.blocks(issue.severity())))
            .map(|(file, _)| *file)
            .collect()
    }
}
