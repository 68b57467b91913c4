//! Cross-table reference validation (V6).
//!
//! Every TaskID a client requests must exist in the tasks table.

use std::collections::HashSet;

use roster_model::{DatasetSet, Issue, RuleCode, Severity};

const REQUESTED_COLUMN: &str = "RequestedTaskIDs";

/// Collect the set of task ids present in the tasks table.
pub fn extract_task_ids(datasets: &DatasetSet) -> Option<HashSet<String>> {
    let tasks = datasets.tasks()?;
    if !tasks.has_column(tasks.kind().id_column()) {
        return None;
    }
    Some(tasks.views().filter_map(|(_, view)| view.id()).collect())
}

/// Check that requested task ids resolve against the tasks table.
///
/// One issue per unresolved id per client row; an id repeated within the same
/// row is reported once.
pub fn check(datasets: &DatasetSet) -> Vec<Issue> {
    let Some(clients) = datasets.clients() else {
        return Vec::new();
    };
    let Some(task_ids) = extract_task_ids(datasets) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for (row, view) in clients.views() {
        let mut seen = HashSet::new();
        for requested in view.list(REQUESTED_COLUMN) {
            if task_ids.contains(&requested) || !seen.insert(requested.clone()) {
                continue;
            }
            let client = view.id().unwrap_or_else(|| format!("row {row}"));
            issues.push(
                Issue::new(
                    RuleCode::V6,
                    Severity::Error,
                    clients.kind(),
                    format!("Client {client} requests unknown task {requested}"),
                )
                .with_row(row)
                .with_column(REQUESTED_COLUMN)
                .with_value(requested.as_str())
                .with_suggestion(format!(
                    "Remove {requested} from {REQUESTED_COLUMN} or add it to the tasks table"
                )),
            );
        }
    }

    issues
}
