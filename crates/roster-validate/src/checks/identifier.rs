//! Identifier uniqueness (V2).
//!
//! Two passes per table: count every id value, then flag each row holding a
//! value that occurs more than once. A value repeated three times yields three
//! issues.

use std::collections::HashMap;

use roster_model::{Dataset, DatasetSet, Issue, RuleCode, Severity};

/// Check that ClientID, WorkerID and TaskID values are unique within their table.
pub fn check(datasets: &DatasetSet) -> Vec<Issue> {
    datasets.iter().flat_map(check_dataset).collect()
}

fn check_dataset(dataset: &Dataset) -> Vec<Issue> {
    let kind = dataset.kind();
    let id_column = kind.id_column();
    if !dataset.has_column(id_column) {
        return Vec::new();
    }

    let ids: Vec<(usize, Option<String>)> = dataset
        .views()
        .map(|(idx, view)| (idx, view.id()))
        .collect();

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for id in ids.iter().filter_map(|(_, id)| id.as_deref()) {
        *frequency.entry(id).or_default() += 1;
    }

    let mut issues = Vec::new();
    for (row, id) in &ids {
        let Some(id) = id else {
            continue;
        };
        let occurrences = frequency.get(id.as_str()).copied().unwrap_or(0);
        if occurrences < 2 {
            continue;
        }
        issues.push(
            Issue::new(
                RuleCode::V2,
                Severity::Error,
                kind,
                format!("Duplicate {id_column} {id} (appears {occurrences} times)"),
            )
            .with_row(*row)
            .with_column(id_column)
            .with_value(id.as_str())
            .with_suggestion(format!("Give each row a unique {id_column}")),
        );
    }

    issues
}
