//! Required column presence (V1).

use roster_model::{DatasetSet, Issue, RuleCode, Severity};

/// Emit one issue per required column missing from a table's headers.
pub fn check(datasets: &DatasetSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    for dataset in datasets.iter() {
        let kind = dataset.kind();
        for column in kind.required_columns() {
            if dataset.has_column(column) {
                continue;
            }
            issues.push(
                Issue::new(
                    RuleCode::V1,
                    Severity::Error,
                    kind,
                    format!("Required column {column} is missing from {kind}"),
                )
                .with_column(*column)
                .with_suggestion(format!("Add a {column} column to {}", dataset.source())),
            );
        }
    }

    issues
}
