//! Phase array format (V3).
//!
//! AvailableSlots and PreferredPhases delivered as text must decode to a JSON
//! array of numbers. Already-decoded values are trusted.

use roster_model::{Cell, DatasetSet, EntityKind, Issue, RuleCode, Severity};

const ARRAY_COLUMNS: &[(EntityKind, &str)] = &[
    (EntityKind::Workers, "AvailableSlots"),
    (EntityKind::Tasks, "PreferredPhases"),
];

pub fn check(datasets: &DatasetSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (kind, column) in ARRAY_COLUMNS {
        let Some(dataset) = datasets.get(*kind) else {
            continue;
        };
        for (row, view) in dataset.views() {
            if !matches!(view.cell(column), Cell::Text(_)) {
                continue;
            }
            let Err(error) = view.number_array(column) else {
                continue;
            };
            issues.push(
                Issue::new(
                    RuleCode::V3,
                    Severity::Error,
                    *kind,
                    format!("{column} must be an array of numbers, got {}", error.raw()),
                )
                .with_row(row)
                .with_column(*column)
                .with_value(error.raw())
                .with_suggestion("Use a JSON array of phase numbers such as [1, 2, 3]"),
            );
        }
    }

    issues
}
