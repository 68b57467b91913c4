//! Numeric range checks (V4).
//!
//! PriorityLevel must be an integer from 1 to 5 and Duration at least 1.
//! Values that are not numbers, and blank cells in a declared column, are
//! reported under the same rule.

use roster_model::{DatasetSet, EntityKind, Issue, RuleCode, Severity};

struct RangeCheck {
    kind: EntityKind,
    column: &'static str,
    requirement: &'static str,
    accepts: fn(f64) -> bool,
}

const RANGE_CHECKS: &[RangeCheck] = &[
    RangeCheck {
        kind: EntityKind::Clients,
        column: "PriorityLevel",
        requirement: "an integer between 1 and 5",
        accepts: is_priority_level,
    },
    RangeCheck {
        kind: EntityKind::Tasks,
        column: "Duration",
        requirement: "a number greater than or equal to 1",
        accepts: is_duration,
    },
];

fn is_priority_level(value: f64) -> bool {
    value.fract() == 0.0 && (1.0..=5.0).contains(&value)
}

fn is_duration(value: f64) -> bool {
    value >= 1.0
}

pub fn check(datasets: &DatasetSet) -> Vec<Issue> {
    let mut issues = Vec::new();

    for range in RANGE_CHECKS {
        let Some(dataset) = datasets.get(range.kind) else {
            continue;
        };
        // A missing column is reported once by the column presence check.
        if !dataset.has_column(range.column) {
            continue;
        }
        let column = range.column;
        for (row, view) in dataset.views() {
            let message = match view.number(column) {
                Ok(Some(value)) if (range.accepts)(value) => continue,
                Ok(Some(value)) => format!("{column} {value} must be {}", range.requirement),
                Ok(None) => format!("{column} is empty; it must be {}", range.requirement),
                Err(error) => format!(
                    "{column} {:?} is not a number; it must be {}",
                    error.raw(),
                    range.requirement
                ),
            };
            let mut issue = Issue::new(RuleCode::V4, Severity::Error, range.kind, message)
                .with_row(row)
                .with_column(column)
                .with_suggestion(format!("Set {column} to {}", range.requirement));
            if let Some(raw) = view.text(column) {
                issue = issue.with_value(raw);
            }
            issues.push(issue);
        }
    }

    issues
}
