//! Worker capacity feasibility (V9).
//!
//! A worker should have at least as many available slots as its
//! MaxLoadPerPhase. Rows whose slots fail to decode are left to the phase
//! array check. Already-decoded slot arrays count every element.

use roster_model::{DatasetSet, Issue, RuleCode, Severity};

const SLOTS_COLUMN: &str = "AvailableSlots";
const MAX_LOAD_COLUMN: &str = "MaxLoadPerPhase";

pub fn check(datasets: &DatasetSet) -> Vec<Issue> {
    let Some(workers) = datasets.workers() else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for (row, view) in workers.views() {
        let Ok(Some(slots)) = view.array_len(SLOTS_COLUMN) else {
            continue;
        };
        let Ok(Some(max_load)) = view.number(MAX_LOAD_COLUMN) else {
            continue;
        };
        if (slots as f64) >= max_load {
            continue;
        }
        let worker = view.id().unwrap_or_else(|| format!("row {row}"));
        issues.push(
            Issue::new(
                RuleCode::V9,
                Severity::Warning,
                workers.kind(),
                format!(
                    "Worker {worker} has {slots} available slot(s) but \
                     {MAX_LOAD_COLUMN} is {max_load}"
                ),
            )
            .with_row(row)
            .with_column(MAX_LOAD_COLUMN)
            .with_value(max_load.to_string())
            .with_suggestion(format!(
                "Lower {MAX_LOAD_COLUMN} to at most {slots} or add available slots"
            )),
        );
    }

    issues
}
