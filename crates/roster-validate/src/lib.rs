//! Cross-entity validation for client, worker and task tables.
//!
//! This crate certifies that the three tables are internally consistent and
//! jointly feasible before they are handed to allocation:
//!
//! - **Schema**: required columns (V1)
//! - **Identity**: unique ids per table (V2)
//! - **Format**: phase arrays (V3), numeric ranges (V4), attribute JSON (V5)
//! - **References**: requested tasks exist (V6)
//! - **Feasibility**: worker capacity (V9), skill coverage (V11), concurrency (V12)
//!
//! Validation never fails: malformed values become issues, and a missing
//! table only disables the checks that need it.
//!
//! # Example
//!
//! ```ignore
//! use roster_validate::{gate_allocation, validate};
//!
//! let report = validate(&datasets);
//! for issue in report.issues() {
//!     println!("[{}] {} {}", issue.rule_code(), issue.file(), issue.message());
//! }
//! let decision = gate_allocation(&report, GatePolicy::AnyIssue);
//! ```

mod checks;
mod engine;
mod gate;
mod payload;

pub use engine::{CheckFn, RULES, Rule, rule, run_rules, sort_issues};
pub use gate::{GatingDecision, gate_allocation};
pub use payload::{
    ReportPayload, SourceSummary, build_report_payload, render_report_json, write_report_json,
};

pub use roster_model::{
    Dataset, DatasetSet, EntityKind, Execution, GatePolicy, Issue, Record, Report, RuleCode,
    Severity, ValidationOptions,
};

/// Validate the three tables with default options.
pub fn validate(datasets: &DatasetSet) -> Report {
    validate_with_options(datasets, &ValidationOptions::default())
}

/// Validate the three tables.
///
/// Runs the enabled rules in library order against the same input and builds
/// the report from their combined issues. The same input always produces the
/// same issues, in the same order, with the same ids.
pub fn validate_with_options(datasets: &DatasetSet, options: &ValidationOptions) -> Report {
    let rows = |kind: EntityKind| datasets.get(kind).map_or(0, Dataset::len);
    let span = tracing::info_span!(
        "validate",
        clients = rows(EntityKind::Clients),
        workers = rows(EntityKind::Workers),
        tasks = rows(EntityKind::Tasks),
    );
    let _guard = span.enter();

    for kind in EntityKind::ALL {
        if datasets.get(kind).is_none() {
            tracing::debug!(file = %kind, "table not supplied; dependent checks skipped");
        }
    }

    let issues = run_rules(datasets, options);
    let report = Report::from_issues(issues);

    tracing::info!(
        issues = report.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        valid = report.is_valid(),
        "validation complete"
    );
    report
}
