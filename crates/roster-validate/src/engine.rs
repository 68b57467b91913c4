//! Rule library and its executor.
//!
//! Rules are data: an ordered table of named pure functions. The executor runs
//! every enabled rule against the same immutable [`DatasetSet`] and returns a
//! flat issue list in a deterministic order (rule, file, row), whether the
//! rules ran one after another or concurrently.

use std::thread;

use roster_model::{DatasetSet, Execution, Issue, RuleCode, Severity, ValidationOptions};

use crate::checks;

/// Signature shared by every check.
pub type CheckFn = fn(&DatasetSet) -> Vec<Issue>;

/// One entry in the rule library.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub code: RuleCode,
    pub name: &'static str,
    pub description: &'static str,
    /// Severity of every issue this rule emits.
    pub severity: Severity,
    pub check: CheckFn,
}

impl Rule {
    /// Run this rule on its own.
    pub fn run(&self, datasets: &DatasetSet) -> Vec<Issue> {
        let issues = (self.check)(datasets);
        tracing::debug!(
            rule = %self.code,
            name = self.name,
            issues = issues.len(),
            "rule finished"
        );
        issues
    }
}

/// The fixed rule set, in execution order.
pub const RULES: &[Rule] = &[
    Rule {
        code: RuleCode::V1,
        name: "required-columns",
        description: "Every required column is present in the headers",
        severity: Severity::Error,
        check: checks::columns::check,
    },
    Rule {
        code: RuleCode::V2,
        name: "unique-ids",
        description: "ClientID, WorkerID and TaskID values are unique within their table",
        severity: Severity::Error,
        check: checks::identifier::check,
    },
    Rule {
        code: RuleCode::V3,
        name: "phase-arrays",
        description: "AvailableSlots and PreferredPhases decode to arrays of numbers",
        severity: Severity::Error,
        check: checks::arrays::check,
    },
    Rule {
        code: RuleCode::V4,
        name: "value-ranges",
        description: "PriorityLevel is an integer from 1 to 5 and Duration is at least 1",
        severity: Severity::Error,
        check: checks::ranges::check,
    },
    Rule {
        code: RuleCode::V5,
        name: "attributes-json",
        description: "AttributesJSON is a well-formed JSON document",
        severity: Severity::Error,
        check: checks::attributes::check,
    },
    Rule {
        code: RuleCode::V6,
        name: "task-references",
        description: "Every RequestedTaskIDs entry exists in the tasks table",
        severity: Severity::Error,
        check: checks::references::check,
    },
    Rule {
        code: RuleCode::V9,
        name: "worker-capacity",
        description: "Workers have at least MaxLoadPerPhase available slots",
        severity: Severity::Warning,
        check: checks::capacity::check,
    },
    Rule {
        code: RuleCode::V11,
        name: "skill-coverage",
        description: "Every required skill is held by at least one worker",
        severity: Severity::Error,
        check: checks::skills::check_coverage,
    },
    Rule {
        code: RuleCode::V12,
        name: "concurrency-feasibility",
        description: "Enough fully qualified workers exist to staff MaxConcurrent",
        severity: Severity::Warning,
        check: checks::skills::check_concurrency,
    },
];

/// Look up a rule by code.
pub fn rule(code: RuleCode) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.code == code)
}

/// Run every enabled rule and return the combined, ordered issue list.
pub fn run_rules(datasets: &DatasetSet, options: &ValidationOptions) -> Vec<Issue> {
    let enabled: Vec<&Rule> = RULES
        .iter()
        .filter(|rule| options.is_enabled(rule.code))
        .collect();

    let mut issues: Vec<Issue> = match options.execution {
        Execution::Sequential => enabled
            .iter()
            .flat_map(|rule| rule.run(datasets))
            .collect(),
        Execution::Parallel => run_parallel(&enabled, datasets),
    };
    sort_issues(&mut issues);
    issues
}

fn run_parallel(rules: &[&Rule], datasets: &DatasetSet) -> Vec<Issue> {
    thread::scope(|scope| {
        let handles: Vec<_> = rules
            .iter()
            .map(|rule| scope.spawn(move || rule.run(datasets)))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    })
}

/// Stable sort by rule order, then file, then row.
///
/// Within equal keys the emission order of the rule is kept.
pub fn sort_issues(issues: &mut [Issue]) {
    issues.sort_by_key(|issue| (issue.rule_code(), issue.file(), issue.row()));
}
