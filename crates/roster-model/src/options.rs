//! Configuration options for a validation run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::issue::{RuleCode, Severity};

/// Which issues block downstream allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatePolicy {
    /// Any issue, whatever its severity, blocks. Matches `Report::is_valid`.
    #[default]
    AnyIssue,
    /// Only error-severity issues block; warnings and info pass.
    ErrorsOnly,
}

impl GatePolicy {
    pub fn blocks(&self, severity: Severity) -> bool {
        match self {
            Self::AnyIssue => true,
            Self::ErrorsOnly => severity == Severity::Error,
        }
    }
}

/// How the pipeline schedules rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Execution {
    /// Run rules one after another on the calling thread.
    #[default]
    Sequential,
    /// Run each rule on its own scoped thread, then re-sort.
    Parallel,
}

/// Options controlling a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Rules the pipeline skips entirely.
    pub disabled_rules: BTreeSet<RuleCode>,
    /// Gate used when deciding whether allocation may proceed.
    pub gate: GatePolicy,
    pub execution: Execution,
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disabled_rule(mut self, code: RuleCode) -> Self {
        self.disabled_rules.insert(code);
        self
    }

    pub fn with_gate(mut self, gate: GatePolicy) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub fn is_enabled(&self, code: RuleCode) -> bool {
        !self.disabled_rules.contains(&code)
    }
}
