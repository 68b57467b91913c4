//! Allocation gating.

use serde::Serialize;

use roster_model::{EntityKind, GatePolicy, Report};

/// Whether validated data may be handed to allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatingDecision {
    pub policy: GatePolicy,
    pub allow_allocation: bool,
    pub blocking_files: Vec<EntityKind>,
}

/// Decide whether allocation may proceed under `policy`.
///
/// With [`GatePolicy::AnyIssue`] this agrees with [`Report::is_valid`].
pub fn gate_allocation(report: &Report, policy: GatePolicy) -> GatingDecision {
    let blocking_files = report.blocking_files(policy);
    GatingDecision {
        policy,
        allow_allocation: blocking_files.is_empty(),
        blocking_files,
    }
}
