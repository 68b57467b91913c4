//! JSON export of a validation report.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use roster_model::{DatasetSet, EntityKind, GatePolicy, Report};

use crate::gate::{GatingDecision, gate_allocation};

const REPORT_SCHEMA: &str = "roster.validation-report";
const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub sources: BTreeMap<EntityKind, SourceSummary>,
    pub gate: GatingDecision,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    #[serde(flatten)]
    pub report: &'a Report,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub file: String,
    pub rows: usize,
    pub issues: usize,
}

/// Wrap a report with schema metadata, input summaries and the gate decision.
pub fn build_report_payload<'a>(
    datasets: &DatasetSet,
    report: &'a Report,
    policy: GatePolicy,
) -> ReportPayload<'a> {
    let sources = datasets
        .iter()
        .map(|dataset| {
            (
                dataset.kind(),
                SourceSummary {
                    file: dataset.source().to_string(),
                    rows: dataset.len(),
                    issues: report.count_for(dataset.kind()),
                },
            )
        })
        .collect();
    ReportPayload {
        schema: REPORT_SCHEMA,
        schema_version: REPORT_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        sources,
        gate: gate_allocation(report, policy),
        error_count: report.error_count(),
        warning_count: report.warning_count(),
        info_count: report.info_count(),
        report,
    }
}

/// Serialize a payload as pretty JSON.
pub fn render_report_json(payload: &ReportPayload<'_>) -> Result<String> {
    let json = serde_json::to_string_pretty(payload).context("serialize validation report")?;
    Ok(format!("{json}\n"))
}

/// Write a payload as pretty JSON, creating parent directories as needed.
pub fn write_report_json(path: &Path, payload: &ReportPayload<'_>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = render_report_json(payload)?;
    std::fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}
