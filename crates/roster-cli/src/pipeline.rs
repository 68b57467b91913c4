//! Input loading and option resolution for a validation run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use roster_ingest::{load_dataset_set, read_csv_dataset};
use roster_model::{DatasetSet, EntityKind, Execution, GatePolicy, RuleCode, ValidationOptions};
use roster_validate::{Report, validate_with_options};

/// Where the three tables come from.
#[derive(Debug, Clone, Default)]
pub struct InputPaths {
    /// Folder searched for `clients.csv`, `workers.csv` and `tasks.csv`.
    pub folder: Option<PathBuf>,
    pub clients: Option<PathBuf>,
    pub workers: Option<PathBuf>,
    pub tasks: Option<PathBuf>,
}

impl InputPaths {
    fn explicit(&self) -> [(EntityKind, Option<&Path>); 3] {
        [
            (EntityKind::Clients, self.clients.as_deref()),
            (EntityKind::Workers, self.workers.as_deref()),
            (EntityKind::Tasks, self.tasks.as_deref()),
        ]
    }
}

/// Command-line settings layered over the options file.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub errors_only: bool,
    pub disable: Vec<RuleCode>,
    pub parallel: bool,
}

/// Result of one validation run.
#[derive(Debug)]
pub struct ValidationRun {
    pub datasets: DatasetSet,
    pub options: ValidationOptions,
    pub report: Report,
}

/// Load the tables named by `inputs`.
///
/// Explicit files replace whatever the folder provided for that table.
pub fn load_inputs(inputs: &InputPaths) -> Result<DatasetSet> {
    let mut datasets = match &inputs.folder {
        Some(folder) => load_dataset_set(folder)
            .with_context(|| format!("load tables from {}", folder.display()))?,
        None => DatasetSet::new(),
    };
    for (kind, path) in inputs.explicit() {
        let Some(path) = path else {
            continue;
        };
        let dataset = read_csv_dataset(path, kind)
            .with_context(|| format!("load {kind} table {}", path.display()))?;
        datasets.insert(dataset);
    }
    if datasets.is_empty() {
        match &inputs.folder {
            Some(folder) => bail!(
                "no clients, workers or tasks table found in {}",
                folder.display()
            ),
            None => bail!("no input tables given"),
        }
    }
    for dataset in datasets.iter() {
        info!(
            file = %dataset.kind(),
            source = dataset.source(),
            rows = dataset.len(),
            "loaded table"
        );
    }
    Ok(datasets)
}

/// Read options from a TOML file, or use defaults.
pub fn load_options(config: Option<&Path>) -> Result<ValidationOptions> {
    let Some(path) = config else {
        return Ok(ValidationOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Apply command-line overrides. Flags only ever relax the gate, disable
/// rules or switch on parallel execution.
pub fn apply_overrides(
    mut options: ValidationOptions,
    overrides: &OptionOverrides,
) -> ValidationOptions {
    if overrides.errors_only {
        options.gate = GatePolicy::ErrorsOnly;
    }
    options.disabled_rules.extend(overrides.disable.iter().copied());
    if overrides.parallel {
        options.execution = Execution::Parallel;
    }
    options
}

/// Load inputs and validate them.
pub fn run_validation(inputs: &InputPaths, options: ValidationOptions) -> Result<ValidationRun> {
    let datasets = load_inputs(inputs)?;
    let report = validate_with_options(&datasets, &options);
    Ok(ValidationRun {
        datasets,
        options,
        report,
    })
}
