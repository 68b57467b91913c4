use anyhow::Result;
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use roster_cli::pipeline::{
    InputPaths, OptionOverrides, ValidationRun, apply_overrides, load_options, run_validation,
};
use roster_validate::{RULES, build_report_payload, render_report_json, write_report_json};

use crate::cli::{ReportFormatArg, ValidateArgs};
use crate::summary::{apply_table_style, header_cell, severity_cell};

pub fn run_rules() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Severity"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for rule in RULES {
        table.add_row(vec![
            Cell::new(rule.code),
            Cell::new(rule.name),
            severity_cell(rule.severity),
            Cell::new(rule.description),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationRun> {
    let span = info_span!("validate_command");
    let _guard = span.enter();

    let options = apply_overrides(
        load_options(args.config.as_deref())?,
        &OptionOverrides {
            errors_only: args.errors_only,
            disable: args.disable.clone(),
            parallel: args.parallel,
        },
    );
    let inputs = InputPaths {
        folder: args.folder.clone(),
        clients: args.clients.clone(),
        workers: args.workers.clone(),
        tasks: args.tasks.clone(),
    };
    let run = run_validation(&inputs, options)?;

    let payload = build_report_payload(&run.datasets, &run.report, run.options.gate);
    if let Some(path) = &args.output {
        write_report_json(path, &payload)?;
        info!(path = %path.display(), "wrote report");
    }
    if args.format == ReportFormatArg::Json {
        print!("{}", render_report_json(&payload)?);
    }
    Ok(run)
}
