//! CLI argument definitions for the roster validator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_model::RuleCode;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Validate client, worker and task tables before allocation",
    long_about = "Validate client, worker and task tables before allocation.\n\n\
                  Checks required columns, unique ids, value formats, task references,\n\
                  worker capacity and skill coverage, and decides whether the data may\n\
                  be handed to allocation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a folder of tables or individual table files.
    Validate(ValidateArgs),

    /// List the validation rules.
    Rules,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Folder holding clients.csv, workers.csv and tasks.csv.
    #[arg(
        value_name = "FOLDER",
        required_unless_present_any = ["clients", "workers", "tasks"]
    )]
    pub folder: Option<PathBuf>,

    /// Clients table (overrides the file found in FOLDER).
    #[arg(long = "clients", value_name = "FILE")]
    pub clients: Option<PathBuf>,

    /// Workers table (overrides the file found in FOLDER).
    #[arg(long = "workers", value_name = "FILE")]
    pub workers: Option<PathBuf>,

    /// Tasks table (overrides the file found in FOLDER).
    #[arg(long = "tasks", value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// How to print the report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Also write the JSON report to this file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// TOML file with validation options.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Let warnings and info issues through the allocation gate.
    ///
    /// By default any issue blocks allocation, matching the report's
    /// `isValid` flag. With this flag only error-severity issues block.
    #[arg(long = "errors-only")]
    pub errors_only: bool,

    /// Skip a rule (repeatable), e.g. `--disable V12`.
    #[arg(long = "disable", value_name = "CODE", value_parser = parse_rule_code)]
    pub disable: Vec<RuleCode>,

    /// Run rules on separate threads.
    #[arg(long = "parallel")]
    pub parallel: bool,
}

fn parse_rule_code(value: &str) -> Result<RuleCode, String> {
    value.parse::<RuleCode>().map_err(|e| e.to_string())
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_requires_an_input() {
        assert!(Cli::try_parse_from(["roster", "validate"]).is_err());
        assert!(Cli::try_parse_from(["roster", "validate", "--tasks", "t.csv"]).is_ok());
    }

    #[test]
    fn parses_validate_flags() {
        let cli = Cli::try_parse_from([
            "roster",
            "validate",
            "data",
            "--format",
            "json",
            "--errors-only",
            "--disable",
            "v12",
            "--disable",
            "V9",
        ])
        .expect("parse");
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.folder, Some(PathBuf::from("data")));
        assert!(args.format == ReportFormatArg::Json);
        assert!(args.errors_only);
        assert_eq!(args.disable, vec![RuleCode::V12, RuleCode::V9]);
    }

    #[test]
    fn rejects_unknown_rule_code() {
        assert!(Cli::try_parse_from(["roster", "validate", "data", "--disable", "V7"]).is_err());
    }
}
