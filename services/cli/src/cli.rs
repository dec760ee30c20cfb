use crate::commands::{
    run_evaluate, run_jurisdictions, run_scenario, run_validate_rules, EvaluateArgs, ScenarioArgs,
};
use crate::infra::parse_format;
use clap::{Parser, Subcommand};
use nexus_watch::config::{AppConfig, OutputFormat};
use nexus_watch::error::AppError;
use nexus_watch::telemetry;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "nexus-watch",
    about = "Evaluate economic nexus exposure across U.S. sales tax jurisdictions",
    version
)]
pub(crate) struct Cli {
    /// JSON jurisdiction table to use instead of the built-in one
    #[arg(long, global = true)]
    rules: Option<PathBuf>,
    /// Output format: table, json or csv
    #[arg(long, global = true, value_parser = parse_format)]
    format: Option<OutputFormat>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the jurisdiction reference table
    Jurisdictions,
    /// Evaluate recorded sales against every jurisdiction, or just one
    Evaluate(EvaluateArgs),
    /// Compare current exposure with a uniform growth projection
    Scenario(ScenarioArgs),
    /// Report rule configuration anomalies in the reference table
    ValidateRules,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(path) = cli.rules {
        config.rules.path = Some(path);
    }
    if let Some(format) = cli.format {
        config.output = format;
    }

    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, ?config.output, "configuration loaded");

    let table = config.rules.load_table()?;

    match cli.command {
        Command::Jurisdictions => run_jurisdictions(&table, config.output),
        Command::Evaluate(args) => run_evaluate(args, &table, config.output),
        Command::Scenario(args) => run_scenario(args, &table, config.output),
        Command::ValidateRules => run_validate_rules(&table),
    }
}
