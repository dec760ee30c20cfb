use crate::infra::{open_output, parse_date};
use crate::render::{render_insight, render_jurisdictions, render_report, render_scenario};
use chrono::{Local, NaiveDate};
use clap::Args;
use nexus_watch::config::OutputFormat;
use nexus_watch::error::AppError;
use nexus_watch::nexus::export::{write_csv, write_csv_rows, write_json, write_report_json};
use nexus_watch::nexus::report::views::JurisdictionRow;
use nexus_watch::nexus::report::JurisdictionInsight;
use nexus_watch::nexus::{
    EvaluationResult, JurisdictionCode, JurisdictionTable, NexusEngine, SalesImporter,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Sales CSV (jurisdiction, direct/marketplace revenue and transactions)
    #[arg(long)]
    pub(crate) sales: PathBuf,
    /// Evaluate a single jurisdiction and explain the result
    #[arg(long)]
    pub(crate) jurisdiction: Option<String>,
    /// Date stamped on the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Write output to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScenarioArgs {
    /// Sales CSV (jurisdiction, direct/marketplace revenue and transactions)
    #[arg(long)]
    pub(crate) sales: PathBuf,
    /// Uniform sales growth in percent; negative values model contraction
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) growth: f64,
    /// Write output to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SingleEvaluation<'a> {
    result: &'a EvaluationResult,
    insight: &'a JurisdictionInsight,
}

pub(crate) fn run_jurisdictions(
    table: &JurisdictionTable,
    format: OutputFormat,
) -> Result<(), AppError> {
    let rows: Vec<JurisdictionRow> = table.iter().map(JurisdictionRow::from).collect();
    let mut out = open_output(None)?;

    match format {
        OutputFormat::Table => render_jurisdictions(&mut out, &rows)?,
        OutputFormat::Json => write_json(&mut out, &rows)?,
        OutputFormat::Csv => write_csv_rows(&mut out, &rows)?,
    }

    out.flush()?;
    Ok(())
}

pub(crate) fn run_evaluate(
    args: EvaluateArgs,
    table: &JurisdictionTable,
    format: OutputFormat,
) -> Result<(), AppError> {
    let EvaluateArgs {
        sales,
        jurisdiction,
        as_of,
        output,
    } = args;

    let ledger = SalesImporter::from_path(&sales, table)?;
    let engine = NexusEngine::new(table);
    let mut out = open_output(output.as_deref())?;

    if let Some(raw) = jurisdiction {
        let code = JurisdictionCode::new(&raw);
        let record = ledger.get(&code).copied().unwrap_or_default();
        let result = engine.evaluate(&code, &record)?;
        let insight = engine.explain(&result)?;

        match format {
            OutputFormat::Table => render_insight(&mut out, &result, &insight)?,
            OutputFormat::Json => write_json(
                &mut out,
                &SingleEvaluation {
                    result: &result,
                    insight: &insight,
                },
            )?,
            OutputFormat::Csv => write_csv(&mut out, std::slice::from_ref(&result))?,
        }
    } else {
        let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
        let report = engine.report(&ledger, as_of);

        match format {
            OutputFormat::Table => render_report(&mut out, &report)?,
            OutputFormat::Json => write_report_json(&mut out, &report)?,
            OutputFormat::Csv => write_csv(&mut out, &report.results)?,
        }
    }

    out.flush()?;
    Ok(())
}

pub(crate) fn run_scenario(
    args: ScenarioArgs,
    table: &JurisdictionTable,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ScenarioArgs {
        sales,
        growth,
        output,
    } = args;

    let ledger = SalesImporter::from_path(&sales, table)?;
    let scenario = NexusEngine::new(table).model_scenario(&ledger, growth)?;
    let mut out = open_output(output.as_deref())?;

    match format {
        OutputFormat::Table => render_scenario(&mut out, &scenario)?,
        OutputFormat::Json => write_json(&mut out, &scenario)?,
        OutputFormat::Csv => write_csv(&mut out, &scenario.projected.results)?,
    }

    out.flush()?;
    Ok(())
}

pub(crate) fn run_validate_rules(table: &JurisdictionTable) -> Result<(), AppError> {
    let anomalies = table.anomalies();
    let mut out = open_output(None)?;

    if anomalies.is_empty() {
        writeln!(out, "{} jurisdictions checked: no rule anomalies", table.len())?;
        return Ok(());
    }

    for (code, anomaly) in &anomalies {
        warn!(%code, anomaly = anomaly.summary(), "rule anomaly");
        writeln!(out, "- {code}: {}", anomaly.summary())?;
    }
    writeln!(
        out,
        "{} anomalies across {} jurisdictions",
        anomalies.len(),
        table.len()
    )?;

    Ok(())
}
