//! CSV and JSON renderings of evaluation results.

use super::evaluation::EvaluationResult;
use super::report::NexusReport;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    jurisdiction: &'a str,
    name: &'a str,
    risk_level: &'static str,
    has_nexus: bool,
    percent_complete: String,
    triggered_by: &'static str,
    applicable_revenue: String,
    applicable_transactions: u64,
}

impl<'a> From<&'a EvaluationResult> for ExportRow<'a> {
    fn from(result: &'a EvaluationResult) -> Self {
        Self {
            jurisdiction: result.jurisdiction_code.as_str(),
            name: &result.jurisdiction_name,
            risk_level: result.risk_level.label(),
            has_nexus: result.has_nexus,
            percent_complete: format!("{:.1}", result.percent_complete),
            triggered_by: result.triggered_by.map(|trigger| trigger.label()).unwrap_or(""),
            applicable_revenue: format!("{:.2}", result.applicable_revenue),
            applicable_transactions: result.applicable_transactions,
        }
    }
}

pub fn write_csv<W: Write>(writer: W, results: &[EvaluationResult]) -> Result<(), ExportError> {
    write_csv_rows(writer, results.iter().map(ExportRow::from))
}

/// Writes any serializable rows with a header taken from the first row.
pub fn write_csv_rows<W, T, I>(writer: W, rows: I) -> Result<(), ExportError>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_report_json<W: Write>(writer: W, report: &NexusReport) -> Result<(), ExportError> {
    write_json(writer, report)
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode JSON export: {0}")]
    Json(#[from] serde_json::Error),
}
