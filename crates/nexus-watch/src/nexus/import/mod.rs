//! CSV intake for per-jurisdiction sales figures.

mod parser;

use super::domain::{JurisdictionCode, SalesLedger, SalesRecord};
use super::reference::JurisdictionTable;
use std::io::Read;
use std::path::Path;
use tracing::info;

use parser::SalesRow;

// Counts arrive as f64; beyond 2^53 neighbouring whole numbers collapse.
const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, thiserror::Error)]
pub enum SalesImportError {
    #[error("failed to read sales export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid sales CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: unknown jurisdiction {code}")]
    UnknownJurisdiction { code: JurisdictionCode, line: u64 },
    #[error("line {line}: {field} for {code} must be a non-negative {expected}")]
    InvalidFigure {
        code: JurisdictionCode,
        field: &'static str,
        expected: &'static str,
        line: u64,
    },
    #[error("line {line}: jurisdiction {code} appears more than once")]
    DuplicateJurisdiction { code: JurisdictionCode, line: u64 },
}

/// Builds a validated [`SalesLedger`] from a CSV export with the header
/// `jurisdiction,direct_revenue,direct_transactions,marketplace_revenue,marketplace_transactions`.
pub struct SalesImporter;

impl SalesImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        table: &JurisdictionTable,
    ) -> Result<SalesLedger, SalesImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, table)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        table: &JurisdictionTable,
    ) -> Result<SalesLedger, SalesImportError> {
        let mut ledger = SalesLedger::new();

        for row in parser::parse_rows(reader)? {
            let code = JurisdictionCode::new(&row.jurisdiction);
            if table.get(&code).is_none() {
                return Err(SalesImportError::UnknownJurisdiction {
                    code,
                    line: row.line,
                });
            }
            if ledger.contains_key(&code) {
                return Err(SalesImportError::DuplicateJurisdiction {
                    code,
                    line: row.line,
                });
            }

            let record = validate_row(&code, &row)?;
            ledger.insert(code, record);
        }

        info!(jurisdictions = ledger.len(), "imported sales ledger");
        Ok(ledger)
    }
}

fn validate_row(code: &JurisdictionCode, row: &SalesRow) -> Result<SalesRecord, SalesImportError> {
    let revenue = |field: &'static str, value: f64| {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(SalesImportError::InvalidFigure {
                code: code.clone(),
                field,
                expected: "amount",
                line: row.line,
            })
        }
    };
    let count = |field: &'static str, value: f64| {
        if value.is_finite() && (0.0..=MAX_EXACT_COUNT).contains(&value) && value.fract() == 0.0 {
            Ok(value as u64)
        } else {
            Err(SalesImportError::InvalidFigure {
                code: code.clone(),
                field,
                expected: "whole number",
                line: row.line,
            })
        }
    };

    Ok(SalesRecord {
        direct_revenue: revenue("direct_revenue", row.direct_revenue)?,
        direct_transactions: count("direct_transactions", row.direct_transactions)?,
        marketplace_revenue: revenue("marketplace_revenue", row.marketplace_revenue)?,
        marketplace_transactions: count("marketplace_transactions", row.marketplace_transactions)?,
    })
}
