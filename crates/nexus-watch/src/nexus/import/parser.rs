use serde::Deserialize;
use std::io::Read;

/// One CSV row before validation against the reference table.
#[derive(Debug)]
pub(crate) struct SalesRow {
    pub(crate) line: u64,
    pub(crate) jurisdiction: String,
    pub(crate) direct_revenue: f64,
    pub(crate) direct_transactions: f64,
    pub(crate) marketplace_revenue: f64,
    pub(crate) marketplace_transactions: f64,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<SalesRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let raw: RawSalesRow = record.deserialize(Some(&headers))?;
        if raw.jurisdiction.is_empty() {
            continue;
        }

        rows.push(SalesRow {
            // record position, not row index: csv skips blank lines
            line: record.position().map(|position| position.line()).unwrap_or_default(),
            jurisdiction: raw.jurisdiction,
            direct_revenue: raw.direct_revenue.unwrap_or_default(),
            direct_transactions: raw.direct_transactions.unwrap_or_default(),
            marketplace_revenue: raw.marketplace_revenue.unwrap_or_default(),
            marketplace_transactions: raw.marketplace_transactions.unwrap_or_default(),
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawSalesRow {
    jurisdiction: String,
    #[serde(default)]
    direct_revenue: Option<f64>,
    #[serde(default)]
    direct_transactions: Option<f64>,
    #[serde(default)]
    marketplace_revenue: Option<f64>,
    #[serde(default)]
    marketplace_transactions: Option<f64>,
}
