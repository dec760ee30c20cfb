use chrono::NaiveDate;
use nexus_watch::nexus::export::{write_csv, write_report_json};
use nexus_watch::nexus::{
    JurisdictionCode, JurisdictionTable, NexusEngine, RiskLevel, SalesImportError, SalesImporter,
};
use std::io::Cursor;

const SALES_CSV: &str = "\
jurisdiction,direct_revenue,direct_transactions,marketplace_revenue,marketplace_transactions
AZ,95000,120,500000,900
ga,20000,210,,
NY,510000,99,0,0
";

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

#[test]
fn imported_sales_drive_the_full_report() {
    let table = JurisdictionTable::standard();
    let sales = SalesImporter::from_reader(Cursor::new(SALES_CSV), &table).expect("csv imports");
    assert_eq!(sales.len(), 3);

    let engine = NexusEngine::new(&table);
    let report = engine.report(&sales, as_of());

    let first = &report.results[0];
    assert_eq!(first.jurisdiction_code, JurisdictionCode::new("GA"));
    assert_eq!(first.risk_level, RiskLevel::NexusEstablished);

    let arizona = report
        .results
        .iter()
        .find(|result| result.jurisdiction_code.as_str() == "AZ")
        .expect("AZ evaluated");
    assert_eq!(arizona.risk_level, RiskLevel::NexusImminent);
    assert_eq!(arizona.applicable_revenue, 95_000.0);

    let new_york = report
        .results
        .iter()
        .find(|result| result.jurisdiction_code.as_str() == "NY")
        .expect("NY evaluated");
    assert!(!new_york.has_nexus);
    assert_eq!(new_york.risk_level, RiskLevel::NexusImminent);

    let action: Vec<&str> = report
        .requiring_action()
        .map(|result| result.jurisdiction_code.as_str())
        .collect();
    assert_eq!(action, vec!["GA", "AZ", "NY"]);
    assert_eq!(report.summary.requires_action.len(), 3);

    let insight = engine.explain(arizona).expect("AZ explained");
    assert!(insight.headline.contains("Arizona"));
}

#[test]
fn unknown_codes_in_sales_are_reported_with_line() {
    let table = JurisdictionTable::standard();
    let csv = "jurisdiction,direct_revenue,direct_transactions,marketplace_revenue,marketplace_transactions\nAZ,1,1,0,0\nPR,10,1,0,0\n";

    let err = SalesImporter::from_reader(Cursor::new(csv), &table).expect_err("PR is unknown");

    match err {
        SalesImportError::UnknownJurisdiction { code, line } => {
            assert_eq!(code.as_str(), "PR");
            assert_eq!(line, 3);
        }
        other => panic!("expected unknown jurisdiction, got {other:?}"),
    }
}

#[test]
fn report_exports_to_csv_and_json() {
    let table = JurisdictionTable::standard();
    let sales = SalesImporter::from_reader(Cursor::new(SALES_CSV), &table).expect("csv imports");
    let report = NexusEngine::new(&table).report(&sales, as_of());

    let mut csv_out = Vec::new();
    write_csv(&mut csv_out, &report.results).expect("csv export");
    let csv_text = String::from_utf8(csv_out).expect("utf8");
    assert_eq!(csv_text.lines().count(), 52);
    assert!(csv_text
        .lines()
        .nth(1)
        .is_some_and(|line| line.starts_with("GA,Georgia,Nexus Established,true,100.0,Transactions")));

    let mut json_out = Vec::new();
    write_report_json(&mut json_out, &report).expect("json export");
    let value: serde_json::Value = serde_json::from_slice(&json_out).expect("valid json");
    assert_eq!(value["as_of"], "2025-06-30");
    assert_eq!(value["results"][0]["risk_level"], "NEXUS_ESTABLISHED");
    assert_eq!(value["results"][0]["triggered_by"], "transactions");
    assert_eq!(value["summary"]["nexus_established"], 1);
}
