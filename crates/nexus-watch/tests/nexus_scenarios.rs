use nexus_watch::nexus::{
    summarize, Jurisdiction, JurisdictionCode, JurisdictionRule, JurisdictionTable, NexusEngine,
    NexusError, RiskLevel, SalesLedger, SalesRecord, ThresholdType, Trigger,
};

fn revenue_only_table() -> JurisdictionTable {
    JurisdictionTable::from_jurisdictions(vec![
        Jurisdiction {
            code: JurisdictionCode::new("RV"),
            name: "Revenueland".to_string(),
            rule: JurisdictionRule {
                has_tax: true,
                revenue_threshold: Some(100_000.0),
                transaction_threshold: None,
                threshold_type: ThresholdType::RevenueOnly,
                exclude_marketplace_sales: true,
            },
        },
        Jurisdiction {
            code: JurisdictionCode::new("EI"),
            name: "Eitherton".to_string(),
            rule: JurisdictionRule {
                has_tax: true,
                revenue_threshold: Some(100_000.0),
                transaction_threshold: Some(200),
                threshold_type: ThresholdType::Either,
                exclude_marketplace_sales: false,
            },
        },
    ])
    .expect("valid table")
}

fn ledger(entries: &[(&str, SalesRecord)]) -> SalesLedger {
    entries
        .iter()
        .map(|(code, record)| (JurisdictionCode::new(code), *record))
        .collect()
}

#[test]
fn either_rule_reports_transaction_trigger() {
    let table = revenue_only_table();
    let engine = NexusEngine::new(&table);

    let result = engine
        .evaluate(
            &JurisdictionCode::new("EI"),
            &SalesRecord::direct(50_000.0, 250),
        )
        .expect("known jurisdiction");

    assert!(result.has_nexus);
    assert_eq!(result.triggered_by, Some(Trigger::Transactions));
    assert_eq!(result.percent_complete, 100.0);
}

#[test]
fn ten_percent_growth_pushes_imminent_jurisdiction_over_the_line() {
    let table = revenue_only_table();
    let engine = NexusEngine::new(&table);
    let sales = ledger(&[("RV", SalesRecord::direct(95_000.0, 10))]);

    let scenario = engine.model_scenario(&sales, 10.0).expect("finite growth");

    let current = scenario
        .current
        .results
        .iter()
        .find(|result| result.jurisdiction_code.as_str() == "RV")
        .expect("RV evaluated");
    assert_eq!(current.risk_level, RiskLevel::NexusImminent);
    assert!(!current.has_nexus);

    let projected = scenario
        .projected
        .results
        .iter()
        .find(|result| result.jurisdiction_code.as_str() == "RV")
        .expect("RV projected");
    assert!(projected.has_nexus);
    assert_eq!(projected.applicable_transactions, 11);

    assert_eq!(
        scenario.new_nexus_jurisdictions,
        vec![JurisdictionCode::new("RV")]
    );
    assert_eq!(scenario.current.summary.nexus_imminent, 1);
    assert_eq!(scenario.projected.summary.nexus_established, 1);
}

#[test]
fn jurisdictions_with_existing_nexus_are_not_new() {
    let table = revenue_only_table();
    let engine = NexusEngine::new(&table);
    let sales = ledger(&[
        ("RV", SalesRecord::direct(150_000.0, 0)),
        ("EI", SalesRecord::direct(10_000.0, 150)),
    ]);

    let scenario = engine.model_scenario(&sales, 50.0).expect("finite growth");

    assert_eq!(
        scenario.new_nexus_jurisdictions,
        vec![JurisdictionCode::new("EI")]
    );
}

#[test]
fn contraction_beyond_one_hundred_percent_zeroes_sales() {
    let table = revenue_only_table();
    let engine = NexusEngine::new(&table);
    let sales = ledger(&[("RV", SalesRecord::direct(150_000.0, 40))]);

    let scenario = engine.model_scenario(&sales, -150.0).expect("finite growth");

    assert!(scenario.new_nexus_jurisdictions.is_empty());
    assert!(scenario
        .projected
        .results
        .iter()
        .all(|result| result.applicable_revenue == 0.0 && !result.has_nexus));
}

#[test]
fn non_finite_growth_is_rejected() {
    let table = revenue_only_table();
    let engine = NexusEngine::new(&table);

    let err = engine
        .model_scenario(&SalesLedger::new(), f64::NAN)
        .expect_err("NaN growth rejected");

    assert!(matches!(err, NexusError::InvalidGrowth(_)));
}

#[test]
fn standard_table_summary_counts_every_tier() {
    let table = JurisdictionTable::standard();
    let engine = NexusEngine::new(&table);
    let sales = ledger(&[
        ("CA", SalesRecord::direct(650_000.0, 900)),
        ("TX", SalesRecord::direct(460_000.0, 800)),
        ("FL", SalesRecord::direct(75_000.0, 300)),
        ("OR", SalesRecord::direct(900_000.0, 5_000)),
    ]);

    let results = engine.evaluate_all(&sales);
    let summary = summarize(&results);

    assert_eq!(summary.total, 51);
    assert_eq!(summary.nexus_established, 1);
    assert_eq!(summary.nexus_imminent, 1);
    assert_eq!(summary.monitoring, 1);
    assert_eq!(summary.no_sales_tax, 5);
    assert_eq!(summary.no_nexus, 51 - 1 - 1 - 1 - 5);
    assert_eq!(
        summary.requires_action,
        vec![JurisdictionCode::new("CA"), JurisdictionCode::new("TX")]
    );
    assert_eq!(summary.count(RiskLevel::Monitoring), 1);
}
