use super::common::*;
use crate::nexus::domain::{JurisdictionRule, NexusError, RiskLevel, SalesRecord, ThresholdType, Trigger};
use crate::nexus::evaluation::{NexusEngine, RuleAnomaly};
use crate::nexus::reference::JurisdictionTable;

#[test]
fn marketplace_sales_are_excluded_when_rule_says_so() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let sales = SalesRecord::direct(95_000.0, 0).with_marketplace(500_000.0, 0);

    let result = engine.evaluate(&code("AZ"), &sales).expect("known jurisdiction");

    assert_eq!(result.applicable_revenue, 95_000.0);
    assert_eq!(result.percent_complete, 95.0);
    assert_eq!(result.risk_level, RiskLevel::NexusImminent);
    assert!(!result.has_nexus);
    assert_eq!(result.sales, sales);
}

#[test]
fn reaching_the_threshold_establishes_nexus() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let sales = SalesRecord::direct(100_000.0, 0).with_marketplace(500_000.0, 0);

    let result = engine.evaluate(&code("AZ"), &sales).expect("known jurisdiction");

    assert!(result.has_nexus);
    assert_eq!(result.risk_level, RiskLevel::NexusEstablished);
    assert_eq!(result.percent_complete, 100.0);
    assert_eq!(result.triggered_by, Some(Trigger::Revenue));
}

#[test]
fn marketplace_sales_count_when_not_excluded() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let sales = SalesRecord::direct(40_000.0, 100).with_marketplace(20_000.0, 100);

    let result = engine.evaluate(&code("GA"), &sales).expect("known jurisdiction");

    assert_eq!(result.applicable_revenue, 60_000.0);
    assert_eq!(result.applicable_transactions, 200);
    assert!(result.has_nexus);
    assert_eq!(result.triggered_by, Some(Trigger::Transactions));
}

#[test]
fn untaxed_jurisdictions_short_circuit() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let sales = SalesRecord::direct(10_000_000.0, 100_000);

    let result = engine.evaluate(&code("OR"), &sales).expect("known jurisdiction");

    assert_eq!(result.risk_level, RiskLevel::NoSalesTax);
    assert!(!result.has_nexus);
    assert_eq!(result.percent_complete, 0.0);
    assert_eq!(result.triggered_by, None);
}

#[test]
fn unknown_jurisdictions_are_reported() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);

    let err = engine
        .evaluate(&code("ZZ"), &SalesRecord::default())
        .expect_err("ZZ is not in the table");

    assert_eq!(err, NexusError::UnknownJurisdiction(code("ZZ")));
}

#[test]
fn evaluation_is_repeatable() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let sales = SalesRecord::direct(80_000.0, 190);

    let first = engine.evaluate(&code("GA"), &sales).expect("known jurisdiction");
    let second = engine.evaluate(&code("GA"), &sales).expect("known jurisdiction");

    assert_eq!(first, second);
}

#[test]
fn evaluate_all_covers_every_jurisdiction_in_severity_order() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let sales = ledger(&[
        ("CA", SalesRecord::direct(600_000.0, 1)),
        ("AZ", SalesRecord::direct(120_000.0, 1)),
        ("GA", SalesRecord::direct(92_000.0, 1)),
        ("NY", SalesRecord::direct(400_000.0, 80)),
    ]);

    let results = engine.evaluate_all(&sales);
    let order: Vec<(&str, RiskLevel)> = results
        .iter()
        .map(|result| (result.jurisdiction_code.as_str(), result.risk_level))
        .collect();

    assert_eq!(
        order,
        vec![
            ("AZ", RiskLevel::NexusEstablished),
            ("CA", RiskLevel::NexusEstablished),
            ("GA", RiskLevel::NexusImminent),
            ("NY", RiskLevel::Monitoring),
            ("TT", RiskLevel::NoNexus),
            ("OR", RiskLevel::NoSalesTax),
        ]
    );
}

#[test]
fn evaluate_all_ignores_ledger_entries_outside_the_table() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let sales = ledger(&[("ZZ", SalesRecord::direct(1_000_000.0, 1_000))]);

    let results = engine.evaluate_all(&sales);

    assert_eq!(results.len(), table.len());
    assert!(results.iter().all(|result| !result.has_nexus));
}

#[test]
fn excluded_marketplace_growth_never_changes_the_outcome() {
    let table = sample_table();
    let engine = NexusEngine::new(&table);
    let baseline = engine
        .evaluate(&code("AZ"), &SalesRecord::direct(72_000.0, 5))
        .expect("known jurisdiction");

    for marketplace in [1.0, 50_000.0, 10_000_000.0] {
        let sales = SalesRecord::direct(72_000.0, 5).with_marketplace(marketplace, 40);
        let result = engine.evaluate(&code("AZ"), &sales).expect("known jurisdiction");
        assert_eq!(result.applicable_revenue, baseline.applicable_revenue);
        assert_eq!(result.percent_complete, baseline.percent_complete);
        assert_eq!(result.risk_level, baseline.risk_level);
    }
}

#[test]
fn invalid_rules_are_flagged_and_classified_as_no_nexus() {
    let table = JurisdictionTable::from_jurisdictions(vec![
        jurisdiction(
            "QQ",
            "Quux",
            JurisdictionRule {
                has_tax: true,
                revenue_threshold: None,
                transaction_threshold: Some(10),
                threshold_type: ThresholdType::Both,
                exclude_marketplace_sales: false,
            },
        ),
        jurisdiction("XX", "Xanadu", rule(ThresholdType::Unrecognized, Some(1.0), None)),
    ])
    .expect("table builds despite anomalies");
    let engine = NexusEngine::new(&table);

    let both = engine
        .evaluate(&code("QQ"), &SalesRecord::direct(1_000_000.0, 1_000))
        .expect("known jurisdiction");
    assert_eq!(both.anomaly, Some(RuleAnomaly::MissingRevenueThreshold));
    assert_eq!(both.risk_level, RiskLevel::NoNexus);
    assert!(!both.has_nexus);
    assert_eq!(both.applicable_transactions, 1_000);

    let unknown_type = engine
        .evaluate(&code("XX"), &SalesRecord::direct(5.0, 0))
        .expect("known jurisdiction");
    assert_eq!(
        unknown_type.anomaly,
        Some(RuleAnomaly::UnrecognizedThresholdType)
    );
    assert_eq!(unknown_type.percent_complete, 0.0);
}

#[test]
fn rule_validation_lists_every_contradiction() {
    let mut taxed_without_thresholds = rule(ThresholdType::None, None, None);
    assert_eq!(
        taxed_without_thresholds.validate(),
        vec![RuleAnomaly::TaxedWithoutThresholds]
    );

    taxed_without_thresholds.has_tax = false;
    assert!(taxed_without_thresholds.validate().is_empty());

    assert_eq!(
        rule(ThresholdType::Either, Some(-1.0), None).validate(),
        vec![
            RuleAnomaly::MissingTransactionThreshold,
            RuleAnomaly::NegativeThreshold
        ]
    );
    assert!(rule(ThresholdType::RevenueOnly, Some(100_000.0), None)
        .validate()
        .is_empty());
}

#[test]
fn first_anomaly_follows_validation_order() {
    let rules = [
        rule(ThresholdType::Unrecognized, Some(-1.0), None),
        rule(ThresholdType::Both, None, None),
        rule(ThresholdType::Either, Some(-1.0), None),
        rule(ThresholdType::RevenueOnly, Some(100_000.0), None),
    ];

    for rule in &rules {
        assert_eq!(rule.first_anomaly(), rule.validate().first().copied());
    }
}

#[test]
fn infinite_revenue_threshold_is_flagged_as_not_finite() {
    let anomaly = rule(ThresholdType::RevenueOnly, Some(f64::INFINITY), None).first_anomaly();

    assert_eq!(anomaly, Some(RuleAnomaly::NegativeThreshold));
    assert!(RuleAnomaly::NegativeThreshold.summary().contains("not finite"));
}
