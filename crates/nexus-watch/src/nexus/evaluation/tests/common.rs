use crate::nexus::domain::{
    Jurisdiction, JurisdictionCode, JurisdictionRule, SalesLedger, SalesRecord, ThresholdType,
};
use crate::nexus::reference::JurisdictionTable;

pub(super) fn rule(
    threshold_type: ThresholdType,
    revenue_threshold: Option<f64>,
    transaction_threshold: Option<u64>,
) -> JurisdictionRule {
    JurisdictionRule {
        has_tax: true,
        revenue_threshold,
        transaction_threshold,
        threshold_type,
        exclude_marketplace_sales: false,
    }
}

pub(super) fn revenue_only_rule(threshold: f64) -> JurisdictionRule {
    rule(ThresholdType::RevenueOnly, Some(threshold), None)
}

pub(super) fn either_rule() -> JurisdictionRule {
    rule(ThresholdType::Either, Some(100_000.0), Some(200))
}

pub(super) fn both_rule() -> JurisdictionRule {
    rule(ThresholdType::Both, Some(500_000.0), Some(100))
}

pub(super) fn jurisdiction(code: &str, name: &str, rule: JurisdictionRule) -> Jurisdiction {
    Jurisdiction {
        code: JurisdictionCode::new(code),
        name: name.to_string(),
        rule,
    }
}

/// Small table covering every threshold type, an untaxed jurisdiction and a
/// marketplace-excluding one.
pub(super) fn sample_table() -> JurisdictionTable {
    let mut excluding = revenue_only_rule(100_000.0);
    excluding.exclude_marketplace_sales = true;

    JurisdictionTable::from_jurisdictions(vec![
        jurisdiction("AZ", "Arizona", excluding),
        jurisdiction("GA", "Georgia", either_rule()),
        jurisdiction("NY", "New York", both_rule()),
        jurisdiction(
            "TT",
            "Transactia",
            rule(ThresholdType::TransactionOnly, None, Some(200)),
        ),
        jurisdiction(
            "OR",
            "Oregon",
            JurisdictionRule {
                has_tax: false,
                revenue_threshold: None,
                transaction_threshold: None,
                threshold_type: ThresholdType::None,
                exclude_marketplace_sales: false,
            },
        ),
        jurisdiction("CA", "California", revenue_only_rule(500_000.0)),
    ])
    .expect("sample table is valid")
}

pub(super) fn code(raw: &str) -> JurisdictionCode {
    JurisdictionCode::new(raw)
}

pub(super) fn ledger(entries: &[(&str, SalesRecord)]) -> SalesLedger {
    entries
        .iter()
        .map(|(raw, record)| (code(raw), *record))
        .collect()
}
