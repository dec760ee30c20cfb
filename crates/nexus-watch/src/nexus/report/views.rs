use super::super::domain::{Jurisdiction, RiskLevel, Trigger};
use super::super::evaluation::EvaluationResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationRowView {
    pub jurisdiction_code: String,
    pub jurisdiction_name: String,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
    pub has_nexus: bool,
    pub percent_complete: f64,
    pub triggered_by: Option<Trigger>,
    pub trigger_label: &'static str,
    pub applicable_revenue: f64,
    pub applicable_transactions: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<&'static str>,
}

impl From<&EvaluationResult> for EvaluationRowView {
    fn from(result: &EvaluationResult) -> Self {
        Self {
            jurisdiction_code: result.jurisdiction_code.to_string(),
            jurisdiction_name: result.jurisdiction_name.clone(),
            risk_level: result.risk_level,
            risk_label: result.risk_level.label(),
            has_nexus: result.has_nexus,
            percent_complete: result.percent_complete,
            triggered_by: result.triggered_by,
            trigger_label: result.triggered_by.map(Trigger::label).unwrap_or("None"),
            applicable_revenue: result.applicable_revenue,
            applicable_transactions: result.applicable_transactions,
            anomaly: result.anomaly.map(|anomaly| anomaly.summary()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskTierCount {
    pub level: RiskLevel,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct JurisdictionRow {
    pub code: String,
    pub name: String,
    pub has_tax: bool,
    pub threshold_label: &'static str,
    pub revenue_threshold: Option<f64>,
    pub transaction_threshold: Option<u64>,
    pub exclude_marketplace_sales: bool,
}

impl From<&Jurisdiction> for JurisdictionRow {
    fn from(jurisdiction: &Jurisdiction) -> Self {
        let rule = &jurisdiction.rule;
        Self {
            code: jurisdiction.code.to_string(),
            name: jurisdiction.name.clone(),
            has_tax: rule.has_tax,
            threshold_label: rule.threshold_type.label(),
            revenue_threshold: rule.revenue_threshold,
            transaction_threshold: rule.transaction_threshold,
            exclude_marketplace_sales: rule.exclude_marketplace_sales,
        }
    }
}
