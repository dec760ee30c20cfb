use super::super::domain::{JurisdictionCode, JurisdictionRule, NexusError, RiskLevel, Trigger};
use super::super::evaluation::{EvaluationResult, NexusEngine};
use serde::Serialize;

/// Plain-language explanation of one evaluation with next steps.
#[derive(Debug, Clone, Serialize)]
pub struct JurisdictionInsight {
    pub jurisdiction_code: JurisdictionCode,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

impl NexusEngine<'_> {
    pub fn explain(&self, result: &EvaluationResult) -> Result<JurisdictionInsight, NexusError> {
        let jurisdiction = self
            .table()
            .get(&result.jurisdiction_code)
            .ok_or_else(|| NexusError::UnknownJurisdiction(result.jurisdiction_code.clone()))?;
        Ok(generate_insight(&jurisdiction.rule, result))
    }
}

pub(crate) fn generate_insight(
    rule: &JurisdictionRule,
    result: &EvaluationResult,
) -> JurisdictionInsight {
    let name = &result.jurisdiction_name;
    let headline = match result.risk_level {
        RiskLevel::NexusEstablished => format!("{name}: economic nexus established"),
        RiskLevel::NexusImminent => format!(
            "{name}: nexus imminent at {:.1}% of threshold",
            result.percent_complete
        ),
        RiskLevel::Monitoring => format!(
            "{name}: monitoring at {:.1}% of threshold",
            result.percent_complete
        ),
        RiskLevel::NoNexus => format!(
            "{name}: no nexus ({:.1}% of threshold)",
            result.percent_complete
        ),
        RiskLevel::NoSalesTax => format!("{name} does not levy a statewide sales tax"),
    };

    let mut observations = Vec::new();
    let mut recommended_actions = Vec::new();

    if let Some(anomaly) = result.anomaly {
        observations.push(format!(
            "Rule configuration anomaly ({}); treated as no nexus until the rule is corrected",
            anomaly.summary()
        ));
        recommended_actions.push(format!("Review the {name} threshold rule"));
    }

    if result.risk_level != RiskLevel::NoSalesTax {
        if let Some(threshold) = rule.revenue_threshold {
            observations.push(format!(
                "Applicable revenue ${:.0} against a ${threshold:.0} threshold",
                result.applicable_revenue
            ));
        }
        if let Some(threshold) = rule.transaction_threshold {
            observations.push(format!(
                "{} applicable transaction(s) against a {threshold} transaction threshold",
                result.applicable_transactions
            ));
        }
        if rule.exclude_marketplace_sales && result.sales.marketplace_revenue > 0.0 {
            observations.push(format!(
                "Marketplace-facilitated sales of ${:.0} do not count toward this threshold",
                result.sales.marketplace_revenue
            ));
        }
    }

    match result.risk_level {
        RiskLevel::NexusEstablished => {
            if let Some(trigger) = result.triggered_by {
                observations.push(match trigger {
                    Trigger::Revenue => "Revenue threshold crossed".to_string(),
                    Trigger::Transactions => "Transaction threshold crossed".to_string(),
                    Trigger::Both => "Revenue and transaction thresholds crossed".to_string(),
                });
            }
            recommended_actions.push(format!("Register for a sales tax permit with {name}"));
            recommended_actions.push(format!(
                "Begin collecting sales tax on taxable sales into {name}"
            ));
            recommended_actions
                .push("Calendar filing and remittance deadlines for the new permit".to_string());
            recommended_actions.push(
                "Review exposure for sales made after the threshold was crossed".to_string(),
            );
        }
        RiskLevel::NexusImminent => {
            if let Some(remaining) = remaining_revenue(rule, result) {
                observations.push(format!(
                    "${remaining:.0} in additional revenue reaches the threshold"
                ));
            }
            recommended_actions.push(format!("Prepare {name} registration materials"));
            recommended_actions.push("Review sales into this jurisdiction weekly".to_string());
        }
        RiskLevel::Monitoring => {
            recommended_actions.push("Review sales into this jurisdiction monthly".to_string());
        }
        RiskLevel::NoNexus | RiskLevel::NoSalesTax => {}
    }

    JurisdictionInsight {
        jurisdiction_code: result.jurisdiction_code.clone(),
        headline,
        observations,
        recommended_actions,
    }
}

fn remaining_revenue(rule: &JurisdictionRule, result: &EvaluationResult) -> Option<f64> {
    rule.revenue_threshold
        .map(|threshold| threshold - result.applicable_revenue)
        .filter(|remaining| *remaining > 0.0)
}
