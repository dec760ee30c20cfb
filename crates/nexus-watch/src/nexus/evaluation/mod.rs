mod anomaly;
pub mod policy;
mod thresholds;

#[cfg(test)]
mod tests;

pub use anomaly::RuleAnomaly;
pub use thresholds::{evaluate_thresholds, ThresholdOutcome};

use super::domain::{
    Jurisdiction, JurisdictionCode, NexusError, RiskLevel, SalesLedger, SalesRecord, Trigger,
};
use super::reference::JurisdictionTable;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Stateless evaluator over an immutable jurisdiction reference table.
#[derive(Debug, Clone, Copy)]
pub struct NexusEngine<'a> {
    table: &'a JurisdictionTable,
}

impl<'a> NexusEngine<'a> {
    pub fn new(table: &'a JurisdictionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a JurisdictionTable {
        self.table
    }

    /// Evaluate a single jurisdiction.
    pub fn evaluate(
        &self,
        code: &JurisdictionCode,
        sales: &SalesRecord,
    ) -> Result<EvaluationResult, NexusError> {
        let jurisdiction = self
            .table
            .get(code)
            .ok_or_else(|| NexusError::UnknownJurisdiction(code.clone()))?;
        Ok(evaluate_jurisdiction(jurisdiction, sales))
    }

    /// Evaluate every jurisdiction in the table, most severe first and then
    /// by name. Jurisdictions without recorded sales are evaluated at zero.
    pub fn evaluate_all(&self, sales: &SalesLedger) -> Vec<EvaluationResult> {
        for code in sales.keys().filter(|code| self.table.get(code).is_none()) {
            debug!(%code, "ignoring sales for jurisdiction outside the reference table");
        }

        let mut results: Vec<EvaluationResult> = self
            .table
            .iter()
            .map(|jurisdiction| {
                let record = sales.get(&jurisdiction.code).copied().unwrap_or_default();
                evaluate_jurisdiction(jurisdiction, &record)
            })
            .collect();

        sort_by_severity(&mut results);

        info!(
            jurisdictions = results.len(),
            established = results.iter().filter(|result| result.has_nexus).count(),
            "evaluated nexus thresholds"
        );

        results
    }
}

fn sort_by_severity(results: &mut [EvaluationResult]) {
    results.sort_by(|left, right| {
        left.risk_level
            .rank()
            .cmp(&right.risk_level.rank())
            .then_with(|| left.jurisdiction_name.cmp(&right.jurisdiction_name))
    });
}

fn evaluate_jurisdiction(jurisdiction: &Jurisdiction, sales: &SalesRecord) -> EvaluationResult {
    let rule = &jurisdiction.rule;

    if !rule.has_tax {
        return EvaluationResult {
            jurisdiction_code: jurisdiction.code.clone(),
            jurisdiction_name: jurisdiction.name.clone(),
            has_nexus: false,
            risk_level: RiskLevel::NoSalesTax,
            percent_complete: 0.0,
            triggered_by: None,
            applicable_revenue: 0.0,
            applicable_transactions: 0,
            sales: *sales,
            anomaly: None,
        };
    }

    let (applicable_revenue, applicable_transactions) = rule.applicable_sales(sales);

    if let Some(anomaly) = rule.first_anomaly() {
        warn!(
            code = %jurisdiction.code,
            anomaly = anomaly.summary(),
            "invalid rule configuration; classifying as no nexus"
        );
        return EvaluationResult {
            jurisdiction_code: jurisdiction.code.clone(),
            jurisdiction_name: jurisdiction.name.clone(),
            has_nexus: false,
            risk_level: RiskLevel::NoNexus,
            percent_complete: 0.0,
            triggered_by: None,
            applicable_revenue,
            applicable_transactions,
            sales: *sales,
            anomaly: Some(anomaly),
        };
    }

    let outcome = evaluate_thresholds(rule, applicable_revenue, applicable_transactions);
    debug!(
        code = %jurisdiction.code,
        risk = outcome.risk_level.label(),
        percent = outcome.percent_complete,
        "evaluated jurisdiction"
    );

    EvaluationResult {
        jurisdiction_code: jurisdiction.code.clone(),
        jurisdiction_name: jurisdiction.name.clone(),
        has_nexus: outcome.has_nexus,
        risk_level: outcome.risk_level,
        percent_complete: outcome.percent_complete,
        triggered_by: outcome.triggered_by,
        applicable_revenue,
        applicable_transactions,
        sales: *sales,
        anomaly: None,
    }
}

/// Nexus determination for one jurisdiction, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub jurisdiction_code: JurisdictionCode,
    pub jurisdiction_name: String,
    pub has_nexus: bool,
    pub risk_level: RiskLevel,
    pub percent_complete: f64,
    pub triggered_by: Option<Trigger>,
    pub applicable_revenue: f64,
    pub applicable_transactions: u64,
    pub sales: SalesRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<RuleAnomaly>,
}
