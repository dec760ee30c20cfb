use super::domain::{JurisdictionCode, NexusError, SalesLedger};
use super::evaluation::{EvaluationResult, NexusEngine};
use super::report::{summarize, NexusSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::info;

/// One full evaluation pass and its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSet {
    pub results: Vec<EvaluationResult>,
    pub summary: NexusSummary,
}

/// Current evaluation next to a uniformly scaled projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub growth_percent: f64,
    pub current: EvaluationSet,
    pub projected: EvaluationSet,
    /// Jurisdictions without nexus today that have nexus in the projection,
    /// in projected result order.
    pub new_nexus_jurisdictions: Vec<JurisdictionCode>,
}

/// Multiplier for a growth percentage, floored at zero.
pub fn growth_factor(growth_percent: f64) -> f64 {
    (1.0 + growth_percent / 100.0).max(0.0)
}

pub fn project_ledger(sales: &SalesLedger, growth_percent: f64) -> SalesLedger {
    let factor = growth_factor(growth_percent);
    sales
        .iter()
        .map(|(code, record)| (code.clone(), record.scaled(factor)))
        .collect()
}

impl NexusEngine<'_> {
    fn evaluation_set(&self, sales: &SalesLedger) -> EvaluationSet {
        let results = self.evaluate_all(sales);
        let summary = summarize(&results);
        EvaluationSet { results, summary }
    }

    pub fn model_scenario(
        &self,
        sales: &SalesLedger,
        growth_percent: f64,
    ) -> Result<ScenarioComparison, NexusError> {
        if !growth_percent.is_finite() {
            return Err(NexusError::InvalidGrowth(growth_percent));
        }

        let current = self.evaluation_set(sales);
        let projected = self.evaluation_set(&project_ledger(sales, growth_percent));

        let established_now: HashSet<&JurisdictionCode> = current
            .results
            .iter()
            .filter(|result| result.has_nexus)
            .map(|result| &result.jurisdiction_code)
            .collect();

        let new_nexus_jurisdictions: Vec<JurisdictionCode> = projected
            .results
            .iter()
            .filter(|result| result.has_nexus && !established_now.contains(&result.jurisdiction_code))
            .map(|result| result.jurisdiction_code.clone())
            .collect();

        info!(
            growth_percent,
            current_established = current.summary.nexus_established,
            projected_established = projected.summary.nexus_established,
            newly_triggered = new_nexus_jurisdictions.len(),
            "modeled growth scenario"
        );

        Ok(ScenarioComparison {
            growth_percent,
            current,
            projected,
            new_nexus_jurisdictions,
        })
    }
}
