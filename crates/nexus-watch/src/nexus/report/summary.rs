use super::super::domain::{JurisdictionCode, RiskLevel, SalesLedger};
use super::super::evaluation::{EvaluationResult, NexusEngine};
use super::views::{EvaluationRowView, RiskTierCount};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Jurisdiction counts per risk tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NexusSummary {
    pub total: usize,
    pub nexus_established: usize,
    pub nexus_imminent: usize,
    pub monitoring: usize,
    pub no_nexus: usize,
    pub no_sales_tax: usize,
    /// Established or imminent jurisdictions, in result order.
    pub requires_action: Vec<JurisdictionCode>,
}

impl NexusSummary {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::NexusEstablished => self.nexus_established,
            RiskLevel::NexusImminent => self.nexus_imminent,
            RiskLevel::Monitoring => self.monitoring,
            RiskLevel::NoNexus => self.no_nexus,
            RiskLevel::NoSalesTax => self.no_sales_tax,
        }
    }

    pub fn tier_counts(&self) -> Vec<RiskTierCount> {
        RiskLevel::ordered()
            .into_iter()
            .map(|level| RiskTierCount {
                level,
                label: level.label(),
                count: self.count(level),
            })
            .collect()
    }
}

pub fn summarize(results: &[EvaluationResult]) -> NexusSummary {
    let mut summary = NexusSummary {
        total: results.len(),
        ..NexusSummary::default()
    };

    for result in results {
        match result.risk_level {
            RiskLevel::NexusEstablished => summary.nexus_established += 1,
            RiskLevel::NexusImminent => summary.nexus_imminent += 1,
            RiskLevel::Monitoring => summary.monitoring += 1,
            RiskLevel::NoNexus => summary.no_nexus += 1,
            RiskLevel::NoSalesTax => summary.no_sales_tax += 1,
        }

        if result.risk_level.requires_action() {
            summary
                .requires_action
                .push(result.jurisdiction_code.clone());
        }
    }

    summary
}

/// Full-table evaluation stamped with the date it was produced for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NexusReport {
    pub as_of: NaiveDate,
    pub results: Vec<EvaluationResult>,
    pub summary: NexusSummary,
}

impl NexusReport {
    pub fn views(&self) -> Vec<EvaluationRowView> {
        self.results.iter().map(EvaluationRowView::from).collect()
    }

    pub fn requiring_action(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.results
            .iter()
            .filter(|result| result.risk_level.requires_action())
    }
}

impl NexusEngine<'_> {
    pub fn report(&self, sales: &SalesLedger, as_of: NaiveDate) -> NexusReport {
        let results = self.evaluate_all(sales);
        let summary = summarize(&results);
        NexusReport {
            as_of,
            results,
            summary,
        }
    }
}
