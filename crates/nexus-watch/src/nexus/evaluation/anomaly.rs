use super::super::domain::{JurisdictionRule, ThresholdType};
use serde::{Deserialize, Serialize};

/// Contradiction between a rule's declared threshold type and its fields.
///
/// Anomalies never abort an evaluation. The engine classifies the affected
/// jurisdiction as no-nexus and attaches the anomaly to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAnomaly {
    UnrecognizedThresholdType,
    MissingRevenueThreshold,
    MissingTransactionThreshold,
    TaxedWithoutThresholds,
    NegativeThreshold,
}

impl RuleAnomaly {
    pub fn summary(&self) -> &'static str {
        match self {
            RuleAnomaly::UnrecognizedThresholdType => "threshold type is not recognized",
            RuleAnomaly::MissingRevenueThreshold => {
                "threshold type requires a revenue threshold but none is configured"
            }
            RuleAnomaly::MissingTransactionThreshold => {
                "threshold type requires a transaction threshold but none is configured"
            }
            RuleAnomaly::TaxedWithoutThresholds => {
                "jurisdiction levies sales tax but declares no threshold"
            }
            RuleAnomaly::NegativeThreshold => "revenue threshold is negative or not finite",
        }
    }
}

impl JurisdictionRule {
    /// Lists configuration anomalies. Rules for untaxed jurisdictions are
    /// never evaluated, so they are never anomalous.
    pub fn validate(&self) -> Vec<RuleAnomaly> {
        self.anomaly_checks().into_iter().flatten().collect()
    }

    /// First anomaly in `validate()` order, without collecting the rest.
    pub fn first_anomaly(&self) -> Option<RuleAnomaly> {
        self.anomaly_checks().into_iter().flatten().next()
    }

    // Fixed precedence: threshold type, missing revenue, missing
    // transactions, invalid revenue amount.
    fn anomaly_checks(&self) -> [Option<RuleAnomaly>; 4] {
        if !self.has_tax {
            return [None; 4];
        }

        let (type_anomaly, needs_revenue, needs_transactions) = match self.threshold_type {
            ThresholdType::RevenueOnly => (None, true, false),
            ThresholdType::TransactionOnly => (None, false, true),
            ThresholdType::Either | ThresholdType::Both => (None, true, true),
            ThresholdType::None => (Some(RuleAnomaly::TaxedWithoutThresholds), false, false),
            ThresholdType::Unrecognized => {
                (Some(RuleAnomaly::UnrecognizedThresholdType), false, false)
            }
        };

        [
            type_anomaly,
            (needs_revenue && self.revenue_threshold.is_none())
                .then_some(RuleAnomaly::MissingRevenueThreshold),
            (needs_transactions && self.transaction_threshold.is_none())
                .then_some(RuleAnomaly::MissingTransactionThreshold),
            self.revenue_threshold
                .is_some_and(|threshold| !threshold.is_finite() || threshold < 0.0)
                .then_some(RuleAnomaly::NegativeThreshold),
        ]
    }
}
