use super::super::domain::{JurisdictionRule, RiskLevel, ThresholdType, Trigger};
use super::policy::{clamp_percent, classify_risk};
use serde::{Deserialize, Serialize};

/// Result of testing one rule against applicable sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdOutcome {
    pub has_nexus: bool,
    pub risk_level: RiskLevel,
    /// Clamped to `[0, 100]`; classification uses the unclamped value.
    pub percent_complete: f64,
    pub triggered_by: Option<Trigger>,
}

#[derive(Debug, Clone, Copy)]
struct MetricProgress {
    percent: f64,
    exceeded: bool,
}

impl MetricProgress {
    const ABSENT: Self = Self {
        percent: 0.0,
        exceeded: false,
    };

    /// A present zero threshold is crossed by any non-negative figure.
    fn measure(value: f64, threshold: Option<f64>) -> Self {
        match threshold {
            None => Self::ABSENT,
            Some(threshold) if threshold == 0.0 => Self {
                percent: 100.0,
                exceeded: value >= 0.0,
            },
            Some(threshold) => Self {
                percent: value / threshold * 100.0,
                exceeded: value >= threshold,
            },
        }
    }
}

/// Applies a jurisdiction's threshold rule to the sales that count toward it.
pub fn evaluate_thresholds(
    rule: &JurisdictionRule,
    applicable_revenue: f64,
    applicable_transactions: u64,
) -> ThresholdOutcome {
    let revenue = MetricProgress::measure(applicable_revenue, rule.revenue_threshold);
    let transactions = MetricProgress::measure(
        applicable_transactions as f64,
        rule.transaction_threshold.map(|threshold| threshold as f64),
    );

    let (percent, has_nexus, triggered_by) = match rule.threshold_type {
        ThresholdType::RevenueOnly => (
            revenue.percent,
            revenue.exceeded,
            revenue.exceeded.then_some(Trigger::Revenue),
        ),
        ThresholdType::TransactionOnly => (
            transactions.percent,
            transactions.exceeded,
            transactions.exceeded.then_some(Trigger::Transactions),
        ),
        ThresholdType::Either => {
            let trigger = match (revenue.exceeded, transactions.exceeded) {
                (true, true) => Some(Trigger::Both),
                (true, false) => Some(Trigger::Revenue),
                (false, true) => Some(Trigger::Transactions),
                (false, false) => None,
            };
            (
                revenue.percent.max(transactions.percent),
                trigger.is_some(),
                trigger,
            )
        }
        ThresholdType::Both => {
            let has_nexus = revenue.exceeded && transactions.exceeded;
            (
                revenue.percent.min(transactions.percent),
                has_nexus,
                has_nexus.then_some(Trigger::Both),
            )
        }
        ThresholdType::None | ThresholdType::Unrecognized => (0.0, false, None),
    };

    ThresholdOutcome {
        has_nexus,
        risk_level: classify_risk(has_nexus, percent),
        percent_complete: clamp_percent(percent),
        triggered_by,
    }
}
