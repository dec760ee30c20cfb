use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Postal-style jurisdiction identifier, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct JurisdictionCode(String);

impl JurisdictionCode {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for JurisdictionCode {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for JurisdictionCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for JurisdictionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the revenue and transaction thresholds combine into a nexus test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdType {
    RevenueOnly,
    TransactionOnly,
    Either,
    Both,
    None,
    /// Produced when a loaded table carries a tag this build does not know.
    #[serde(other)]
    Unrecognized,
}

impl ThresholdType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RevenueOnly => "Revenue only",
            Self::TransactionOnly => "Transactions only",
            Self::Either => "Revenue or transactions",
            Self::Both => "Revenue and transactions",
            Self::None => "No threshold",
            Self::Unrecognized => "Unrecognized",
        }
    }
}

/// Statutory nexus rule set for one jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionRule {
    pub has_tax: bool,
    #[serde(default)]
    pub revenue_threshold: Option<f64>,
    #[serde(default)]
    pub transaction_threshold: Option<u64>,
    pub threshold_type: ThresholdType,
    #[serde(default)]
    pub exclude_marketplace_sales: bool,
}

impl JurisdictionRule {
    /// Revenue and transactions that count toward the seller's own threshold.
    pub fn applicable_sales(&self, sales: &SalesRecord) -> (f64, u64) {
        if self.exclude_marketplace_sales {
            (sales.direct_revenue, sales.direct_transactions)
        } else {
            (
                sales.direct_revenue + sales.marketplace_revenue,
                sales
                    .direct_transactions
                    .saturating_add(sales.marketplace_transactions),
            )
        }
    }
}

/// Reference table row: a jurisdiction and its rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub code: JurisdictionCode,
    pub name: String,
    #[serde(flatten)]
    pub rule: JurisdictionRule,
}

/// Taxpayer sales into a single jurisdiction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub direct_revenue: f64,
    pub direct_transactions: u64,
    pub marketplace_revenue: f64,
    pub marketplace_transactions: u64,
}

impl SalesRecord {
    pub fn direct(revenue: f64, transactions: u64) -> Self {
        Self {
            direct_revenue: revenue,
            direct_transactions: transactions,
            ..Self::default()
        }
    }

    pub fn with_marketplace(mut self, revenue: f64, transactions: u64) -> Self {
        self.marketplace_revenue = revenue;
        self.marketplace_transactions = transactions;
        self
    }

    /// Projects the record by `factor`. Negative factors are floored at zero;
    /// transaction counts are rounded to the nearest whole transaction.
    pub fn scaled(&self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        let scale_count = |count: u64| (count as f64 * factor).round() as u64;

        Self {
            direct_revenue: self.direct_revenue * factor,
            direct_transactions: scale_count(self.direct_transactions),
            marketplace_revenue: self.marketplace_revenue * factor,
            marketplace_transactions: scale_count(self.marketplace_transactions),
        }
    }
}

/// Sales keyed by jurisdiction. Missing jurisdictions are treated as zero.
pub type SalesLedger = BTreeMap<JurisdictionCode, SalesRecord>;

/// Risk tier, ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    NexusEstablished,
    NexusImminent,
    Monitoring,
    NoNexus,
    NoSalesTax,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::NexusEstablished,
            Self::NexusImminent,
            Self::Monitoring,
            Self::NoNexus,
            Self::NoSalesTax,
        ]
    }

    /// Sort rank; lower is more severe.
    pub const fn rank(self) -> u8 {
        match self {
            Self::NexusEstablished => 0,
            Self::NexusImminent => 1,
            Self::Monitoring => 2,
            Self::NoNexus => 3,
            Self::NoSalesTax => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NexusEstablished => "Nexus Established",
            Self::NexusImminent => "Nexus Imminent",
            Self::Monitoring => "Monitoring",
            Self::NoNexus => "No Nexus",
            Self::NoSalesTax => "No Sales Tax",
        }
    }

    pub const fn requires_action(self) -> bool {
        match self {
            Self::NexusEstablished | Self::NexusImminent => true,
            Self::Monitoring | Self::NoNexus | Self::NoSalesTax => false,
        }
    }
}

/// Which metric crossed its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Revenue,
    Transactions,
    Both,
}

impl Trigger {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Transactions => "Transactions",
            Self::Both => "Revenue and transactions",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NexusError {
    #[error("unknown jurisdiction {0}")]
    UnknownJurisdiction(JurisdictionCode),
    #[error("growth percent must be a finite number, got {0}")]
    InvalidGrowth(f64),
}
