use super::domain::{Jurisdiction, JurisdictionCode, JurisdictionRule, ThresholdType};
use super::evaluation::RuleAnomaly;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// Immutable mapping from jurisdiction code to its nexus rules.
#[derive(Debug, Clone, PartialEq)]
pub struct JurisdictionTable {
    jurisdictions: BTreeMap<JurisdictionCode, Jurisdiction>,
}

impl JurisdictionTable {
    /// Built-in table for the 50 states and the District of Columbia.
    ///
    /// Thresholds are illustrative and are not kept in sync with statute.
    pub fn standard() -> Self {
        let jurisdictions = standard_jurisdictions()
            .into_iter()
            .map(|jurisdiction| (jurisdiction.code.clone(), jurisdiction))
            .collect();
        Self { jurisdictions }
    }

    pub fn from_jurisdictions<I>(rows: I) -> Result<Self, ReferenceTableError>
    where
        I: IntoIterator<Item = Jurisdiction>,
    {
        let mut jurisdictions = BTreeMap::new();
        for jurisdiction in rows {
            if jurisdictions.contains_key(&jurisdiction.code) {
                return Err(ReferenceTableError::DuplicateJurisdiction(
                    jurisdiction.code,
                ));
            }
            jurisdictions.insert(jurisdiction.code.clone(), jurisdiction);
        }

        if jurisdictions.is_empty() {
            return Err(ReferenceTableError::Empty);
        }

        let table = Self { jurisdictions };
        for (code, anomaly) in table.anomalies() {
            warn!(%code, anomaly = anomaly.summary(), "reference table rule anomaly");
        }
        Ok(table)
    }

    /// Load a JSON array of jurisdiction rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceTableError> {
        let rows: Vec<Jurisdiction> = serde_json::from_reader(reader)?;
        Self::from_jurisdictions(rows)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn get(&self, code: &JurisdictionCode) -> Option<&Jurisdiction> {
        self.jurisdictions.get(code)
    }

    /// Rows in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Jurisdiction> {
        self.jurisdictions.values()
    }

    pub fn len(&self) -> usize {
        self.jurisdictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jurisdictions.is_empty()
    }

    pub fn anomalies(&self) -> Vec<(JurisdictionCode, RuleAnomaly)> {
        self.iter()
            .flat_map(|jurisdiction| {
                jurisdiction
                    .rule
                    .validate()
                    .into_iter()
                    .map(|anomaly| (jurisdiction.code.clone(), anomaly))
            })
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceTableError {
    #[error("failed to read jurisdiction table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid jurisdiction table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("jurisdiction {0} appears more than once")]
    DuplicateJurisdiction(JurisdictionCode),
    #[error("jurisdiction table is empty")]
    Empty,
}

fn jurisdiction(code: &str, name: &str, rule: JurisdictionRule) -> Jurisdiction {
    Jurisdiction {
        code: JurisdictionCode::new(code),
        name: name.to_string(),
        rule,
    }
}

fn revenue_only(code: &str, name: &str, revenue: f64, exclude_marketplace: bool) -> Jurisdiction {
    jurisdiction(
        code,
        name,
        JurisdictionRule {
            has_tax: true,
            revenue_threshold: Some(revenue),
            transaction_threshold: None,
            threshold_type: ThresholdType::RevenueOnly,
            exclude_marketplace_sales: exclude_marketplace,
        },
    )
}

fn revenue_or_transactions(
    code: &str,
    name: &str,
    revenue: f64,
    transactions: u64,
    exclude_marketplace: bool,
) -> Jurisdiction {
    jurisdiction(
        code,
        name,
        JurisdictionRule {
            has_tax: true,
            revenue_threshold: Some(revenue),
            transaction_threshold: Some(transactions),
            threshold_type: ThresholdType::Either,
            exclude_marketplace_sales: exclude_marketplace,
        },
    )
}

fn revenue_and_transactions(
    code: &str,
    name: &str,
    revenue: f64,
    transactions: u64,
    exclude_marketplace: bool,
) -> Jurisdiction {
    jurisdiction(
        code,
        name,
        JurisdictionRule {
            has_tax: true,
            revenue_threshold: Some(revenue),
            transaction_threshold: Some(transactions),
            threshold_type: ThresholdType::Both,
            exclude_marketplace_sales: exclude_marketplace,
        },
    )
}

fn no_sales_tax(code: &str, name: &str) -> Jurisdiction {
    jurisdiction(
        code,
        name,
        JurisdictionRule {
            has_tax: false,
            revenue_threshold: None,
            transaction_threshold: None,
            threshold_type: ThresholdType::None,
            exclude_marketplace_sales: false,
        },
    )
}

fn standard_jurisdictions() -> Vec<Jurisdiction> {
    vec![
        revenue_only("AL", "Alabama", 250_000.0, true),
        no_sales_tax("AK", "Alaska"),
        revenue_only("AZ", "Arizona", 100_000.0, true),
        revenue_or_transactions("AR", "Arkansas", 100_000.0, 200, false),
        revenue_only("CA", "California", 500_000.0, false),
        revenue_only("CO", "Colorado", 100_000.0, true),
        revenue_and_transactions("CT", "Connecticut", 100_000.0, 200, false),
        no_sales_tax("DE", "Delaware"),
        revenue_or_transactions("DC", "District of Columbia", 100_000.0, 200, false),
        revenue_only("FL", "Florida", 100_000.0, true),
        revenue_or_transactions("GA", "Georgia", 100_000.0, 200, false),
        revenue_or_transactions("HI", "Hawaii", 100_000.0, 200, false),
        revenue_only("ID", "Idaho", 100_000.0, true),
        revenue_or_transactions("IL", "Illinois", 100_000.0, 200, false),
        revenue_only("IN", "Indiana", 100_000.0, true),
        revenue_only("IA", "Iowa", 100_000.0, true),
        revenue_only("KS", "Kansas", 100_000.0, true),
        revenue_or_transactions("KY", "Kentucky", 100_000.0, 200, true),
        revenue_only("LA", "Louisiana", 100_000.0, false),
        revenue_only("ME", "Maine", 100_000.0, false),
        revenue_or_transactions("MD", "Maryland", 100_000.0, 200, true),
        revenue_only("MA", "Massachusetts", 100_000.0, false),
        revenue_or_transactions("MI", "Michigan", 100_000.0, 200, false),
        revenue_or_transactions("MN", "Minnesota", 100_000.0, 200, false),
        revenue_only("MS", "Mississippi", 250_000.0, false),
        revenue_only("MO", "Missouri", 100_000.0, true),
        no_sales_tax("MT", "Montana"),
        revenue_or_transactions("NE", "Nebraska", 100_000.0, 200, true),
        revenue_or_transactions("NV", "Nevada", 100_000.0, 200, true),
        no_sales_tax("NH", "New Hampshire"),
        revenue_or_transactions("NJ", "New Jersey", 100_000.0, 200, true),
        revenue_only("NM", "New Mexico", 100_000.0, false),
        revenue_and_transactions("NY", "New York", 500_000.0, 100, false),
        revenue_only("NC", "North Carolina", 100_000.0, false),
        revenue_only("ND", "North Dakota", 100_000.0, false),
        revenue_or_transactions("OH", "Ohio", 100_000.0, 200, false),
        revenue_only("OK", "Oklahoma", 100_000.0, true),
        no_sales_tax("OR", "Oregon"),
        revenue_only("PA", "Pennsylvania", 100_000.0, false),
        revenue_or_transactions("RI", "Rhode Island", 100_000.0, 200, false),
        revenue_only("SC", "South Carolina", 100_000.0, true),
        revenue_only("SD", "South Dakota", 100_000.0, true),
        revenue_only("TN", "Tennessee", 100_000.0, true),
        revenue_only("TX", "Texas", 500_000.0, false),
        revenue_only("UT", "Utah", 100_000.0, true),
        revenue_or_transactions("VT", "Vermont", 100_000.0, 200, false),
        revenue_or_transactions("VA", "Virginia", 100_000.0, 200, true),
        revenue_only("WA", "Washington", 100_000.0, false),
        revenue_or_transactions("WV", "West Virginia", 100_000.0, 200, false),
        revenue_only("WI", "Wisconsin", 100_000.0, true),
        revenue_only("WY", "Wyoming", 100_000.0, true),
    ]
}
