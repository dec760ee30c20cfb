//! Economic nexus evaluation: threshold rules, per-jurisdiction risk
//! classification, growth scenarios, and the report/export surfaces built on
//! top of them.

pub mod domain;
pub mod evaluation;
pub mod export;
pub mod import;
pub mod reference;
pub mod report;
mod scenario;

pub use domain::{
    Jurisdiction, JurisdictionCode, JurisdictionRule, NexusError, RiskLevel, SalesLedger,
    SalesRecord, ThresholdType, Trigger,
};
pub use evaluation::{
    evaluate_thresholds, EvaluationResult, NexusEngine, RuleAnomaly, ThresholdOutcome,
};
pub use import::{SalesImportError, SalesImporter};
pub use reference::{JurisdictionTable, ReferenceTableError};
pub use report::{summarize, NexusReport, NexusSummary};
pub use scenario::{growth_factor, project_ledger, EvaluationSet, ScenarioComparison};
