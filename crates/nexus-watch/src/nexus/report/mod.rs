mod insights;
mod summary;
pub mod views;

pub use insights::JurisdictionInsight;
pub use summary::{summarize, NexusReport, NexusSummary};
