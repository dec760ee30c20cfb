pub mod config;
pub mod error;
pub mod nexus;
pub mod telemetry;
