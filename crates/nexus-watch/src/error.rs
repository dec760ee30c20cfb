use crate::config::ConfigError;
use crate::nexus::export::ExportError;
use crate::nexus::{NexusError, ReferenceTableError, SalesImportError};
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    ReferenceTable(ReferenceTableError),
    SalesImport(SalesImportError),
    Export(ExportError),
    Nexus(NexusError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::ReferenceTable(err) => write!(f, "reference table error: {}", err),
            AppError::SalesImport(err) => write!(f, "sales import error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::Nexus(err) => write!(f, "evaluation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::ReferenceTable(err) => Some(err),
            AppError::SalesImport(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Nexus(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ReferenceTableError> for AppError {
    fn from(value: ReferenceTableError) -> Self {
        Self::ReferenceTable(value)
    }
}

impl From<SalesImportError> for AppError {
    fn from(value: SalesImportError) -> Self {
        Self::SalesImport(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<NexusError> for AppError {
    fn from(value: NexusError) -> Self {
        Self::Nexus(value)
    }
}
