use super::super::domain::RiskLevel;

/// Percent-of-threshold at or above which nexus is considered imminent.
pub const IMMINENT_PERCENT: f64 = 90.0;
/// Percent-of-threshold at or above which a jurisdiction is monitored.
pub const MONITORING_PERCENT: f64 = 70.0;

/// Established nexus overrides every percentage tier.
pub(crate) fn classify_risk(has_nexus: bool, percent_complete: f64) -> RiskLevel {
    if has_nexus {
        RiskLevel::NexusEstablished
    } else if percent_complete >= IMMINENT_PERCENT {
        RiskLevel::NexusImminent
    } else if percent_complete >= MONITORING_PERCENT {
        RiskLevel::Monitoring
    } else {
        RiskLevel::NoNexus
    }
}

pub(crate) fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
