//! Alert Engine
//!
//! Alerts are evaluated independently against fixed thresholds; any subset
//! may fire and the output order always follows the rule tables below. The
//! overall-score alert comes first and is either critical or a warning,
//! never both.

use crate::explanation::types::{Alert, AlertKind};
use crate::metrics::{Factor, RiskBreakdown};

/// Final score strictly above this → critical alert
pub const CRITICAL_SCORE: f64 = 75.0;
/// Final score at or above this (and not critical) → warning
pub const WARNING_SCORE: f64 = 40.0;

/// Sub-score alert: fires when the factor is strictly above `above`
struct FactorAlertRule {
    factor: Factor,
    above: f64,
    kind: AlertKind,
    title: &'static str,
    message: &'static str,
}

const FACTOR_ALERTS: &[FactorAlertRule] = &[
    FactorAlertRule {
        factor: Factor::Weather,
        above: 70.0,
        kind: AlertKind::Warning,
        title: "Weather Vulnerability",
        message: "High rainfall variability exposure.",
    },
    FactorAlertRule {
        factor: Factor::Financial,
        above: 70.0,
        kind: AlertKind::Critical,
        title: "Financial Stress",
        message: "High input cost relative to loan amount.",
    },
    FactorAlertRule {
        factor: Factor::Market,
        above: 70.0,
        kind: AlertKind::Warning,
        title: "Market Volatility",
        message: "Significant market price instability detected.",
    },
    FactorAlertRule {
        factor: Factor::Pest,
        above: 75.0,
        kind: AlertKind::Warning,
        title: "Pest Exposure",
        message: "Elevated pest outbreak probability.",
    },
    FactorAlertRule {
        factor: Factor::Soil,
        above: 75.0,
        kind: AlertKind::Warning,
        title: "Soil Instability",
        message: "Soil variability contributing to yield risk.",
    },
];

/// Generate alerts for a final score and its adjusted breakdown
pub fn generate_alerts(final_score: f64, breakdown: &RiskBreakdown) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if final_score > CRITICAL_SCORE {
        alerts.push(Alert::new(
            AlertKind::Critical,
            "High Distress Risk",
            "Overall farm stability exceeds safe threshold.",
        ));
    } else if final_score >= WARNING_SCORE {
        alerts.push(Alert::new(
            AlertKind::Warning,
            "Moderate Risk Detected",
            "Farm exposed to elevated instability factors.",
        ));
    }

    alerts.extend(
        FACTOR_ALERTS
            .iter()
            .filter(|rule| breakdown.get(rule.factor) > rule.above)
            .map(|rule| Alert::new(rule.kind, rule.title, rule.message)),
    );

    alerts
}
