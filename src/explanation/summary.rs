use crate::metrics::{Factor, RiskBreakdown};

/// Factor with the highest adjusted sub-score
///
/// Ties go to the factor that comes first in `Factor::ALL`
/// (weather, market, financial, pest, soil).
pub fn dominant_driver(breakdown: &RiskBreakdown) -> Factor {
    let mut driver = Factor::ALL[0];
    for factor in Factor::ALL.into_iter().skip(1) {
        if breakdown.get(factor) > breakdown.get(driver) {
            driver = factor;
        }
    }
    driver
}

/// One-sentence summary for the dominant driver
pub fn summary_for(driver: Factor) -> &'static str {
    match driver {
        Factor::Weather => "Weather variability is the primary instability driver.",
        Factor::Market => "Market price volatility is heavily impacting stability.",
        Factor::Financial => "Loan-to-input ratio indicates financial stress exposure.",
        Factor::Pest => "Elevated pest exposure risk detected.",
        Factor::Soil => "Soil instability contributes to yield uncertainty.",
    }
}
