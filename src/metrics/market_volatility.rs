//! Market volatility risk
//!
//! Volatility is expressed as a fraction (0.25 = 25% price swing), so the
//! scale is steep: market = |volatility| × 120. Farms without a stable income
//! absorb price swings worse and get a 1.1× surcharge.

use super::{FactorScaling, ScoreBounds};
use crate::utils::FarmInputs;

/// Calculate market risk
pub fn calculate_market(inputs: &FarmInputs, scaling: &FactorScaling, bounds: &ScoreBounds) -> f64 {
    let mut market = bounds.clamp(inputs.market_volatility.abs() * scaling.market_per_volatility);

    if !inputs.income_stable {
        market = bounds.clamp(market * scaling.income_instability);
    }

    market
}
