use super::{FactorScaling, ScoreBounds};
use crate::utils::FarmInputs;

/// Calculate soil risk: |rainfall deviation| × 1.2
pub fn calculate_soil(inputs: &FarmInputs, scaling: &FactorScaling, bounds: &ScoreBounds) -> f64 {
    bounds.clamp(inputs.rainfall_deviation.abs() * scaling.soil_per_rainfall)
}
