//! Pest pressure risk
//!
//! Abnormal rainfall favors outbreaks, and the model's distress probability
//! is folded in as a proxy for general crop stress:
//! pest = |rainfall deviation| × 1.5 + ml_probability × 0.4.

use super::{FactorScaling, ScoreBounds};
use crate::utils::FarmInputs;

/// Calculate pest risk
///
/// # Arguments
/// * `ml_probability` - Model probability (0-100), already rounded to 2 decimals
pub fn calculate_pest(
    inputs: &FarmInputs,
    ml_probability: f64,
    scaling: &FactorScaling,
    bounds: &ScoreBounds,
) -> f64 {
    bounds.clamp(
        inputs.rainfall_deviation.abs() * scaling.pest_per_rainfall
            + ml_probability * scaling.pest_per_ml_point,
    )
}
