//! Weather exposure risk
//!
//! Rainfall deviation in either direction (drought or flooding) raises the
//! score linearly: weather = |rainfall deviation| × 2.

use super::{FactorScaling, ScoreBounds};
use crate::utils::FarmInputs;

/// Calculate weather risk
pub fn calculate_weather(inputs: &FarmInputs, scaling: &FactorScaling, bounds: &ScoreBounds) -> f64 {
    bounds.clamp(inputs.rainfall_deviation.abs() * scaling.weather_per_rainfall)
}
