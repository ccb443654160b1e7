//! Risk factor modules for farm scoring
//!
//! Each of the five risk sub-scores is implemented in its own module. All of
//! them return a value already clamped into the policy's score bounds
//! (default [5, 100]).

pub mod weather_exposure;
pub mod market_volatility;
pub mod financial_stress;
pub mod pest_pressure;
pub mod soil_instability;

// Re-export factor functions
pub use weather_exposure::calculate_weather;
pub use market_volatility::calculate_market;
pub use financial_stress::calculate_financial;
pub use pest_pressure::calculate_pest;
pub use soil_instability::calculate_soil;

use crate::utils::FarmInputs;
use serde::{Deserialize, Serialize};

/// The five risk factors, in tie-break priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Weather,
    Market,
    Financial,
    Pest,
    Soil,
}

impl Factor {
    /// Fixed priority order; earlier factors win ties
    pub const ALL: [Factor; 5] = [
        Factor::Weather,
        Factor::Market,
        Factor::Financial,
        Factor::Pest,
        Factor::Soil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Weather => "weather",
            Factor::Market => "market",
            Factor::Financial => "financial",
            Factor::Pest => "pest",
            Factor::Soil => "soil",
        }
    }
}

/// Lower and upper bound for every sub-score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub floor: f64,
    pub cap: f64,
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self {
            floor: 5.0,
            cap: 100.0,
        }
    }
}

impl ScoreBounds {
    /// Clamp into [floor, cap]
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.floor).min(self.cap)
    }
}

/// Scale factors turning raw inputs into sub-scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorScaling {
    /// weather = |rainfall deviation| × this
    pub weather_per_rainfall: f64,
    /// market = |market volatility| × this
    pub market_per_volatility: f64,
    /// financial = input cost / loan amount × this
    pub financial_per_cost_ratio: f64,
    /// Financial multiplier when the farm has storage access
    pub storage_relief: f64,
    /// Market multiplier when income is unstable
    pub income_instability: f64,
    pub pest_per_rainfall: f64,
    pub pest_per_ml_point: f64,
    pub soil_per_rainfall: f64,
}

impl Default for FactorScaling {
    fn default() -> Self {
        Self {
            weather_per_rainfall: 2.0,
            market_per_volatility: 120.0,
            financial_per_cost_ratio: 100.0,
            storage_relief: 0.85,
            income_instability: 1.1,
            pest_per_rainfall: 1.5,
            pest_per_ml_point: 0.4,
            soil_per_rainfall: 1.2,
        }
    }
}

/// Five risk sub-scores plus the model probability they were computed with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub weather: f64,
    pub market: f64,
    pub financial: f64,
    pub pest: f64,
    pub soil: f64,
    /// Model probability (0-100), not a sub-score
    pub ml_probability: f64,
}

impl RiskBreakdown {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Weather => self.weather,
            Factor::Market => self.market,
            Factor::Financial => self.financial,
            Factor::Pest => self.pest,
            Factor::Soil => self.soil,
        }
    }

    pub fn get_mut(&mut self, factor: Factor) -> &mut f64 {
        match factor {
            Factor::Weather => &mut self.weather,
            Factor::Market => &mut self.market,
            Factor::Financial => &mut self.financial,
            Factor::Pest => &mut self.pest,
            Factor::Soil => &mut self.soil,
        }
    }

    /// Clamp every sub-score into bounds (ml_probability untouched)
    pub fn clamp_scores(&mut self, bounds: &ScoreBounds) {
        for factor in Factor::ALL {
            let value = self.get_mut(factor);
            *value = bounds.clamp(*value);
        }
    }

    /// Copy with sub-scores rounded for display
    pub fn rounded(&self, decimals: i32) -> Self {
        let mut copy = *self;
        for factor in Factor::ALL {
            let value = copy.get_mut(factor);
            *value = crate::utils::round_to(*value, decimals);
        }
        copy
    }
}

/// Compute all five raw sub-scores (before contextual adjustment)
pub fn calculate_factors(
    inputs: &FarmInputs,
    ml_probability: f64,
    scaling: &FactorScaling,
    bounds: &ScoreBounds,
) -> RiskBreakdown {
    RiskBreakdown {
        weather: calculate_weather(inputs, scaling, bounds),
        market: calculate_market(inputs, scaling, bounds),
        financial: calculate_financial(inputs, scaling, bounds),
        pest: calculate_pest(inputs, ml_probability, scaling, bounds),
        soil: calculate_soil(inputs, scaling, bounds),
        ml_probability,
    }
}
