//! Seasonal Blending
//!
//! Weights the adjusted sub-scores by season, blends the weighted composite
//! with the model probability, applies the insurance buffer and high-value
//! crop surcharge, and classifies the result.

use crate::context::AdjustmentLog;
use crate::metrics::{Factor, RiskBreakdown};
use crate::utils::{round_to, FarmInputs, Season};
use serde::{Deserialize, Serialize};

/// Per-factor weights for one season
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonWeights {
    pub weather: f64,
    pub market: f64,
    pub financial: f64,
    pub pest: f64,
    pub soil: f64,
}

impl SeasonWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Weather => self.weather,
            Factor::Market => self.market,
            Factor::Financial => self.financial,
            Factor::Pest => self.pest,
            Factor::Soil => self.soil,
        }
    }

    pub fn sum(&self) -> f64 {
        Factor::ALL.iter().map(|&f| self.get(f)).sum()
    }

    /// Σ sub-score × weight
    pub fn weighted_score(&self, breakdown: &RiskBreakdown) -> f64 {
        Factor::ALL
            .iter()
            .map(|&f| breakdown.get(f) * self.get(f))
            .sum()
    }
}

/// Weight vectors keyed by season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonWeightTable {
    pub monsoon: SeasonWeights,
    pub harvest: SeasonWeights,
    pub normal: SeasonWeights,
}

impl Default for SeasonWeightTable {
    fn default() -> Self {
        Self {
            monsoon: SeasonWeights {
                weather: 0.50,
                market: 0.15,
                financial: 0.15,
                pest: 0.10,
                soil: 0.10,
            },
            harvest: SeasonWeights {
                weather: 0.15,
                market: 0.50,
                financial: 0.15,
                pest: 0.10,
                soil: 0.10,
            },
            normal: SeasonWeights {
                weather: 0.20,
                market: 0.20,
                financial: 0.20,
                pest: 0.20,
                soil: 0.20,
            },
        }
    }
}

impl SeasonWeightTable {
    pub fn for_season(&self, season: Season) -> &SeasonWeights {
        match season {
            Season::Monsoon => &self.monsoon,
            Season::Harvest => &self.harvest,
            Season::Normal => &self.normal,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Season, &SeasonWeights)> {
        [Season::Monsoon, Season::Harvest, Season::Normal]
            .into_iter()
            .map(move |s| (s, self.for_season(s)))
    }
}

/// How the heuristic composite and the model probability are combined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendPolicy {
    pub heuristic_share: f64,
    pub ml_share: f64,
    /// Lower-case crop names that get the surcharge
    pub high_value_crops: Vec<String>,
    pub crop_surcharge: f64,
    pub crop_note: String,
}

impl Default for BlendPolicy {
    fn default() -> Self {
        Self {
            heuristic_share: 0.7,
            ml_share: 0.3,
            high_value_crops: vec!["strawberry".to_string(), "grapes".to_string()],
            crop_surcharge: 10.0,
            crop_note: "High-value crops increase market volatility exposure.".to_string(),
        }
    }
}

impl BlendPolicy {
    pub fn is_high_value(&self, crop_type: &str) -> bool {
        self.high_value_crops
            .iter()
            .any(|c| c.eq_ignore_ascii_case(crop_type))
    }
}

/// Score thresholds for risk levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    /// Strictly above → HIGH
    pub high_above: f64,
    /// At or above → MODERATE
    pub moderate_from: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            high_above: 70.0,
            moderate_from: 40.0,
        }
    }
}

/// Overall risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: f64, thresholds: &LevelThresholds) -> Self {
        match score {
            s if s > thresholds.high_above => RiskLevel::High,
            s if s >= thresholds.moderate_from => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }
}

/// Final blended score
#[derive(Debug, Clone, Copy)]
pub struct BlendOutcome {
    pub weighted_score: f64,
    /// Clamped to [0, 100], 2 decimals
    pub final_score: f64,
    pub risk_level: RiskLevel,
}

/// Blend adjusted sub-scores into the final score
///
/// Appends the crop surcharge note to `log` when it applies.
pub fn blend(
    adjusted: &RiskBreakdown,
    inputs: &FarmInputs,
    insurance_buffer: f64,
    weights: &SeasonWeightTable,
    policy: &BlendPolicy,
    levels: &LevelThresholds,
    log: &mut AdjustmentLog,
) -> BlendOutcome {
    let weighted_score = weights.for_season(inputs.season).weighted_score(adjusted);

    let mut final_score = weighted_score * policy.heuristic_share
        + adjusted.ml_probability * policy.ml_share
        - insurance_buffer;

    if policy.is_high_value(&inputs.crop_type) {
        final_score += policy.crop_surcharge;
        log.record(policy.crop_note.as_str());
    }

    let final_score = round_to(final_score.clamp(0.0, 100.0), 2);

    BlendOutcome {
        weighted_score,
        final_score,
        risk_level: RiskLevel::from_score(final_score, levels),
    }
}
