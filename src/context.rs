//! Contextual Adjustment
//!
//! Scales the raw sub-scores by farm context (region, water source,
//! insurance). Rules are an ordered list of (condition, effect) records held
//! as data in `RiskPolicy`; they are evaluated in list order, several may
//! fire, and each firing rule appends its note to the adjustment log.

use crate::metrics::{Factor, RiskBreakdown, ScoreBounds};
use crate::utils::{FarmInputs, Region, WaterSource};
use serde::{Deserialize, Serialize};

/// Ordered, append-only log of human-readable adjustment notes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjustmentLog(Vec<String>);

impl AdjustmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, note: impl Into<String>) {
        self.0.push(note.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// When a context rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContextCondition {
    Region(Region),
    WaterSource(WaterSource),
    Insured,
}

impl ContextCondition {
    pub fn matches(&self, inputs: &FarmInputs) -> bool {
        match self {
            ContextCondition::Region(region) => inputs.region == *region,
            ContextCondition::WaterSource(source) => inputs.water_source == *source,
            ContextCondition::Insured => inputs.insured,
        }
    }
}

/// Multiply one sub-score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorMultiplier {
    pub factor: Factor,
    pub by: f64,
}

/// One contextual rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRule {
    pub condition: ContextCondition,
    #[serde(default)]
    pub multipliers: Vec<FactorMultiplier>,
    /// Points subtracted from the final blended score when this rule fires
    #[serde(default)]
    pub insurance_buffer: f64,
    pub note: String,
}

impl ContextRule {
    fn new(condition: ContextCondition, multipliers: &[(Factor, f64)], note: &str) -> Self {
        Self {
            condition,
            multipliers: multipliers
                .iter()
                .map(|&(factor, by)| FactorMultiplier { factor, by })
                .collect(),
            insurance_buffer: 0.0,
            note: note.to_string(),
        }
    }

    /// Built-in rule set, in evaluation order
    pub fn default_rules() -> Vec<ContextRule> {
        use ContextCondition as C;
        use Factor::*;

        vec![
            Self::new(
                C::Region(Region::Coastal),
                &[(Weather, 1.15)],
                "Coastal region increases exposure to storm volatility.",
            ),
            Self::new(
                C::Region(Region::Dryland),
                &[(Soil, 1.20), (Financial, 1.10), (Pest, 1.15)],
                "Dryland region increases drought and pest pressure.",
            ),
            Self::new(
                C::WaterSource(WaterSource::Rainfed),
                &[(Weather, 1.25)],
                "Rainfed irrigation increases rainfall dependency.",
            ),
            Self::new(
                C::WaterSource(WaterSource::Canal),
                &[(Weather, 0.95)],
                "Canal irrigation stabilizes rainfall dependency.",
            ),
            Self::new(
                C::WaterSource(WaterSource::Drip),
                &[(Weather, 0.85), (Financial, 0.95)],
                "Drip irrigation improves efficiency and reduces risk.",
            ),
            ContextRule {
                insurance_buffer: 5.0,
                ..Self::new(
                    C::Insured,
                    &[(Financial, 0.80), (Market, 0.90)],
                    "Crop insurance provides financial protection.",
                )
            },
        ]
    }
}

/// Sub-scores after contextual adjustment
#[derive(Debug, Clone)]
pub struct ContextAdjustment {
    /// Clamped back into score bounds
    pub breakdown: RiskBreakdown,
    pub insurance_buffer: f64,
    pub log: AdjustmentLog,
}

/// Apply context rules to a raw breakdown
pub fn apply_context(
    raw: RiskBreakdown,
    inputs: &FarmInputs,
    rules: &[ContextRule],
    bounds: &ScoreBounds,
) -> ContextAdjustment {
    let mut breakdown = raw;
    let mut insurance_buffer = 0.0;
    let mut log = AdjustmentLog::new();

    for rule in rules.iter().filter(|r| r.condition.matches(inputs)) {
        for m in &rule.multipliers {
            *breakdown.get_mut(m.factor) *= m.by;
        }
        insurance_buffer += rule.insurance_buffer;
        log.record(rule.note.as_str());
    }

    breakdown.clamp_scores(bounds);

    ContextAdjustment {
        breakdown,
        insurance_buffer,
        log,
    }
}
