//! Risk Policy
//!
//! Every constant of the heuristic engine and the ML blend, held as data:
//! factor scaling, score bounds, context rules, season weights, blend shares
//! and level thresholds. `RiskPolicy::default()` is the production policy;
//! a JSON file can override any subset of sections.

use crate::context::ContextRule;
use crate::metrics::{FactorScaling, ScoreBounds};
use crate::seasonal::{BlendPolicy, LevelThresholds, SeasonWeightTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Complete scoring policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    pub bounds: ScoreBounds,
    pub factors: FactorScaling,
    pub context_rules: Vec<ContextRule>,
    pub season_weights: SeasonWeightTable,
    pub blend: BlendPolicy,
    pub levels: LevelThresholds,
}

impl Default for RiskPolicy {
    fn default() -> Self {
        Self {
            bounds: ScoreBounds::default(),
            factors: FactorScaling::default(),
            context_rules: ContextRule::default_rules(),
            season_weights: SeasonWeightTable::default(),
            blend: BlendPolicy::default(),
            levels: LevelThresholds::default(),
        }
    }
}

impl RiskPolicy {
    /// Load policy from JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read policy file: {:?}", path))?;

        let policy: RiskPolicy = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse policy JSON")?;

        policy
            .validate()
            .with_context(|| format!("Invalid policy in {:?}", path))?;

        tracing::info!(
            "Loaded risk policy ({} context rules)",
            policy.context_rules.len()
        );
        Ok(policy)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.bounds.floor < self.bounds.cap) {
            anyhow::bail!(
                "Score floor {} must be below cap {}",
                self.bounds.floor,
                self.bounds.cap
            );
        }

        for (season, weights) in self.season_weights.iter() {
            let sum = weights.sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                anyhow::bail!("{} weights sum to {}, expected 1.0", season.as_str(), sum);
            }
        }

        if self.levels.moderate_from > self.levels.high_above {
            anyhow::bail!(
                "MODERATE threshold {} is above HIGH threshold {}",
                self.levels.moderate_from,
                self.levels.high_above
            );
        }

        if let Some(rule) = self
            .context_rules
            .iter()
            .find(|r| r.multipliers.iter().any(|m| !(m.by.is_finite() && m.by >= 0.0)))
        {
            anyhow::bail!("Context rule '{}' has an invalid multiplier", rule.note);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        RiskPolicy::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let policy: RiskPolicy =
            serde_json::from_str(r#"{"levels": {"high_above": 80.0, "moderate_from": 50.0}}"#)
                .unwrap();

        assert_eq!(policy.levels.high_above, 80.0);
        assert_eq!(policy.context_rules, ContextRule::default_rules());
        assert_eq!(policy.blend, BlendPolicy::default());
    }

    #[test]
    fn test_rejects_bad_weights() {
        let mut policy = RiskPolicy::default();
        policy.season_weights.harvest.market = 0.9;
        let err = policy.validate().unwrap_err();
        assert!(err.to_string().contains("HARVEST"));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let mut policy = RiskPolicy::default();
        policy.bounds.floor = 100.0;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_roundtrip_full_policy() {
        let policy = RiskPolicy::default();
        let json = serde_json::to_string_pretty(&policy).unwrap();
        let back: RiskPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }
}
