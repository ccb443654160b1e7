//! Risk Scorer - Main coordinator for scoring farms
//!
//! Runs the pipeline: normalization → risk factors → contextual adjustment
//! → seasonal blend → explanation. Holds the loaded model, the feature order
//! and the policy, all passed in at construction. Scoring itself never
//! mutates the scorer, so one instance can serve any number of threads.

use crate::config::ServiceConfig;
use crate::context::{apply_context, AdjustmentLog};
use crate::error::ScoringError;
use crate::explanation::{Alert, ExplanationGenerator};
use crate::metrics::{calculate_factors, RiskBreakdown};
use crate::model::{validate_probability, FeatureOrder, LogisticModel, ProbabilityModel};
use crate::policy::RiskPolicy;
use crate::seasonal::{blend, RiskLevel};
use crate::utils::{assemble_features, round_to, FarmInputs, RawPayload, Season};
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Decimals kept for the model probability
const PROBABILITY_DECIMALS: i32 = 2;
/// Decimals shown for breakdown sub-scores
const BREAKDOWN_DECIMALS: i32 = 1;

/// Main farm risk scorer
pub struct RiskScorer {
    policy: RiskPolicy,
    model: Box<dyn ProbabilityModel>,
    feature_order: FeatureOrder,
}

/// Scoring result for one farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Final score in [0, 100], 2 decimals
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    /// Adjusted sub-scores, 1 decimal
    pub breakdown: RiskBreakdown,
    pub summary: String,
    pub season: Season,
    pub adjustments: AdjustmentLog,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<String>,
}

impl RiskScorer {
    /// Build a scorer from already-loaded parts
    ///
    /// Fails if the policy is inconsistent or if the model declares an input
    /// count that disagrees with the feature order.
    pub fn new(
        policy: RiskPolicy,
        model: Box<dyn ProbabilityModel>,
        feature_order: FeatureOrder,
    ) -> Result<Self, ScoringError> {
        policy
            .validate()
            .map_err(|e| ScoringError::InvalidPolicy(e.to_string()))?;

        if let Some(inputs) = model.input_count() {
            if inputs != feature_order.len() {
                return Err(ScoringError::FeatureOrderMismatch {
                    order: feature_order.len(),
                    model: inputs,
                });
            }
        }

        Ok(Self {
            policy,
            model,
            feature_order,
        })
    }

    /// Load model, feature order and policy from the service configuration
    pub fn load(config: &ServiceConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing risk scorer...");

        let feature_order = FeatureOrder::load(&config.feature_order_path())?;
        let model = LogisticModel::load(&config.model_path())?;

        let policy = match &config.policy_path {
            Some(path) => RiskPolicy::load(path)?,
            None => {
                tracing::info!("No policy file configured - using built-in policy");
                RiskPolicy::default()
            }
        };

        let scorer = Self::new(policy, Box::new(model), feature_order)
            .with_context(|| "Model and feature order do not agree")?;

        tracing::info!(
            "Risk scorer initialized: model={}, features={}",
            scorer.model_name(),
            scorer.feature_order.len()
        );
        Ok(scorer)
    }

    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    pub fn feature_order(&self) -> &FeatureOrder {
        &self.feature_order
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Query the model for this payload, rounded to 2 decimals
    pub fn ml_probability(&self, payload: &RawPayload) -> Result<f64, ScoringError> {
        let features = assemble_features(payload, self.feature_order.names());
        let probability = validate_probability(self.model.probability(&features)?)?;
        Ok(round_to(probability, PROBABILITY_DECIMALS))
    }

    /// Score one request payload
    pub fn score(&self, payload: &RawPayload) -> Result<ScoreResult, ScoringError> {
        let ml_probability = self.ml_probability(payload)?;
        let inputs = FarmInputs::from_payload(payload);
        Ok(self.score_inputs(&inputs, ml_probability))
    }

    /// Run the heuristic pipeline for normalized inputs and a known probability
    pub fn score_inputs(&self, inputs: &FarmInputs, ml_probability: f64) -> ScoreResult {
        let policy = &self.policy;

        let raw = calculate_factors(inputs, ml_probability, &policy.factors, &policy.bounds);
        tracing::debug!(?raw, "Raw risk factors");

        let adjusted = apply_context(raw, inputs, &policy.context_rules, &policy.bounds);
        tracing::debug!(
            breakdown = ?adjusted.breakdown,
            insurance_buffer = adjusted.insurance_buffer,
            "Context adjusted"
        );

        let mut log = adjusted.log;
        let outcome = blend(
            &adjusted.breakdown,
            inputs,
            adjusted.insurance_buffer,
            &policy.season_weights,
            &policy.blend,
            &policy.levels,
            &mut log,
        );
        tracing::debug!(
            weighted = outcome.weighted_score,
            final_score = outcome.final_score,
            level = outcome.risk_level.as_str(),
            "Seasonal blend"
        );

        let explanation =
            ExplanationGenerator::generate(outcome.final_score, &adjusted.breakdown, inputs);

        ScoreResult {
            risk_score: outcome.final_score,
            risk_level: outcome.risk_level,
            breakdown: adjusted.breakdown.rounded(BREAKDOWN_DECIMALS),
            summary: explanation.summary,
            season: inputs.season,
            adjustments: log,
            alerts: explanation.alerts,
            recommendations: explanation.recommendations,
        }
    }

    /// Score many payloads IN PARALLEL
    ///
    /// Output order matches input order; a failing payload yields an error
    /// in its slot without affecting the others.
    pub fn score_batch(&self, payloads: &[RawPayload]) -> Vec<Result<ScoreResult, ScoringError>> {
        payloads.par_iter().map(|p| self.score(p)).collect()
    }
}
