//! Probability Model Collaborator
//!
//! The distress classifier is a black box reached through `ProbabilityModel`.
//! The feature vector it receives is positional, ordered by `FeatureOrder`,
//! which the service loads once at startup alongside the model.
//!
//! `LogisticModel` is the concrete implementation shipped with the service:
//! an intercept plus one coefficient per feature, read from JSON.

use crate::error::ModelError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Distress probability model
pub trait ProbabilityModel: Send + Sync {
    /// Probability of distress as a percentage in [0, 100]
    fn probability(&self, features: &[f64]) -> Result<f64, ModelError>;

    /// Number of positional inputs, if the model knows it
    fn input_count(&self) -> Option<usize> {
        None
    }

    fn name(&self) -> &str;
}

/// Check a model output is a usable percentage
pub fn validate_probability(value: f64) -> Result<f64, ModelError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ModelError::OutOfRange(value))
    }
}

/// Ordered list of model feature names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureOrder(Vec<String>);

impl FeatureOrder {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    /// Parse one feature name per line; blank lines are skipped
    pub fn parse(contents: &str) -> Self {
        Self(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Load from a text file (one feature name per line)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read feature order file: {:?}", path))?;

        let order = Self::parse(&contents);
        if order.is_empty() {
            anyhow::bail!("Feature order file {:?} lists no features", path);
        }

        tracing::info!("Loaded feature order ({} features)", order.len());
        Ok(order)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Logistic regression: 100 × sigmoid(intercept + Σ coefᵢ·xᵢ)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LogisticModel {
    /// Load coefficients from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file: {:?}", path))?;

        let model: LogisticModel = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse model JSON")?;

        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            anyhow::bail!("Model file {:?} contains non-finite coefficients", path);
        }

        tracing::info!("Loaded logistic model ({} coefficients)", model.coefficients.len());
        Ok(model)
    }
}

impl ProbabilityModel for LogisticModel {
    fn probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                got: features.len(),
            });
        }

        let logit: f64 = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>();

        validate_probability(100.0 / (1.0 + (-logit).exp()))
    }

    fn input_count(&self) -> Option<usize> {
        Some(self.coefficients.len())
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

/// Model returning a fixed probability, for tests and dry runs
#[derive(Debug, Clone, Copy)]
pub struct ConstantModel(pub f64);

impl ProbabilityModel for ConstantModel {
    fn probability(&self, _features: &[f64]) -> Result<f64, ModelError> {
        validate_probability(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}
