//! Error types for the scoring pipeline
//!
//! Everything upstream of the model call is infallible: malformed numbers,
//! missing fields and unknown categories all collapse to defaults. The only
//! failures that reach a caller come from the model collaborator.

use thiserror::Error;

/// Failure raised by a probability model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model expects {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("model returned an unusable probability: {0}")]
    OutOfRange(f64),

    #[error("model invocation failed: {0}")]
    Invocation(String),
}

/// Failure of a scoring request
///
/// No partial result is ever produced alongside one of these.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("feature order lists {order} names but the model takes {model} inputs")]
    FeatureOrderMismatch { order: usize, model: usize },

    #[error("invalid risk policy: {0}")]
    InvalidPolicy(String),
}
