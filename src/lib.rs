//! Farm Distress Risk Scorer
//!
//! Blends a model-supplied distress probability with a multi-factor
//! heuristic engine and explains the result.
//!
//! Pipeline (each stage feeds only the next):
//! - `utils/`: Payload normalization into `FarmInputs`
//! - `metrics/`: Five risk sub-scores (weather, market, financial, pest, soil)
//! - `context`: Region, water-source and insurance adjustments
//! - `seasonal`: Season weighting, model blend, risk level
//! - `explanation/`: Dominant driver, summary, alerts, recommendations
//!
//! `scorer::RiskScorer` wires the stages together around a `ProbabilityModel`
//! and a `RiskPolicy`.

pub mod utils;
pub mod error;
pub mod metrics;
pub mod context;
pub mod seasonal;
pub mod explanation;
pub mod policy;
pub mod model;
pub mod config;
pub mod data;
pub mod scorer;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use utils::{FarmInputs, RawPayload, RawValue, Region, Season, WaterSource};
pub use error::{ModelError, ScoringError};
pub use metrics::{Factor, RiskBreakdown};
pub use context::AdjustmentLog;
pub use seasonal::RiskLevel;
pub use explanation::{Alert, AlertKind};
pub use policy::RiskPolicy;
pub use model::{ConstantModel, FeatureOrder, LogisticModel, ProbabilityModel};
pub use config::ServiceConfig;
pub use data::FarmData;
pub use scorer::{RiskScorer, ScoreResult};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
