//! Utility modules for farm scoring
//!
//! Contains shared functionality used across the pipeline:
//! - Normalization: raw payload coercion into canonical farm inputs
//! - Rounding: fixed-decimal rounding for reported values

pub mod normalization;
pub mod rounding;

// Re-export commonly used types
pub use normalization::{
    assemble_features, coerce_feature, fields, safe_float, FarmInputs, RawPayload, RawValue,
    Region, Season, WaterSource,
};
pub use rounding::round_to;
