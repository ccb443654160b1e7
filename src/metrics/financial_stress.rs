//! Financial stress risk
//!
//! Ratio of input cost to loan amount, as a percentage. Storage access lets
//! the farmer hold produce instead of selling into a slump, so it relieves
//! the score by 15%.

use super::{FactorScaling, ScoreBounds};
use crate::utils::FarmInputs;

/// Calculate financial risk
///
/// `inputs.loan_amount` is guaranteed ≥ 1 by normalization, so the division
/// is always well defined.
pub fn calculate_financial(inputs: &FarmInputs, scaling: &FactorScaling, bounds: &ScoreBounds) -> f64 {
    let cost_ratio = inputs.input_cost / inputs.loan_amount;
    let mut financial = bounds.clamp(cost_ratio * scaling.financial_per_cost_ratio);

    if inputs.storage_access {
        financial = bounds.clamp(financial * scaling.storage_relief);
    }

    financial
}
