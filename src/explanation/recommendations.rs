//! Recommendation Engine
//!
//! Builds an ordered list of advice strings. Each condition is tested
//! independently and contributes one or two fixed lines; when nothing
//! fires the list holds only the stable-conditions message.

use crate::explanation::alerts::CRITICAL_SCORE;
use crate::metrics::{Factor, RiskBreakdown};
use crate::utils::{FarmInputs, Region, WaterSource};

pub const STABLE_CONDITIONS: &str =
    "Farm conditions are stable. Continue current management practices.";

const FACTOR_ADVICE: &[(Factor, f64, &[&str])] = &[
    (
        Factor::Weather,
        70.0,
        &[
            "Adopt climate-resilient crop varieties.",
            "Implement water harvesting or drip irrigation systems.",
        ],
    ),
    (
        Factor::Financial,
        70.0,
        &[
            "Reassess input costs and explore government subsidy programs.",
            "Consider restructuring loan repayment schedules.",
        ],
    ),
    (
        Factor::Market,
        70.0,
        &[
            "Utilize storage facilities to avoid distress selling.",
            "Explore contract farming or forward price agreements.",
        ],
    ),
    (
        Factor::Pest,
        75.0,
        &[
            "Adopt Integrated Pest Management (IPM) practices.",
            "Increase pest surveillance and early detection.",
        ],
    ),
    (
        Factor::Soil,
        75.0,
        &[
            "Conduct soil health testing and nutrient profiling.",
            "Adopt crop rotation and organic soil conditioning.",
        ],
    ),
];

/// Generate recommendations
pub fn generate_recommendations(
    final_score: f64,
    breakdown: &RiskBreakdown,
    inputs: &FarmInputs,
) -> Vec<String> {
    let mut advice: Vec<&str> = Vec::new();

    if final_score > CRITICAL_SCORE {
        advice.push(
            "Immediate strategic intervention required to prevent severe financial distress.",
        );
    }

    for (factor, above, lines) in FACTOR_ADVICE {
        if breakdown.get(*factor) > *above {
            advice.extend_from_slice(lines);
        }
    }

    match inputs.region {
        Region::Dryland => advice.push("Consider drought-resistant crop alternatives."),
        Region::Coastal => {
            advice.push("Develop contingency planning for extreme weather events.")
        }
        Region::Normal => {}
    }

    if inputs.water_source == WaterSource::Rainfed {
        advice.push("Improve irrigation reliability to reduce rainfall dependency.");
    }

    if !inputs.insured {
        advice.push("Enroll in crop insurance schemes to buffer financial shocks.");
    }

    if advice.is_empty() {
        advice.push(STABLE_CONDITIONS);
    }

    advice.into_iter().map(str::to_string).collect()
}
