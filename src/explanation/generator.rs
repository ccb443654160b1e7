use crate::explanation::types::*;
use crate::explanation::{dominant_driver, generate_alerts, generate_recommendations, summary_for};
use crate::metrics::RiskBreakdown;
use crate::utils::FarmInputs;

/// Main explanation generator
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    /// Generate complete explanation for a scored farm
    ///
    /// Takes:
    /// - final_score: Blended, clamped and rounded final score
    /// - breakdown: Sub-scores after contextual adjustment (before weighting)
    /// - inputs: Normalized farm context (region, water source, insurance)
    ///
    /// Returns: Dominant driver, summary sentence, alerts and recommendations
    pub fn generate(final_score: f64, breakdown: &RiskBreakdown, inputs: &FarmInputs) -> Explanation {
        let driver = dominant_driver(breakdown);
        let alerts = generate_alerts(final_score, breakdown);
        let recommendations = generate_recommendations(final_score, breakdown, inputs);

        tracing::debug!(
            driver = driver.as_str(),
            alerts = alerts.len(),
            recommendations = recommendations.len(),
            "Explanation generated"
        );

        Explanation {
            dominant_driver: driver,
            summary: summary_for(driver).to_string(),
            alerts,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explanation::STABLE_CONDITIONS;
    use crate::metrics::test_support::calm_inputs;
    use crate::metrics::Factor;

    #[test]
    fn test_generate_weather_driven() {
        let breakdown = RiskBreakdown {
            weather: 100.0,
            market: 5.5,
            financial: 5.0,
            pest: 100.0,
            soil: 72.0,
            ml_probability: 80.0,
        };

        let explanation = ExplanationGenerator::generate(81.3, &breakdown, &calm_inputs());

        assert_eq!(explanation.dominant_driver, Factor::Weather);
        assert_eq!(
            explanation.summary,
            "Weather variability is the primary instability driver."
        );
        let titles: Vec<_> = explanation.alerts.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["High Distress Risk", "Weather Vulnerability", "Pest Exposure"]
        );
    }

    #[test]
    fn test_generate_calm() {
        let breakdown = RiskBreakdown {
            weather: 5.0,
            market: 5.0,
            financial: 5.0,
            pest: 5.0,
            soil: 5.0,
            ml_probability: 10.0,
        };
        let mut inputs = calm_inputs();
        inputs.insured = true;

        let explanation = ExplanationGenerator::generate(1.5, &breakdown, &inputs);

        assert_eq!(explanation.dominant_driver, Factor::Weather);
        assert!(explanation.alerts.is_empty());
        assert_eq!(explanation.recommendations, vec![STABLE_CONDITIONS.to_string()]);
    }
}
