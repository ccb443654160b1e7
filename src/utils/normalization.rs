//! Input Normalization
//!
//! Converts a raw request payload (field name → string/number/missing) into
//! canonical `FarmInputs` and into the positional feature vector the
//! probability model consumes.
//!
//! Nothing here fails: unparseable numbers become 0.0 and unknown categories
//! fall back to their defaults.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Payload field names
pub mod fields {
    pub const SEASON: &str = "Season";
    pub const CROP_TYPE: &str = "Crop_Type";
    pub const REGION: &str = "Region";
    pub const WATER_SOURCE: &str = "Water_Source";
    pub const INSURANCE: &str = "Insurance";
    pub const RAINFALL_DEVIATION: &str = "Rainfall_Deviation";
    pub const MARKET_VOLATILITY: &str = "Market_Volatility";
    pub const INPUT_COST: &str = "Input_Cost";
    pub const LOAN_AMOUNT: &str = "Loan_Amount";
    pub const STORAGE_ACCESS: &str = "Storage_Access";
    pub const INCOME_STABILITY: &str = "Income_Stability";
}

/// A single raw field value as received from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Flat request payload: field name → raw value
pub type RawPayload = FxHashMap<String, RawValue>;

/// Convert a raw value to f64, returning 0.0 for anything unusable
///
/// Empty strings, missing values, non-numeric text and non-finite parses
/// (`NaN`, `inf`) all become 0.0. Booleans become 1.0/0.0.
pub fn safe_float(value: Option<&RawValue>) -> f64 {
    let parsed = match value {
        Some(RawValue::Number(n)) => *n,
        Some(RawValue::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(RawValue::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(RawValue::Null) | None => 0.0,
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Coerce a value the way model features are encoded
///
/// "Yes"/"Stable" → 1.0, "No"/"Unstable" → 0.0, everything else goes
/// through `safe_float`.
pub fn coerce_feature(value: Option<&RawValue>) -> f64 {
    if let Some(RawValue::Text(s)) = value {
        match s.trim() {
            "Yes" | "Stable" => return 1.0,
            "No" | "Unstable" => return 0.0,
            _ => {}
        }
    }
    safe_float(value)
}

/// Build the model input vector in the exact order of `feature_order`
///
/// Missing fields contribute 0.0.
pub fn assemble_features(payload: &RawPayload, feature_order: &[String]) -> Vec<f64> {
    feature_order
        .iter()
        .map(|name| coerce_feature(payload.get(name)))
        .collect()
}

/// Text content of a field, if it is a non-empty string
fn text_field<'a>(payload: &'a RawPayload, name: &str) -> Option<&'a str> {
    match payload.get(name) {
        Some(RawValue::Text(s)) if !s.trim().is_empty() => Some(s.trim()),
        _ => None,
    }
}

/// Farm region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Normal,
    Coastal,
    Dryland,
}

impl Region {
    /// Case-insensitive parse; anything unrecognized is `Normal`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("coastal") => Region::Coastal,
            Some("dryland") => Region::Dryland,
            _ => Region::Normal,
        }
    }
}

/// Irrigation water source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterSource {
    Rainfed,
    Canal,
    Drip,
    Other,
}

impl WaterSource {
    /// Case-insensitive parse
    ///
    /// A missing value means `Rainfed`; a value that is present but unknown
    /// (borewell, tank, ...) is `Other`, which no adjustment rule targets.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return WaterSource::Rainfed;
        };
        match raw.to_ascii_lowercase().as_str() {
            "rainfed" => WaterSource::Rainfed,
            "canal" => WaterSource::Canal,
            "drip" => WaterSource::Drip,
            _ => WaterSource::Other,
        }
    }
}

/// Growing season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Season {
    Normal,
    Monsoon,
    Harvest,
}

impl Season {
    /// Case-insensitive parse; anything unrecognized is `Normal`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_uppercase).as_deref() {
            Some("MONSOON") => Season::Monsoon,
            Some("HARVEST") => Season::Harvest,
            _ => Season::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Normal => "NORMAL",
            Season::Monsoon => "MONSOON",
            Season::Harvest => "HARVEST",
        }
    }
}

/// Canonical farm inputs for one request
#[derive(Debug, Clone, PartialEq)]
pub struct FarmInputs {
    pub rainfall_deviation: f64,
    pub market_volatility: f64,
    pub input_cost: f64,
    /// Always ≥ 1
    pub loan_amount: f64,
    pub storage_access: bool,
    pub income_stable: bool,
    pub region: Region,
    pub water_source: WaterSource,
    pub insured: bool,
    /// Trimmed and lower-cased
    pub crop_type: String,
    pub season: Season,
}

impl FarmInputs {
    /// Normalize a raw payload
    pub fn from_payload(payload: &RawPayload) -> Self {
        let flag = |name: &str| coerce_feature(payload.get(name)) == 1.0;

        let mut loan_amount = safe_float(payload.get(fields::LOAN_AMOUNT));
        if loan_amount <= 0.0 {
            loan_amount = 1.0;
        }

        Self {
            rainfall_deviation: safe_float(payload.get(fields::RAINFALL_DEVIATION)),
            market_volatility: safe_float(payload.get(fields::MARKET_VOLATILITY)),
            input_cost: safe_float(payload.get(fields::INPUT_COST)),
            loan_amount,
            storage_access: flag(fields::STORAGE_ACCESS),
            income_stable: flag(fields::INCOME_STABILITY),
            region: Region::parse(text_field(payload, fields::REGION)),
            water_source: WaterSource::parse(text_field(payload, fields::WATER_SOURCE)),
            insured: flag(fields::INSURANCE),
            crop_type: text_field(payload, fields::CROP_TYPE)
                .map(str::to_lowercase)
                .unwrap_or_default(),
            season: Season::parse(text_field(payload, fields::SEASON)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn payload(entries: &[(&str, RawValue)]) -> RawPayload {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_safe_float_absorbs_garbage() {
        assert_eq!(safe_float(None), 0.0);
        assert_eq!(safe_float(Some(&RawValue::Null)), 0.0);
        assert_eq!(safe_float(Some(&"".into())), 0.0);
        assert_eq!(safe_float(Some(&"abc".into())), 0.0);
        assert_eq!(safe_float(Some(&"NaN".into())), 0.0);
        assert_eq!(safe_float(Some(&"inf".into())), 0.0);
        assert_relative_eq!(safe_float(Some(&" 12.5 ".into())), 12.5);
        assert_relative_eq!(safe_float(Some(&RawValue::Number(-3.0))), -3.0);
        assert_eq!(safe_float(Some(&RawValue::Bool(true))), 1.0);
    }

    #[test]
    fn test_coerce_feature_categoricals() {
        assert_eq!(coerce_feature(Some(&"Yes".into())), 1.0);
        assert_eq!(coerce_feature(Some(&"Stable".into())), 1.0);
        assert_eq!(coerce_feature(Some(&"No".into())), 0.0);
        assert_eq!(coerce_feature(Some(&"Unstable".into())), 0.0);
        assert_eq!(coerce_feature(Some(&"Dryland".into())), 0.0);
        assert_eq!(coerce_feature(Some(&"7".into())), 7.0);
    }

    #[test]
    fn test_assemble_features_preserves_order() {
        let p = payload(&[
            ("b", RawValue::Number(2.0)),
            ("a", "Yes".into()),
            ("c", "junk".into()),
        ]);
        let order = vec![
            "c".to_string(),
            "a".to_string(),
            "missing".to_string(),
            "b".to_string(),
        ];

        assert_eq!(assemble_features(&p, &order), vec![0.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn test_loan_amount_floor() {
        for raw in [RawValue::Number(0.0), RawValue::Number(-500.0), "".into()] {
            let inputs = FarmInputs::from_payload(&payload(&[(fields::LOAN_AMOUNT, raw)]));
            assert_eq!(inputs.loan_amount, 1.0);
        }

        let inputs =
            FarmInputs::from_payload(&payload(&[(fields::LOAN_AMOUNT, RawValue::Number(0.5))]));
        assert_eq!(inputs.loan_amount, 0.5);
    }

    #[test]
    fn test_defaults_for_empty_payload() {
        let inputs = FarmInputs::from_payload(&RawPayload::default());

        assert_eq!(inputs.region, Region::Normal);
        assert_eq!(inputs.water_source, WaterSource::Rainfed);
        assert_eq!(inputs.season, Season::Normal);
        assert!(!inputs.insured);
        assert!(!inputs.storage_access);
        assert!(!inputs.income_stable);
        assert_eq!(inputs.crop_type, "");
        assert_eq!(inputs.rainfall_deviation, 0.0);
    }

    #[test]
    fn test_categories_are_case_insensitive() {
        let inputs = FarmInputs::from_payload(&payload(&[
            (fields::REGION, "coastal".into()),
            (fields::WATER_SOURCE, "DRIP".into()),
            (fields::SEASON, "monsoon".into()),
            (fields::CROP_TYPE, "  Grapes ".into()),
        ]));

        assert_eq!(inputs.region, Region::Coastal);
        assert_eq!(inputs.water_source, WaterSource::Drip);
        assert_eq!(inputs.season, Season::Monsoon);
        assert_eq!(inputs.crop_type, "grapes");
    }

    #[test]
    fn test_unknown_water_source_is_other() {
        let inputs =
            FarmInputs::from_payload(&payload(&[(fields::WATER_SOURCE, "Borewell".into())]));
        assert_eq!(inputs.water_source, WaterSource::Other);

        let inputs = FarmInputs::from_payload(&payload(&[(fields::WATER_SOURCE, "".into())]));
        assert_eq!(inputs.water_source, WaterSource::Rainfed);
    }

    #[test]
    fn test_flags() {
        let inputs = FarmInputs::from_payload(&payload(&[
            (fields::STORAGE_ACCESS, "Yes".into()),
            (fields::INCOME_STABILITY, "Stable".into()),
            (fields::INSURANCE, "Yes".into()),
        ]));
        assert!(inputs.storage_access);
        assert!(inputs.income_stable);
        assert!(inputs.insured);

        let inputs = FarmInputs::from_payload(&payload(&[
            (fields::STORAGE_ACCESS, RawValue::Number(1.0)),
            (fields::INCOME_STABILITY, "Unstable".into()),
            (fields::INSURANCE, "No".into()),
        ]));
        assert!(inputs.storage_access);
        assert!(!inputs.income_stable);
        assert!(!inputs.insured);
    }

    #[test]
    fn test_payload_deserializes_mixed_json() {
        let p: RawPayload = serde_json::from_str(
            r#"{"Season": "Harvest", "Rainfall_Deviation": 12, "Input_Cost": "4000", "Insurance": null, "Flag": true}"#,
        )
        .unwrap();

        assert_eq!(p["Season"], RawValue::Text("Harvest".to_string()));
        assert_eq!(p["Rainfall_Deviation"], RawValue::Number(12.0));
        assert_eq!(p["Insurance"], RawValue::Null);
        assert_eq!(p["Flag"], RawValue::Bool(true));
        assert_eq!(safe_float(p.get("Input_Cost")), 4000.0);
    }
}
