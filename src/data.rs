//! Batch Data Loading
//!
//! Reads farm records from CSV with Polars and turns each row into a
//! `RawPayload`, the same shape the HTTP endpoint receives. Every cell is
//! read as text so the usual safe-float coercion applies; empty cells are
//! treated as missing fields.

use crate::utils::{RawPayload, RawValue};
use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Farm records loaded for batch scoring
pub struct FarmData {
    pub records: DataFrame,
}

impl FarmData {
    /// Load farm records from CSV (header row required)
    pub fn load_csv(path: &Path) -> Result<Self> {
        let records = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load farm records: {:?}", path))?;

        tracing::info!(
            "Loaded {} farm records ({} columns) from {:?}",
            records.height(),
            records.width(),
            path
        );

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.height()
    }

    pub fn is_empty(&self) -> bool {
        self.records.height() == 0
    }

    /// One payload per row
    pub fn payloads(&self) -> Result<Vec<RawPayload>> {
        payloads_from_frame(&self.records)
    }
}

/// Convert a DataFrame into row payloads
///
/// Non-string columns are cast to String first so the payload looks exactly
/// like a form submission.
pub fn payloads_from_frame(df: &DataFrame) -> Result<Vec<RawPayload>> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    let mut payloads = vec![RawPayload::default(); df.height()];

    for name in &names {
        let column = df
            .column(name.as_str())
            .with_context(|| format!("Column '{}' not found", name))?
            .cast(&DataType::String)
            .with_context(|| format!("Column '{}' cannot be read as text", name))?;

        let values = column
            .str()
            .with_context(|| format!("Column '{}' is not string type", name))?;

        for (payload, value) in payloads.iter_mut().zip(values.into_iter()) {
            match value {
                Some(v) if !v.trim().is_empty() => {
                    payload.insert(name.clone(), RawValue::Text(v.to_string()));
                }
                _ => {}
            }
        }
    }

    Ok(payloads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{fields, safe_float};

    #[test]
    fn test_payloads_from_mixed_frame() {
        let df = df! {
            "Season" => &[Some("Monsoon"), Some("Harvest"), None],
            "Rainfall_Deviation" => &[12.5, -3.0, 0.0],
            "Region" => &["Coastal", "", "Dryland"]
        }
        .unwrap();

        let payloads = payloads_from_frame(&df).unwrap();
        assert_eq!(payloads.len(), 3);

        assert_eq!(
            payloads[0].get(fields::SEASON),
            Some(&RawValue::Text("Monsoon".to_string()))
        );
        assert_eq!(safe_float(payloads[0].get(fields::RAINFALL_DEVIATION)), 12.5);
        assert_eq!(safe_float(payloads[1].get(fields::RAINFALL_DEVIATION)), -3.0);

        // empty and null cells are missing
        assert!(payloads[1].get(fields::REGION).is_none());
        assert!(payloads[2].get(fields::SEASON).is_none());
    }

    #[test]
    fn test_empty_frame() {
        let df = DataFrame::empty();
        assert!(payloads_from_frame(&df).unwrap().is_empty());
    }

    #[test]
    fn test_load_sample_csv() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_farms.csv");
        let data = FarmData::load_csv(&path).expect("Failed to load sample farms");
        assert_eq!(data.len(), 4);

        let payloads = data.payloads().unwrap();
        assert_eq!(
            payloads[1].get(fields::CROP_TYPE),
            Some(&RawValue::Text("grapes".to_string()))
        );
        assert_eq!(safe_float(payloads[0].get(fields::LOAN_AMOUNT)), 100000.0);
    }
}
