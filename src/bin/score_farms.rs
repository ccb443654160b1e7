// Batch scoring from CSV
//
// Usage: cargo run --release --bin score_farms -- farms.csv [--policy policy.json]
//
// Each CSV row is one farm payload (same field names as the API). Prints a
// JSON array with one {"ok": result} or {"error": message} entry per row.
// Model files are located through MODEL_DIR, as for the API server.

use anyhow::{Context, Result};
use farm_risk_scorer::{FarmData, RiskScorer, ServiceConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farm_risk_scorer=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let mut csv_path: Option<PathBuf> = None;
    let mut config = ServiceConfig::from_env();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--policy" => {
                let path = args.next().context("--policy needs a file path")?;
                config.policy_path = Some(PathBuf::from(path));
            }
            _ => csv_path = Some(PathBuf::from(arg)),
        }
    }

    let csv_path = csv_path.context("Usage: score_farms <farms.csv> [--policy policy.json]")?;

    let scorer = RiskScorer::load(&config)?;
    let data = FarmData::load_csv(&csv_path)?;
    let payloads = data.payloads()?;

    let start = Instant::now();
    let results = scorer.score_batch(&payloads);
    let elapsed = start.elapsed();

    let mut failures = 0usize;
    let entries: Vec<serde_json::Value> = results
        .into_iter()
        .enumerate()
        .map(|(row, r)| match r {
            Ok(result) => serde_json::json!({ "ok": result }),
            Err(e) => {
                failures += 1;
                tracing::warn!("Row {} failed: {}", row + 1, e);
                serde_json::json!({ "error": e.to_string() })
            }
        })
        .collect();

    tracing::info!(
        "Scored {} farms in {:.1} ms ({} failed)",
        entries.len(),
        elapsed.as_secs_f64() * 1000.0,
        failures
    );

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
