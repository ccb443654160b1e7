//! Service configuration
//!
//! Read from environment variables:
//! - `MODEL_DIR`: directory holding `feature_order.txt` and `risk_model.json`
//!   (default `model`)
//! - `POLICY_PATH`: optional JSON risk policy (built-in policy otherwise)
//! - `PORT`: HTTP port for the API server (default 3000)

use std::path::PathBuf;

pub const FEATURE_ORDER_FILE: &str = "feature_order.txt";
pub const MODEL_FILE: &str = "risk_model.json";
const DEFAULT_MODEL_DIR: &str = "model";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub model_dir: PathBuf,
    pub policy_path: Option<PathBuf>,
    pub port: u16,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            policy_path: None,
            port: DEFAULT_PORT,
        }
    }
}

impl ServiceConfig {
    /// Configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let model_dir = lookup("MODEL_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.model_dir);

        let policy_path = lookup("POLICY_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        Self {
            model_dir,
            policy_path,
            port,
        }
    }

    pub fn feature_order_path(&self) -> PathBuf {
        self.model_dir.join(FEATURE_ORDER_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(MODEL_FILE)
    }
}
