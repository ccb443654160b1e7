pub mod types;
pub mod summary;
pub mod alerts;
pub mod recommendations;
pub mod generator;

pub use types::{Alert, AlertKind, Explanation};

pub use summary::{dominant_driver, summary_for};
pub use alerts::generate_alerts;
pub use recommendations::{generate_recommendations, STABLE_CONDITIONS};

pub use generator::ExplanationGenerator;
