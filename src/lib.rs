pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod scoring;
pub mod store;

pub use error::ScoringError;
pub use metrics::{MetricsBundle, SaleFigures};
pub use scoring::{compute, Breakdown, ScoreResult, Variant, VariantConfig};
