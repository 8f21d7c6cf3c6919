pub mod average;
pub mod category;
pub mod config;
pub mod engine;
pub mod ladder;
pub mod tables;
pub mod validation;
pub mod variant;

pub use category::{add_on_rate, audit_points, Category, CategoryScorer};
pub use config::{LadderConfig, LadderOverrides, RuleConfig};
pub use engine::{compute, Breakdown, ScoreResult};
pub use ladder::{Bound, Direction, Rule, ThresholdLadder};
pub use validation::{known_outlets, validate_overrides};
pub use variant::{OutletSpec, ReadingCounts, SharedLadders, Variant, VariantConfig};
