pub mod filter;
pub mod storage;
pub mod types;

pub use filter::filter_by_period;
pub use storage::{load_store, save_store};
pub use types::{Scorecard, ScorecardRequest, ScorecardStore};
