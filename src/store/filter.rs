use super::types::{Scorecard, ScorecardStore};

/// Scorecards whose month label matches the given month and/or year,
/// in insertion order
pub fn filter_by_period<'a>(
    store: &'a ScorecardStore,
    month: Option<&str>,
    year: Option<&str>,
) -> Vec<&'a Scorecard> {
    store
        .scorecards
        .iter()
        .filter(|card| card.matches_period(month, year))
        .collect()
}
