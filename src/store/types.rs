use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::metrics::MetricsBundle;
use crate::scoring::{compute, Breakdown, Variant, VariantConfig};

pub const STORE_VERSION: u32 = 1;

/// Input record for scoring and saving one manager's month.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScorecardRequest {
    pub manager_name: String,
    pub mall_name: String,
    /// Free-form "<Month> <Year>", e.g. "January 2026"
    pub month: String,
    /// Falls back to the configured variant when absent
    #[serde(default)]
    pub variant: Option<Variant>,
    pub metrics: MetricsBundle,
}

/// A scored and persisted manager scorecard.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scorecard {
    /// Assigned by [`ScorecardStore::insert`]
    pub id: u64,
    pub manager_name: String,
    pub mall_name: String,
    pub month: String,
    pub variant: Variant,
    pub created_at: DateTime<Utc>,
    pub total_score: f64,
    pub breakdown: Breakdown,
    pub metrics: MetricsBundle,
}

impl Scorecard {
    /// Score a request under `variant`. The id stays 0 until inserted.
    pub fn from_request(
        request: ScorecardRequest,
        variant: &VariantConfig,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ScoringError> {
        let result = compute(&request.metrics, variant)?;
        Ok(Self {
            id: 0,
            manager_name: request.manager_name,
            mall_name: request.mall_name,
            month: request.month,
            variant: variant.variant,
            created_at,
            total_score: result.total(),
            breakdown: *result.breakdown(),
            metrics: request.metrics,
        })
    }

    /// Check the stored total still equals the sum of its breakdown.
    pub fn verify_total(&self) -> Result<()> {
        let expected = self.breakdown.total();
        if self.total_score != expected {
            anyhow::bail!(
                "Scorecard {} has total {} but its breakdown sums to {}",
                self.id,
                self.total_score,
                expected
            );
        }
        Ok(())
    }

    /// True when `month` and `year` match the "<Month> <Year>" label.
    ///
    /// Both given: exact match. Month only: prefix. Year only: suffix.
    pub fn matches_period(&self, month: Option<&str>, year: Option<&str>) -> bool {
        match (month, year) {
            (Some(m), Some(y)) => self.month == format!("{} {}", m, y),
            (Some(m), None) => self.month.starts_with(m),
            (None, Some(y)) => self.month.ends_with(y),
            (None, None) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardStore {
    pub version: u32,
    #[serde(default = "first_id")]
    pub next_id: u64,
    #[serde(default)]
    pub scorecards: Vec<Scorecard>,
}

fn first_id() -> u64 {
    1
}

impl Default for ScorecardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScorecardStore {
    /// Create a new empty store with the current version
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            next_id: first_id(),
            scorecards: Vec::new(),
        }
    }

    /// Assign the next id and keep the scorecard. Returns the id.
    pub fn insert(&mut self, mut scorecard: Scorecard) -> u64 {
        let id = self.next_id;
        scorecard.id = id;
        self.next_id += 1;
        self.scorecards.push(scorecard);
        id
    }

    pub fn get(&self, id: u64) -> Option<&Scorecard> {
        self.scorecards.iter().find(|s| s.id == id)
    }

    /// Remove a scorecard.
    /// Returns the removed scorecard, or None if the id was unknown.
    pub fn remove(&mut self, id: u64) -> Option<Scorecard> {
        let index = self.scorecards.iter().position(|s| s.id == id)?;
        Some(self.scorecards.remove(index))
    }

    /// Verify every stored total against its breakdown.
    pub fn verify(&self) -> Result<()> {
        self.scorecards.iter().try_for_each(Scorecard::verify_total)
    }

    pub fn len(&self) -> usize {
        self.scorecards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scorecards.is_empty()
    }
}
