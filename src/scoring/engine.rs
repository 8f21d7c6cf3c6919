use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::category::{Category, CategoryScorer};
use super::variant::VariantConfig;
use crate::error::ScoringError;
use crate::metrics::MetricsBundle;

/// Per-category points for one scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Breakdown {
    pub rating: u32,
    pub platform_rating: u32,
    pub cost: u32,
    pub activity: u32,
    pub prep_time: u32,
    pub bad_delay: u32,
    pub outlet_audit: f64,
    pub add_on_sale: f64,
}

impl Breakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Rating => f64::from(self.rating),
            Category::PlatformRating => f64::from(self.platform_rating),
            Category::Cost => f64::from(self.cost),
            Category::Activity => f64::from(self.activity),
            Category::PrepTime => f64::from(self.prep_time),
            Category::BadDelay => f64::from(self.bad_delay),
            Category::OutletAudit => self.outlet_audit,
            Category::AddOnSale => self.add_on_sale,
        }
    }

    /// Category and points, in breakdown order.
    pub fn entries(&self) -> [(Category, f64); 8] {
        Category::ALL.map(|category| (category, self.get(category)))
    }

    /// Sum of the eight categories.
    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, points)| points).sum()
    }
}

/// A breakdown together with its total.
///
/// Only built through [`ScoreResult::from_breakdown`], so the total always
/// equals `breakdown.total()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    breakdown: Breakdown,
    total: f64,
}

impl ScoreResult {
    pub fn from_breakdown(breakdown: Breakdown) -> Self {
        Self {
            total: breakdown.total(),
            breakdown,
        }
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

/// Score a metrics bundle under a variant.
///
/// The variant is checked first (a malformed variant is a contract violation),
/// then the readings. Scoring itself cannot fail.
pub fn compute(
    metrics: &MetricsBundle,
    variant: &VariantConfig,
) -> Result<ScoreResult, ScoringError> {
    variant.validate().map_err(ScoringError::MalformedVariant)?;
    metrics.validate(variant).map_err(ScoringError::Validation)?;

    let breakdown = score_breakdown(metrics, variant);
    let result = ScoreResult::from_breakdown(breakdown);

    info!(
        variant = %variant.variant,
        total = result.total,
        "computed scorecard"
    );
    Ok(result)
}

/// Run every category without validating the inputs first.
pub fn score_breakdown(metrics: &MetricsBundle, variant: &VariantConfig) -> Breakdown {
    let scorer = CategoryScorer::new(variant);

    let breakdown = Breakdown {
        rating: scorer.rating(&metrics.ratings),
        platform_rating: scorer.platform_rating(&metrics.platform_ratings),
        cost: scorer.cost(&metrics.cost_percentages),
        activity: scorer.activity(&metrics.activity),
        prep_time: scorer.prep_time(&metrics.prep_times),
        bad_delay: scorer.bad_delay(&metrics.bad_orders, &metrics.delay_orders),
        outlet_audit: scorer.outlet_audit(&metrics.audit_mistakes),
        add_on_sale: scorer.add_on_sale(&metrics.sales),
    };

    for (category, points) in breakdown.entries() {
        debug!(category = %category, points, "scored category");
    }

    breakdown
}
