use serde::{Deserialize, Serialize};
use std::fmt;

use super::average::averaged_points;
use super::variant::VariantConfig;
use crate::metrics::SaleFigures;

/// Full marks for an outlet with no audit mistakes.
pub const AUDIT_MAX_POINTS: u32 = 20;
/// Points lost per audit mistake.
pub const AUDIT_PENALTY: u32 = 2;

/// The eight scored categories, in breakdown order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rating,
    PlatformRating,
    Cost,
    Activity,
    PrepTime,
    BadDelay,
    OutletAudit,
    AddOnSale,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Rating,
        Category::PlatformRating,
        Category::Cost,
        Category::Activity,
        Category::PrepTime,
        Category::BadDelay,
        Category::OutletAudit,
        Category::AddOnSale,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Rating => "Google Rating",
            Category::PlatformRating => "Zomato/Swiggy Rating",
            Category::Cost => "Food Cost",
            Category::Activity => "Online Activity",
            Category::PrepTime => "Kitchen Prep",
            Category::BadDelay => "Bad & Delay",
            Category::OutletAudit => "Outlet Audit",
            Category::AddOnSale => "Add-on Sale",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Audit points for one outlet: 20 less 2 per mistake, never below 0.
pub fn audit_points(mistakes: u32) -> u32 {
    AUDIT_MAX_POINTS.saturating_sub(mistakes.saturating_mul(AUDIT_PENALTY))
}

/// Add-on sale as a percentage of total sale.
///
/// A non-positive total sale yields 0% rather than an error.
pub fn add_on_rate(sale: &SaleFigures) -> f64 {
    if sale.total_sale <= 0.0 {
        return 0.0;
    }
    (sale.add_on_sale / sale.total_sale) * 100.0
}

/// Scores individual categories against one variant's ladders.
///
/// Per-outlet slices are read in the variant's outlet order. Callers are
/// expected to have validated lengths; a short slice simply contributes
/// fewer outlets.
#[derive(Debug, Clone, Copy)]
pub struct CategoryScorer<'a> {
    variant: &'a VariantConfig,
}

impl<'a> CategoryScorer<'a> {
    pub fn new(variant: &'a VariantConfig) -> Self {
        Self { variant }
    }

    pub fn rating(&self, ratings: &[f64]) -> u32 {
        averaged_points(ratings, &self.variant.ladders.rating)
    }

    pub fn platform_rating(&self, ratings: &[f64]) -> u32 {
        averaged_points(ratings, &self.variant.ladders.rating)
    }

    /// Sum of each outlet's points on its own cost ladder.
    pub fn cost(&self, percentages: &[f64]) -> u32 {
        self.variant
            .outlets
            .iter()
            .zip(percentages)
            .map(|(outlet, &pct)| outlet.cost_ladder.evaluate(pct))
            .sum()
    }

    pub fn activity(&self, percentages: &[f64]) -> u32 {
        averaged_points(percentages, &self.variant.ladders.activity)
    }

    pub fn prep_time(&self, minutes: &[f64]) -> u32 {
        averaged_points(minutes, &self.variant.ladders.prep_time)
    }

    /// Bad-order points plus delay-order points, each from its own average.
    pub fn bad_delay(&self, bad_orders: &[f64], delay_orders: &[f64]) -> u32 {
        averaged_points(bad_orders, &self.variant.ladders.bad_order)
            + averaged_points(delay_orders, &self.variant.ladders.delay_order)
    }

    /// Mean of per-outlet audit points over every outlet in the variant.
    pub fn outlet_audit(&self, mistakes: &[u32]) -> f64 {
        let total: u32 = mistakes
            .iter()
            .take(self.variant.outlet_count())
            .map(|&m| audit_points(m))
            .sum();
        f64::from(total) / self.variant.divisor()
    }

    /// Mean of per-outlet add-on ladder points over every outlet in the variant.
    pub fn add_on_sale(&self, sales: &[SaleFigures]) -> f64 {
        let ladder = &self.variant.ladders.add_on_sale;
        let total: u32 = sales
            .iter()
            .take(self.variant.outlet_count())
            .map(|sale| ladder.evaluate(add_on_rate(sale)))
            .sum();
        f64::from(total) / self.variant.divisor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two() -> VariantConfig {
        VariantConfig::two_outlet()
    }

    fn three() -> VariantConfig {
        VariantConfig::three_outlet()
    }

    #[test]
    fn test_rating() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.rating(&[4.0, 4.0]), 10);
        assert_eq!(scorer.rating(&[3.9, 3.9]), 9);
        assert_eq!(scorer.rating(&[3.85, 3.85]), 8);
        assert_eq!(scorer.rating(&[3.0, 3.0]), 0);
    }

    #[test]
    fn test_platform_rating() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.platform_rating(&[4.0, 4.0, 4.0, 4.0]), 10);
        // mean 3.75
        assert_eq!(scorer.platform_rating(&[3.5, 4.0, 3.5, 4.0]), 7);
        assert_eq!(scorer.platform_rating(&[]), 0);
    }

    #[test]
    fn test_cost_two_outlet() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.cost(&[22.0, 18.0]), 20);
        assert_eq!(scorer.cost(&[25.0, 20.0]), 15);
        assert_eq!(scorer.cost(&[27.0, 22.0]), 10);
        assert_eq!(scorer.cost(&[28.0, 23.0]), 0);
    }

    #[test]
    fn test_cost_three_outlet_adds_chaat_masala() {
        let variant = three();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.cost(&[22.0, 18.0, 24.0]), 30);
        assert_eq!(scorer.cost(&[25.0, 20.0, 29.0]), 7 + 8 + 5);
        assert_eq!(scorer.cost(&[22.0, 18.0, 30.0]), 20);
    }

    #[test]
    fn test_activity() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.activity(&[98.0; 4]), 10);
        assert_eq!(scorer.activity(&[97.0; 4]), 8);
        assert_eq!(scorer.activity(&[95.0; 4]), 4);
        assert_eq!(scorer.activity(&[94.9; 4]), 0);
    }

    #[test]
    fn test_prep_time() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.prep_time(&[9.0; 4]), 12);
        assert_eq!(scorer.prep_time(&[10.0; 4]), 10);
        assert_eq!(scorer.prep_time(&[15.0; 4]), 10);
        assert_eq!(scorer.prep_time(&[16.0; 4]), 9);
        assert_eq!(scorer.prep_time(&[20.0; 4]), 5);
        assert_eq!(scorer.prep_time(&[21.0; 4]), 0);
    }

    #[test]
    fn test_bad_delay() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.bad_delay(&[3.0; 4], &[10.0; 4]), 10);
        assert_eq!(scorer.bad_delay(&[7.0; 4], &[14.0; 4]), 6);
        assert_eq!(scorer.bad_delay(&[12.0; 4], &[19.0; 4]), 0);
    }

    #[test]
    fn test_bad_delay_empty_half() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.bad_delay(&[], &[10.0; 4]), 5);
    }

    #[test]
    fn test_audit_points() {
        assert_eq!(audit_points(0), 20);
        assert_eq!(audit_points(3), 14);
        assert_eq!(audit_points(10), 0);
        assert_eq!(audit_points(11), 0);
        assert_eq!(audit_points(u32::MAX), 0);
    }

    #[test]
    fn test_outlet_audit_two_outlet() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.outlet_audit(&[0, 0]), 20.0);
        assert_eq!(scorer.outlet_audit(&[10, 10]), 0.0);
        assert_eq!(scorer.outlet_audit(&[5, 5]), 10.0);
        assert_eq!(scorer.outlet_audit(&[0, 10]), 10.0);
        assert_eq!(scorer.outlet_audit(&[1, 0]), 19.0);
    }

    #[test]
    fn test_outlet_audit_three_outlet() {
        let variant = three();
        let scorer = CategoryScorer::new(&variant);
        assert_eq!(scorer.outlet_audit(&[0, 10, 5]), 10.0);
        assert_eq!(scorer.outlet_audit(&[0, 0, 0]), 20.0);
    }

    #[test]
    fn test_add_on_rate() {
        assert_eq!(add_on_rate(&SaleFigures::new(200.0, 25.0)), 12.5);
        assert_eq!(add_on_rate(&SaleFigures::new(0.0, 30.0)), 0.0);
        assert_eq!(add_on_rate(&SaleFigures::new(-50.0, 30.0)), 0.0);
    }

    #[test]
    fn test_add_on_sale() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        let both_sixteen = [SaleFigures::new(100.0, 16.0), SaleFigures::new(100.0, 16.0)];
        assert_eq!(scorer.add_on_sale(&both_sixteen), 12.0);

        let both_fifteen = [SaleFigures::new(100.0, 15.0), SaleFigures::new(100.0, 15.0)];
        assert_eq!(scorer.add_on_sale(&both_fifteen), 10.0);

        let mixed = [SaleFigures::new(100.0, 16.0), SaleFigures::new(100.0, 10.0)];
        assert_eq!(scorer.add_on_sale(&mixed), 6.0);
    }

    #[test]
    fn test_add_on_sale_zero_total_contributes_nothing() {
        let variant = two();
        let scorer = CategoryScorer::new(&variant);
        let sales = [SaleFigures::new(100.0, 16.0), SaleFigures::new(0.0, 50.0)];
        assert_eq!(scorer.add_on_sale(&sales), 6.0);
    }

    #[test]
    fn test_add_on_sale_three_outlet() {
        let variant = three();
        let scorer = CategoryScorer::new(&variant);
        let sales = [
            SaleFigures::new(100.0, 16.0),
            SaleFigures::new(100.0, 14.0),
            SaleFigures::new(100.0, 13.0),
        ];
        // (12 + 8 + 6) / 3
        assert!((scorer.add_on_sale(&sales) - 26.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::ALL.len(), 8);
        assert_eq!(Category::BadDelay.to_string(), "Bad & Delay");
    }
}
