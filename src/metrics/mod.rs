//! Raw readings for one scorecard.

use serde::{Deserialize, Serialize};

use crate::scoring::VariantConfig;

/// Sale totals for one outlet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SaleFigures {
    pub total_sale: f64,
    pub add_on_sale: f64,
}

impl SaleFigures {
    pub fn new(total_sale: f64, add_on_sale: f64) -> Self {
        Self {
            total_sale,
            add_on_sale,
        }
    }
}

/// Every reading needed to compute a breakdown.
///
/// Per-outlet lists (`ratings`, `cost_percentages`, `audit_mistakes`, `sales`)
/// follow the outlet order of the active variant. The other lists hold one
/// reading per outlet-platform pair (or per outlet, where the variant says so).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsBundle {
    /// Google rating per outlet
    pub ratings: Vec<f64>,
    /// Zomato/Swiggy ratings
    pub platform_ratings: Vec<f64>,
    /// Food cost as a percentage of sales, per outlet
    pub cost_percentages: Vec<f64>,
    /// Online activity percentages
    pub activity: Vec<f64>,
    /// Kitchen prep times in minutes
    pub prep_times: Vec<f64>,
    pub bad_orders: Vec<f64>,
    pub delay_orders: Vec<f64>,
    /// Audit mistakes per outlet
    pub audit_mistakes: Vec<u32>,
    pub sales: Vec<SaleFigures>,
}

impl MetricsBundle {
    /// Check list lengths against the variant and that every reading is a
    /// finite number. Returns all validation errors at once (not just the first).
    pub fn validate(&self, variant: &VariantConfig) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let outlets = variant.outlet_count();
        let counts = &variant.readings;

        let float_lists: [(&str, &[f64], usize); 7] = [
            ("ratings", &self.ratings, outlets),
            ("platform_ratings", &self.platform_ratings, counts.platform_ratings),
            ("cost_percentages", &self.cost_percentages, outlets),
            ("activity", &self.activity, counts.activity),
            ("prep_times", &self.prep_times, counts.prep_time),
            ("bad_orders", &self.bad_orders, counts.bad_order),
            ("delay_orders", &self.delay_orders, counts.delay_order),
        ];

        for (name, readings, expected) in float_lists {
            check_len(&mut errors, name, readings.len(), expected, variant);
            for (i, value) in readings.iter().enumerate() {
                if !value.is_finite() {
                    errors.push(format!("metrics.{}[{}]: must be a finite number", name, i));
                }
            }
        }

        check_len(
            &mut errors,
            "audit_mistakes",
            self.audit_mistakes.len(),
            outlets,
            variant,
        );

        check_len(&mut errors, "sales", self.sales.len(), outlets, variant);
        for (i, sale) in self.sales.iter().enumerate() {
            if !sale.total_sale.is_finite() {
                errors.push(format!(
                    "metrics.sales[{}].total_sale: must be a finite number",
                    i
                ));
            }
            if !sale.add_on_sale.is_finite() {
                errors.push(format!(
                    "metrics.sales[{}].add_on_sale: must be a finite number",
                    i
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_len(
    errors: &mut Vec<String>,
    name: &str,
    actual: usize,
    expected: usize,
    variant: &VariantConfig,
) {
    if actual != expected {
        errors.push(format!(
            "metrics.{}: expected {} readings for {}, got {}",
            name, expected, variant.variant, actual
        ));
    }
}
