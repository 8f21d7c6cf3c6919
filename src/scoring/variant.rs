use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ladder::ThresholdLadder;
use super::tables;

/// Deployment variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    TwoOutlet,
    ThreeOutlet,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::TwoOutlet => write!(f, "two-outlet"),
            Variant::ThreeOutlet => write!(f, "three-outlet"),
        }
    }
}

/// One outlet and the cost ladder that applies to it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutletSpec {
    pub name: String,
    pub cost_ladder: ThresholdLadder,
}

impl OutletSpec {
    pub fn new(name: &str, cost_ladder: ThresholdLadder) -> Self {
        Self {
            name: name.to_string(),
            cost_ladder,
        }
    }
}

/// Expected length of each list-valued reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingCounts {
    pub platform_ratings: usize,
    pub activity: usize,
    pub prep_time: usize,
    pub bad_order: usize,
    pub delay_order: usize,
}

/// Ladders shared by every outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedLadders {
    /// Used for both the Google rating and the platform rating average.
    pub rating: ThresholdLadder,
    pub activity: ThresholdLadder,
    pub prep_time: ThresholdLadder,
    pub bad_order: ThresholdLadder,
    pub delay_order: ThresholdLadder,
    pub add_on_sale: ThresholdLadder,
}

impl Default for SharedLadders {
    fn default() -> Self {
        Self {
            rating: tables::rating_ladder(),
            activity: tables::activity_ladder(),
            prep_time: tables::prep_time_ladder(),
            bad_order: tables::bad_order_ladder(),
            delay_order: tables::delay_order_ladder(),
            add_on_sale: tables::add_on_sale_ladder(),
        }
    }
}

/// Everything that differs between deployments, expressed as data.
///
/// Selected once per scorecard. Outlet order fixes the order of every
/// per-outlet reading in a `MetricsBundle`.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantConfig {
    pub variant: Variant,
    pub outlets: Vec<OutletSpec>,
    pub readings: ReadingCounts,
    pub ladders: SharedLadders,
}

impl VariantConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::TwoOutlet => Self::two_outlet(),
            Variant::ThreeOutlet => Self::three_outlet(),
        }
    }

    /// Amritsari and Chennai, two delivery platforms each.
    pub fn two_outlet() -> Self {
        Self {
            variant: Variant::TwoOutlet,
            outlets: vec![
                OutletSpec::new("Amritsari", tables::amritsari_cost_ladder()),
                OutletSpec::new("Chennai", tables::chennai_cost_ladder()),
            ],
            readings: ReadingCounts {
                platform_ratings: 4,
                activity: 4,
                prep_time: 4,
                bad_order: 4,
                delay_order: 4,
            },
            ladders: SharedLadders::default(),
        }
    }

    /// Adds Chaat Masala. Bad and delay orders are tracked once per outlet.
    pub fn three_outlet() -> Self {
        Self {
            variant: Variant::ThreeOutlet,
            outlets: vec![
                OutletSpec::new("Amritsari", tables::amritsari_cost_ladder()),
                OutletSpec::new("Chennai", tables::chennai_cost_ladder()),
                OutletSpec::new("Chaat Masala", tables::chaat_masala_cost_ladder()),
            ],
            readings: ReadingCounts {
                platform_ratings: 6,
                activity: 6,
                prep_time: 6,
                bad_order: 3,
                delay_order: 3,
            },
            ladders: SharedLadders::default(),
        }
    }

    pub fn outlet_count(&self) -> usize {
        self.outlets.len()
    }

    /// Divisor for the per-outlet audit and add-on sale averages.
    pub fn divisor(&self) -> f64 {
        self.outlets.len() as f64
    }

    /// Outlet by name, ignoring case.
    pub fn outlet_mut(&mut self, name: &str) -> Option<&mut OutletSpec> {
        self.outlets
            .iter_mut()
            .find(|o| o.name.eq_ignore_ascii_case(name))
    }

    /// Returns all malformations at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.outlets.is_empty() {
            errors.push("variant.outlets: at least one outlet is required".to_string());
        }

        let mut seen = HashSet::new();
        for (i, outlet) in self.outlets.iter().enumerate() {
            if !seen.insert(outlet.name.to_ascii_lowercase()) {
                errors.push(format!(
                    "variant.outlets[{}]: duplicate outlet '{}'",
                    i, outlet.name
                ));
            }
            collect_ladder_errors(
                &mut errors,
                &format!("variant.outlets[{}].cost_ladder", i),
                &outlet.cost_ladder,
            );
        }

        let shared = [
            ("rating", &self.ladders.rating),
            ("activity", &self.ladders.activity),
            ("prep_time", &self.ladders.prep_time),
            ("bad_order", &self.ladders.bad_order),
            ("delay_order", &self.ladders.delay_order),
            ("add_on_sale", &self.ladders.add_on_sale),
        ];
        for (name, ladder) in shared {
            collect_ladder_errors(&mut errors, &format!("variant.ladders.{}", name), ladder);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn collect_ladder_errors(errors: &mut Vec<String>, path: &str, ladder: &ThresholdLadder) {
    if let Err(ladder_errors) = ladder.validate() {
        errors.extend(ladder_errors.into_iter().map(|e| format!("{}: {}", path, e)));
    }
}
