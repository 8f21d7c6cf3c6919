use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::ladder::{Bound, Direction, Rule, ThresholdLadder};
use super::validation::validate_overrides;
use super::variant::VariantConfig;

/// Ladder replacements read from the config file.
///
/// Each field is optional; absent fields keep the built-in table.
///
/// Example YAML:
/// ```yaml
/// ladders:
///   prep_time:
///     direction: lower-is-better
///     rules:
///       - { when: "<=10", points: 12 }
///       - { when: "<=15", points: 10 }
///   cost:
///     Chennai:
///       direction: lower-is-better
///       rules:
///         - { when: "<=19", points: 10 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LadderOverrides {
    /// Applies to both the Google rating and the platform rating average
    #[serde(default)]
    pub rating: Option<LadderConfig>,

    #[serde(default)]
    pub activity: Option<LadderConfig>,

    #[serde(default)]
    pub prep_time: Option<LadderConfig>,

    #[serde(default)]
    pub bad_order: Option<LadderConfig>,

    #[serde(default)]
    pub delay_order: Option<LadderConfig>,

    #[serde(default)]
    pub add_on_sale: Option<LadderConfig>,

    /// Cost ladders keyed by outlet name (case-insensitive)
    #[serde(default)]
    pub cost: Option<BTreeMap<String, LadderConfig>>,
}

impl LadderOverrides {
    /// Named shared-ladder overrides, in a stable order.
    pub(crate) fn shared(&self) -> [(&'static str, Option<&LadderConfig>); 6] {
        [
            ("rating", self.rating.as_ref()),
            ("activity", self.activity.as_ref()),
            ("prep_time", self.prep_time.as_ref()),
            ("bad_order", self.bad_order.as_ref()),
            ("delay_order", self.delay_order.as_ref()),
            ("add_on_sale", self.add_on_sale.as_ref()),
        ]
    }
}

/// Textual form of a threshold ladder.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LadderConfig {
    pub direction: Direction,

    /// Points below the last bucket (default: 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<u32>,

    /// Most favourable rule first
    pub rules: Vec<RuleConfig>,
}

/// One ladder rule.
/// Bound format: ">=N", ">N", "<=N", "<N"
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub when: String,
    pub points: u32,
}

impl LadderConfig {
    pub fn to_ladder(&self) -> Result<ThresholdLadder> {
        let rules = self
            .rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let bound = Bound::parse(&rule.when)
                    .with_context(|| format!("rules[{}].when: invalid '{}'", i, rule.when))?;
                Ok(Rule::new(bound, rule.points))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ThresholdLadder::new(
            self.direction,
            rules,
            self.fallback.unwrap_or(0),
        ))
    }

    pub fn from_ladder(ladder: &ThresholdLadder) -> Self {
        Self {
            direction: ladder.direction,
            fallback: (ladder.fallback != 0).then_some(ladder.fallback),
            rules: ladder
                .rules
                .iter()
                .map(|rule| RuleConfig {
                    when: rule.bound.to_string(),
                    points: rule.points,
                })
                .collect(),
        }
    }
}

impl VariantConfig {
    /// Build a new variant with the configured ladders swapped in.
    ///
    /// Cost ladders for outlets this variant does not have are skipped.
    pub fn with_overrides(&self, overrides: &LadderOverrides) -> Result<Self, Vec<String>> {
        validate_overrides(overrides)?;

        let mut next = self.clone();
        let parse = |config: &LadderConfig| config.to_ladder().map_err(|e| vec![format!("{:#}", e)]);

        let slots = [
            (overrides.rating.as_ref(), &mut next.ladders.rating),
            (overrides.activity.as_ref(), &mut next.ladders.activity),
            (overrides.prep_time.as_ref(), &mut next.ladders.prep_time),
            (overrides.bad_order.as_ref(), &mut next.ladders.bad_order),
            (overrides.delay_order.as_ref(), &mut next.ladders.delay_order),
            (overrides.add_on_sale.as_ref(), &mut next.ladders.add_on_sale),
        ];
        for (config, slot) in slots {
            if let Some(config) = config {
                *slot = parse(config)?;
            }
        }

        if let Some(ref cost) = overrides.cost {
            for (outlet_name, config) in cost {
                let ladder = parse(config)?;
                let variant = next.variant;
                match next.outlet_mut(outlet_name) {
                    Some(outlet) => outlet.cost_ladder = ladder,
                    None => debug!(
                        outlet = %outlet_name,
                        %variant,
                        "cost override not used by this variant"
                    ),
                }
            }
        }

        Ok(next)
    }

    /// Effective ladders in their config-file form.
    pub fn to_overrides(&self) -> LadderOverrides {
        LadderOverrides {
            rating: Some(LadderConfig::from_ladder(&self.ladders.rating)),
            activity: Some(LadderConfig::from_ladder(&self.ladders.activity)),
            prep_time: Some(LadderConfig::from_ladder(&self.ladders.prep_time)),
            bad_order: Some(LadderConfig::from_ladder(&self.ladders.bad_order)),
            delay_order: Some(LadderConfig::from_ladder(&self.ladders.delay_order)),
            add_on_sale: Some(LadderConfig::from_ladder(&self.ladders.add_on_sale)),
            cost: Some(
                self.outlets
                    .iter()
                    .map(|o| (o.name.clone(), LadderConfig::from_ladder(&o.cost_ladder)))
                    .collect(),
            ),
        }
    }
}
