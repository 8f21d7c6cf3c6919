use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison a reading must satisfy for a rule to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    AtLeast(f64),
    Above(f64),
    AtMost(f64),
    Below(f64),
}

impl Bound {
    /// Parse ">=4.0", ">4", "<=22" or "<10".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bound = if let Some(val) = s.strip_prefix(">=") {
            Bound::AtLeast(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix("<=") {
            Bound::AtMost(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix('>') {
            Bound::Above(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix('<') {
            Bound::Below(val.trim().parse()?)
        } else {
            bail!("Bound must start with >=, >, <= or <: {}", s)
        };
        if !bound.boundary().is_finite() {
            bail!("Bound must be a finite number: {}", s)
        }
        Ok(bound)
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            Bound::AtLeast(b) => value >= *b,
            Bound::Above(b) => value > *b,
            Bound::AtMost(b) => value <= *b,
            Bound::Below(b) => value < *b,
        }
    }

    pub fn boundary(&self) -> f64 {
        match self {
            Bound::AtLeast(b) | Bound::Above(b) | Bound::AtMost(b) | Bound::Below(b) => *b,
        }
    }

    fn suits(&self, direction: Direction) -> bool {
        match direction {
            Direction::HigherIsBetter => matches!(self, Bound::AtLeast(_) | Bound::Above(_)),
            Direction::LowerIsBetter => matches!(self, Bound::AtMost(_) | Bound::Below(_)),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::AtLeast(b) => write!(f, ">={}", b),
            Bound::Above(b) => write!(f, ">{}", b),
            Bound::AtMost(b) => write!(f, "<={}", b),
            Bound::Below(b) => write!(f, "<{}", b),
        }
    }
}

/// Which end of the scale earns the most points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub bound: Bound,
    pub points: u32,
}

impl Rule {
    pub fn new(bound: Bound, points: u32) -> Self {
        Self { bound, points }
    }
}

/// Ordered table of rules, most favourable first.
///
/// The first rule whose bound the value satisfies decides the points. A value
/// below the last bucket earns `fallback`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdLadder {
    pub direction: Direction,
    pub rules: Vec<Rule>,
    pub fallback: u32,
}

impl ThresholdLadder {
    pub fn new(direction: Direction, rules: Vec<Rule>, fallback: u32) -> Self {
        Self {
            direction,
            rules,
            fallback,
        }
    }

    /// Ladder of `value >= boundary` rules with a fallback of 0.
    pub fn at_least(steps: &[(f64, u32)]) -> Self {
        let rules = steps
            .iter()
            .map(|&(b, points)| Rule::new(Bound::AtLeast(b), points))
            .collect();
        Self::new(Direction::HigherIsBetter, rules, 0)
    }

    /// Ladder of `value <= boundary` rules with a fallback of 0.
    pub fn at_most(steps: &[(f64, u32)]) -> Self {
        let rules = steps
            .iter()
            .map(|&(b, points)| Rule::new(Bound::AtMost(b), points))
            .collect();
        Self::new(Direction::LowerIsBetter, rules, 0)
    }

    pub fn evaluate(&self, value: f64) -> u32 {
        self.rules
            .iter()
            .find(|rule| rule.bound.matches(value))
            .map_or(self.fallback, |rule| rule.points)
    }

    /// Check the ladder is a well-formed step function.
    /// Returns all problems at once (not just the first).
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.rules.is_empty() {
            errors.push("ladder has no rules".to_string());
        }

        for (i, rule) in self.rules.iter().enumerate() {
            if !rule.bound.boundary().is_finite() {
                errors.push(format!("rules[{}]: boundary must be finite", i));
            }
            if !rule.bound.suits(self.direction) {
                errors.push(format!(
                    "rules[{}]: '{}' does not fit a {} ladder",
                    i,
                    rule.bound,
                    direction_label(self.direction)
                ));
            }
        }

        for (i, pair) in self.rules.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            let ordered = match self.direction {
                Direction::HigherIsBetter => next.bound.boundary() < prev.bound.boundary(),
                Direction::LowerIsBetter => next.bound.boundary() > prev.bound.boundary(),
            };
            if !ordered {
                errors.push(format!(
                    "rules[{}]: '{}' is out of order after '{}'",
                    i + 1,
                    next.bound,
                    prev.bound
                ));
            }
            if next.points > prev.points {
                errors.push(format!(
                    "rules[{}]: points {} exceed the {} of the rule before it",
                    i + 1,
                    next.points,
                    prev.points
                ));
            }
        }

        if let Some(last) = self.rules.last() {
            if self.fallback > last.points {
                errors.push(format!(
                    "fallback {} exceeds the last rule's {} points",
                    self.fallback, last.points
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

fn direction_label(direction: Direction) -> &'static str {
    match direction {
        Direction::HigherIsBetter => "higher-is-better",
        Direction::LowerIsBetter => "lower-is-better",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bound_at_least() {
        let bound = Bound::parse(">=4.0").unwrap();
        assert!(bound.matches(4.0));
        assert!(bound.matches(4.5));
        assert!(!bound.matches(3.99));
    }

    #[test]
    fn test_parse_bound_above() {
        let bound = Bound::parse("> 95").unwrap();
        assert!(!bound.matches(95.0));
        assert!(bound.matches(95.1));
    }

    #[test]
    fn test_parse_bound_at_most() {
        let bound = Bound::parse("<=22").unwrap();
        assert!(bound.matches(22.0));
        assert!(!bound.matches(22.01));
    }

    #[test]
    fn test_parse_bound_below() {
        let bound = Bound::parse("<10").unwrap();
        assert!(bound.matches(9.99));
        assert!(!bound.matches(10.0));
    }

    #[test]
    fn test_parse_bound_requires_comparison() {
        assert!(Bound::parse("22").is_err());
        assert!(Bound::parse("=22").is_err());
        assert!(Bound::parse(">=abc").is_err());
        assert!(Bound::parse("<=inf").is_err());
    }

    #[test]
    fn test_bound_display_roundtrip() {
        for text in [">=3.9", ">95", "<=22", "<10"] {
            let bound = Bound::parse(text).unwrap();
            assert_eq!(bound.to_string(), text);
            assert_eq!(Bound::parse(&bound.to_string()).unwrap(), bound);
        }
    }

    #[test]
    fn test_nan_never_matches() {
        let ladder = ThresholdLadder::at_least(&[(4.0, 10), (3.5, 5)]);
        assert_eq!(ladder.evaluate(f64::NAN), 0);
    }

    #[test]
    fn test_first_match_wins() {
        let ladder = ThresholdLadder::at_most(&[(3.0, 5), (5.0, 4)]);
        // 2.0 satisfies both rules; the first one decides
        assert_eq!(ladder.evaluate(2.0), 5);
        assert_eq!(ladder.evaluate(4.0), 4);
        assert_eq!(ladder.evaluate(6.0), 0);
    }

    #[test]
    fn test_fallback_is_configurable() {
        let mut ladder = ThresholdLadder::at_least(&[(98.0, 10), (95.0, 4)]);
        ladder.fallback = 1;
        assert_eq!(ladder.evaluate(50.0), 1);
        assert!(ladder.validate().is_ok());
    }

    #[test]
    fn test_validate_well_formed() {
        let ladder = ThresholdLadder::new(
            Direction::LowerIsBetter,
            vec![
                Rule::new(Bound::Below(10.0), 12),
                Rule::new(Bound::AtMost(15.0), 10),
            ],
            0,
        );
        assert!(ladder.validate().is_ok());
    }

    #[test]
    fn test_validate_empty() {
        let ladder = ThresholdLadder::at_least(&[]);
        let errors = ladder.validate().unwrap_err();
        assert!(errors[0].contains("no rules"));
    }

    #[test]
    fn test_validate_direction_mismatch() {
        let ladder = ThresholdLadder::new(
            Direction::HigherIsBetter,
            vec![Rule::new(Bound::AtMost(4.0), 10)],
            0,
        );
        let errors = ladder.validate().unwrap_err();
        assert!(errors[0].contains("higher-is-better"));
    }

    #[test]
    fn test_validate_out_of_order() {
        let ladder = ThresholdLadder::at_most(&[(23.0, 10), (22.0, 9)]);
        let errors = ladder.validate().unwrap_err();
        assert!(errors[0].contains("out of order"));
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut ladder = ThresholdLadder::at_least(&[(3.5, 5), (4.0, 10)]);
        ladder.fallback = 20;
        let errors = ladder.validate().unwrap_err();
        // out of order, rising points, fallback above last rule
        assert_eq!(errors.len(), 3);
    }
}
