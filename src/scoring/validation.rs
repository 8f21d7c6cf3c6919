use super::config::{LadderConfig, LadderOverrides};
use super::ladder::Bound;
use super::variant::{Variant, VariantConfig};

/// Outlet names across every built-in variant, first appearance order.
pub fn known_outlets() -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for variant in [Variant::TwoOutlet, Variant::ThreeOutlet] {
        for outlet in VariantConfig::for_variant(variant).outlets {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&outlet.name)) {
                names.push(outlet.name);
            }
        }
    }
    names
}

/// Validate ladder overrides.
///
/// One config serves every variant, so a cost ladder only has to name an
/// outlet of some built-in variant. Returns all validation errors at once
/// (not just the first).
pub fn validate_overrides(overrides: &LadderOverrides) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, config) in overrides.shared() {
        if let Some(config) = config {
            validate_ladder_config(&mut errors, &format!("ladders.{}", name), config);
        }
    }

    if let Some(ref cost) = overrides.cost {
        let known = known_outlets();
        let mut seen: Vec<&str> = Vec::new();
        for (outlet_name, config) in cost {
            let path = format!("ladders.cost.{}", outlet_name);
            if !known.iter().any(|k| k.eq_ignore_ascii_case(outlet_name)) {
                errors.push(format!(
                    "{}: unknown outlet (expected one of: {})",
                    path,
                    known.join(", ")
                ));
            }
            // Outlet names match case-insensitively
            if let Some(first) = seen.iter().find(|s| s.eq_ignore_ascii_case(outlet_name)) {
                errors.push(format!("{}: duplicate of '{}'", path, first));
            }
            seen.push(outlet_name);
            validate_ladder_config(&mut errors, &path, config);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_ladder_config(errors: &mut Vec<String>, path: &str, config: &LadderConfig) {
    let mut parsed_all = true;
    for (i, rule) in config.rules.iter().enumerate() {
        if let Err(e) = Bound::parse(&rule.when) {
            parsed_all = false;
            errors.push(format!(
                "{}.rules[{}].when: invalid '{}' - {}",
                path, i, rule.when, e
            ));
        }
    }

    // Shape checks only make sense once every bound parsed
    if parsed_all {
        if let Ok(ladder) = config.to_ladder() {
            if let Err(shape_errors) = ladder.validate() {
                errors.extend(shape_errors.into_iter().map(|e| format!("{}: {}", path, e)));
            }
        }
    }
}
