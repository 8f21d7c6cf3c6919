use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::{LadderOverrides, Variant};

/// Contents of `config.yaml`. Every field is optional.
///
/// Example YAML:
/// ```yaml
/// variant: three-outlet
/// store_path: /var/lib/scorecard/scorecards.json
/// ladders:
///   activity:
///     direction: higher-is-better
///     rules:
///       - { when: ">=99", points: 10 }
///       - { when: ">=97", points: 6 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Variant used when a command does not name one (default: two-outlet)
    #[serde(default)]
    pub variant: Option<Variant>,

    /// Scorecard store location (default: ~/.config/manager-scorecard/scorecards.json)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    #[serde(default)]
    pub ladders: Option<LadderOverrides>,
}

impl Config {
    pub fn variant(&self) -> Variant {
        self.variant.unwrap_or_default()
    }
}
