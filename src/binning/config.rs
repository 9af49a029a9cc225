use serde::{Deserialize, Serialize};

use super::boost::BoostMethod;
use super::histogram::DEFAULT_NUM_BINS;

/// Boost configuration.
///
/// Selects the weighting curve, its strength and the histogram resolution.
///
/// Example YAML:
/// ```yaml
/// boost:
///   method: exponential
///   factor: 0.9
///   num_bins: 10
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BoostConfig {
    /// Registered boost method name. Unknown names fall back to no boost.
    #[serde(default = "default_method")]
    pub method: String,

    /// Strength of the boost; meaning depends on the method
    #[serde(default = "default_factor")]
    pub factor: f64,

    /// Number of histogram bins
    #[serde(default = "default_num_bins")]
    pub num_bins: usize,
}

fn default_method() -> String {
    BoostMethod::Linear.name().to_string()
}

fn default_factor() -> f64 {
    1.0
}

fn default_num_bins() -> usize {
    DEFAULT_NUM_BINS
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            factor: default_factor(),
            num_bins: default_num_bins(),
        }
    }
}

impl BoostConfig {
    /// Resolve the configured name, warning on unknown names
    pub fn resolved_method(&self) -> BoostMethod {
        BoostMethod::resolve(&self.method)
    }
}
