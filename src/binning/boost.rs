use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Weighting curves that can be applied to a histogram.
///
/// Every curve is shaped to grow toward the high-index bins and is then
/// reversed, so bin 0 (lowest scores) receives the boost and the top bin
/// stays near its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoostMethod {
    None,
    Linear,
    Polynomial,
    Exponential,
    FlatThenRamp,
    FirstBinOnly,
}

/// Name registry. Aliases map to the same method.
const REGISTRY: &[(&str, BoostMethod)] = &[
    ("none", BoostMethod::None),
    ("linear", BoostMethod::Linear),
    ("polynomial", BoostMethod::Polynomial),
    ("exponential", BoostMethod::Exponential),
    ("flat_then_ramp", BoostMethod::FlatThenRamp),
    ("first_bin_only", BoostMethod::FirstBinOnly),
    ("just_boost_the_first_bin", BoostMethod::FirstBinOnly),
];

impl BoostMethod {
    pub const ALL: [BoostMethod; 6] = [
        BoostMethod::None,
        BoostMethod::Linear,
        BoostMethod::Polynomial,
        BoostMethod::Exponential,
        BoostMethod::FlatThenRamp,
        BoostMethod::FirstBinOnly,
    ];

    /// Look up a method by registered name (case-insensitive)
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        REGISTRY
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, method)| *method)
    }

    /// Look up a method, falling back to `None` (no boost) with a warning
    /// when the name is not registered.
    pub fn resolve(name: &str) -> Self {
        Self::lookup(name).unwrap_or_else(|| {
            warn!("Boost method '{}' not found, applying no boost", name);
            BoostMethod::None
        })
    }

    /// Canonical registry name
    pub fn name(self) -> &'static str {
        match self {
            BoostMethod::None => "none",
            BoostMethod::Linear => "linear",
            BoostMethod::Polynomial => "polynomial",
            BoostMethod::Exponential => "exponential",
            BoostMethod::FlatThenRamp => "flat_then_ramp",
            BoostMethod::FirstBinOnly => "first_bin_only",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BoostMethod::None => "no boost, weights pass through unchanged",
            BoostMethod::Linear => "factor * i + 1, so no bin drops to zero",
            BoostMethod::Polynomial => "i ^ factor, top bin multiplier is 0",
            BoostMethod::Exponential => "exp(factor * i), top bin multiplier is 1",
            BoostMethod::FlatThenRamp => "flat for the upper two thirds, ramps up by factor over the lowest third",
            BoostMethod::FirstBinOnly => "multiplies the lowest-score bin by factor",
        }
    }

    /// Per-bin multipliers for `num_bins` bins, already reversed so that
    /// index 0 is the lowest-score bin.
    pub fn multipliers(self, num_bins: usize, factor: f64) -> Vec<f64> {
        let mut curve: Vec<f64> = match self {
            BoostMethod::None => vec![1.0; num_bins],
            BoostMethod::Linear => (0..num_bins).map(|i| factor * i as f64 + 1.0).collect(),
            BoostMethod::Polynomial => (0..num_bins).map(|i| (i as f64).powf(factor)).collect(),
            BoostMethod::Exponential => (0..num_bins).map(|i| (factor * i as f64).exp()).collect(),
            BoostMethod::FlatThenRamp => flat_then_ramp(num_bins, factor),
            BoostMethod::FirstBinOnly => first_bin_only(num_bins, factor),
        };
        curve.reverse();

        debug!("Boost array ({}, factor {}): {:?}", self, factor, curve);
        curve
    }
}

impl fmt::Display for BoostMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 1 across the first two thirds of the bins, then a ramp reaching
/// `1 + factor` just past the end.
fn flat_then_ramp(num_bins: usize, factor: f64) -> Vec<f64> {
    let n = num_bins as f64;
    let flat_until = (2.0 / 3.0) * n;
    let ramp_span = (1.0 / 3.0) * n;
    (0..num_bins)
        .map(|i| {
            let i = i as f64;
            if i < flat_until {
                1.0
            } else {
                1.0 + factor * (i - flat_until) / ramp_span
            }
        })
        .collect()
}

/// `factor` on bins at or past the threshold, 1 elsewhere. The threshold is
/// computed from the edge count (`num_bins + 1`), which leaves exactly the
/// final bin above it for any bin count.
fn first_bin_only(num_bins: usize, factor: f64) -> Vec<f64> {
    let edges = (num_bins + 1) as f64;
    let threshold = ((edges - 1.0) / edges) * num_bins as f64 - 1.0;
    (0..num_bins)
        .map(|i| if (i as f64) < threshold { 1.0 } else { factor })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_lookup_registered_names() {
        assert_eq!(BoostMethod::lookup("linear"), Some(BoostMethod::Linear));
        assert_eq!(BoostMethod::lookup("Exponential"), Some(BoostMethod::Exponential));
        assert_eq!(BoostMethod::lookup(" flat_then_ramp "), Some(BoostMethod::FlatThenRamp));
        assert_eq!(
            BoostMethod::lookup("just_boost_the_first_bin"),
            Some(BoostMethod::FirstBinOnly)
        );
        assert_eq!(BoostMethod::lookup("sigmoid"), None);
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        assert_eq!(BoostMethod::resolve("sigmoid"), BoostMethod::None);
        assert_eq!(BoostMethod::resolve("polynomial"), BoostMethod::Polynomial);
    }

    #[test]
    fn test_every_method_name_round_trips_through_registry() {
        for method in BoostMethod::ALL {
            assert_eq!(BoostMethod::lookup(method.name()), Some(method));
        }
    }

    #[test]
    fn test_none_is_all_ones() {
        assert_eq!(BoostMethod::None.multipliers(4, 7.0), vec![1.0; 4]);
    }

    #[test]
    fn test_linear_is_reversed_with_floor() {
        let m = BoostMethod::Linear.multipliers(4, 1.0);
        assert_close(&m, &[4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_polynomial_top_bin_is_zero() {
        let m = BoostMethod::Polynomial.multipliers(4, 2.0);
        assert_close(&m, &[9.0, 4.0, 1.0, 0.0]);
    }

    #[test]
    fn test_exponential_top_bin_is_one() {
        let m = BoostMethod::Exponential.multipliers(3, 0.5);
        assert_close(&m, &[1.0f64.exp(), 0.5f64.exp(), 1.0]);
        assert_eq!(m[2], 1.0);
    }

    #[test]
    fn test_flat_then_ramp_ten_bins() {
        let m = BoostMethod::FlatThenRamp.multipliers(10, 4.0);
        // Pre-reversal bins 7, 8, 9 ramp: offsets 1/3, 4/3, 7/3 over a span of 10/3
        assert_close(&m[..3], &[1.0 + 4.0 * 0.7, 1.0 + 4.0 * 0.4, 1.0 + 4.0 * 0.1]);
        assert!(m[3..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_flat_region_ignores_factor() {
        let a = BoostMethod::FlatThenRamp.multipliers(9, 1.0);
        let b = BoostMethod::FlatThenRamp.multipliers(9, 50.0);
        assert_eq!(a[3..], b[3..]);
    }

    #[test]
    fn test_first_bin_only_four_bins() {
        let m = BoostMethod::FirstBinOnly.multipliers(4, 2.0);
        assert_eq!(m, vec![2.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_first_bin_only_boosts_exactly_one_bin() {
        for bins in 1..=20 {
            let m = BoostMethod::FirstBinOnly.multipliers(bins, 3.0);
            assert_eq!(m[0], 3.0, "bins={}", bins);
            assert_eq!(m.iter().filter(|&&v| v != 1.0).count(), 1, "bins={}", bins);
        }
    }

    #[test]
    fn test_multiplier_length_matches_bins() {
        for method in BoostMethod::ALL {
            for bins in 1..=12 {
                assert_eq!(method.multipliers(bins, 1.5).len(), bins);
            }
        }
    }

    #[test]
    fn test_display_uses_registry_name() {
        assert_eq!(BoostMethod::FlatThenRamp.to_string(), "flat_then_ramp");
    }
}
