use serde::Serialize;
use tracing::{debug, info};

use super::boost::BoostMethod;
use super::histogram::Histogram;

/// A histogram after boosting and renormalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoostedHistogram {
    pub method: BoostMethod,
    pub factor: f64,
    pub bin_edges: Vec<f64>,
    pub original_weights: Vec<f64>,
    pub boosted_weights: Vec<f64>,
}

impl BoostedHistogram {
    pub fn num_bins(&self) -> usize {
        self.boosted_weights.len()
    }

    /// Sum of the boosted weights; 1.0 up to rounding
    pub fn checksum(&self) -> f64 {
        self.boosted_weights.iter().sum()
    }
}

/// Boost a histogram with `method` and renormalize the result.
///
/// `BoostMethod::None` returns the original weights untouched.
pub fn boost_histogram(histogram: &Histogram, method: BoostMethod, factor: f64) -> BoostedHistogram {
    let multipliers = method.multipliers(histogram.num_bins(), factor);
    boost_with_multipliers(histogram, method, factor, &multipliers)
}

/// Like `boost_histogram`, with the multiplier sequence already computed by
/// `method.multipliers(num_bins, factor)`.
pub fn boost_with_multipliers(
    histogram: &Histogram,
    method: BoostMethod,
    factor: f64,
    multipliers: &[f64],
) -> BoostedHistogram {
    let original = &histogram.bin_weights;

    let boosted_weights = if method == BoostMethod::None {
        original.clone()
    } else {
        let raw = apply_multipliers(original, multipliers);
        debug!("Counts: {:?}", original);
        debug!("Boosted counts: {:?}", raw);
        normalize_preserve_relative_min(original, &raw)
    };

    let boosted = BoostedHistogram {
        method,
        factor,
        bin_edges: histogram.bin_edges.clone(),
        original_weights: original.clone(),
        boosted_weights,
    };

    debug!("Normalized boosted counts: {:?}", boosted.boosted_weights);
    info!("Checksum after boost: {}", boosted.checksum());
    boosted
}

/// Elementwise product of weights and multipliers
pub fn apply_multipliers(weights: &[f64], multipliers: &[f64]) -> Vec<f64> {
    debug_assert_eq!(weights.len(), multipliers.len());
    weights.iter().zip(multipliers).map(|(w, m)| w * m).collect()
}

/// Renormalize boosted counts so they sum to 1 while the min/max ratio of the
/// result matches the min/max ratio of the `original` weights.
///
/// The boosted counts are rescaled to `[0, 1]` using their own range, mapped
/// onto `[orig_min / orig_max, 1]`, then divided by their sum. Constant
/// boosted counts have no range to rescale and yield a uniform distribution.
pub fn normalize_preserve_relative_min(original: &[f64], boosted: &[f64]) -> Vec<f64> {
    if boosted.is_empty() {
        return Vec::new();
    }

    let (scaled_min, scaled_max) = min_max(boosted);
    if scaled_max == scaled_min {
        debug!("Boosted counts have no range, falling back to uniform weights");
        return uniform(boosted.len());
    }

    let (orig_min, orig_max) = min_max(original);
    let target_ratio = if orig_max != orig_min {
        orig_min / orig_max
    } else {
        1.0
    };

    let adjusted: Vec<f64> = boosted
        .iter()
        .map(|v| {
            let normalized = (v - scaled_min) / (scaled_max - scaled_min);
            normalized * (1.0 - target_ratio) + target_ratio
        })
        .collect();

    let sum: f64 = adjusted.iter().sum();
    adjusted.iter().map(|v| v / sum).collect()
}

fn uniform(len: usize) -> Vec<f64> {
    vec![1.0 / len as f64; len]
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
