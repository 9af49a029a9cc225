use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_NUM_BINS: usize = 10;

/// Equal-width histogram over a set of scores.
///
/// `bin_edges` has one more entry than `bin_weights`. Bin `i` covers
/// `[bin_edges[i], bin_edges[i + 1])`, except the last bin which is closed on
/// both ends so the maximum score is never dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bin_edges: Vec<f64>,
    pub bin_weights: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn num_bins(&self) -> usize {
        self.bin_weights.len()
    }

    /// Bin index for a value, using the closed-right last bin.
    /// Returns None for values outside the edge range or non-finite values.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        locate_bin(&self.bin_edges, value)
    }
}

/// Bin scores into `num_bins` equal-width bins and normalize counts to proportions.
///
/// Non-finite values are dropped. Returns None when nothing is left to bin or
/// `num_bins` is zero.
pub fn bin_and_normalize(scores: &[f64], num_bins: usize) -> Option<Histogram> {
    let values: Vec<f64> = scores.iter().copied().filter(|v| v.is_finite()).collect();
    if values.len() != scores.len() {
        warn!(
            "Dropped {} non-finite scores before binning",
            scores.len() - values.len()
        );
    }

    if values.is_empty() {
        warn!("No valid data after removing missing values");
        return None;
    }
    if num_bins == 0 {
        warn!("Cannot build a histogram with zero bins");
        return None;
    }

    debug!("Creating histogram from {} scores in {} bins", values.len(), num_bins);

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bin_edges = equal_width_edges(min, max, num_bins);

    let mut counts = vec![0usize; num_bins];
    for &v in &values {
        if let Some(idx) = locate_bin(&bin_edges, v) {
            counts[idx] += 1;
        }
    }

    let total: usize = counts.iter().sum();
    let bin_weights = counts.iter().map(|&c| c as f64 / total as f64).collect();

    Some(Histogram {
        bin_edges,
        bin_weights,
        counts,
    })
}

/// `num_bins + 1` evenly spaced edges from `min` to `max`.
/// A zero-width range is widened by 0.5 on each side.
fn equal_width_edges(min: f64, max: f64, num_bins: usize) -> Vec<f64> {
    let (first, last) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    let step = (last - first) / num_bins as f64;
    let mut edges: Vec<f64> = (0..=num_bins).map(|i| first + i as f64 * step).collect();
    // Pin the top edge so the maximum is exactly representable
    edges[num_bins] = last;
    edges
}

/// Find the bin for `value`: half-open bins, last bin closed on the right.
fn locate_bin(edges: &[f64], value: f64) -> Option<usize> {
    let num_bins = edges.len().checked_sub(1)?;
    if num_bins == 0 || !value.is_finite() {
        return None;
    }
    let (first, last) = (edges[0], edges[num_bins]);
    if value < first || value > last {
        return None;
    }

    // Estimate from the step, then correct against the stored edges so
    // values sitting on an edge go to the bin that starts there.
    let norm = num_bins as f64 / (last - first);
    let mut idx = (((value - first) * norm) as usize).min(num_bins - 1);
    while idx > 0 && value < edges[idx] {
        idx -= 1;
    }
    while idx < num_bins - 1 && value >= edges[idx + 1] {
        idx += 1;
    }
    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_score_per_bin() {
        let scores: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let hist = bin_and_normalize(&scores, 10).unwrap();

        assert_eq!(hist.bin_edges.len(), 11);
        assert_eq!(hist.bin_weights.len(), 10);
        assert_eq!(hist.bin_edges[0], 1.0);
        assert_eq!(hist.bin_edges[10], 10.0);
        for w in &hist.bin_weights {
            assert!((w - 0.1).abs() < 1e-12);
        }
        for pair in hist.bin_edges.windows(2) {
            assert!(((pair[1] - pair[0]) - 0.9).abs() < 1e-9);
        }
    }

    #[test]
    fn test_maximum_lands_in_last_bin() {
        let scores = vec![0.0, 0.0, 0.0, 10.0];
        let hist = bin_and_normalize(&scores, 5).unwrap();
        assert_eq!(hist.counts, vec![3, 0, 0, 0, 1]);
        assert_eq!(hist.bin_index(10.0), Some(4));
    }

    #[test]
    fn test_edge_value_goes_to_upper_bin() {
        let scores = vec![0.0, 5.0, 10.0];
        let hist = bin_and_normalize(&scores, 2).unwrap();
        // 5.0 sits on the middle edge and belongs to the second bin
        assert_eq!(hist.counts, vec![1, 2]);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let scores = vec![31.2, 45.5, 50.1, 52.3, 60.0, 61.7, 70.4, 33.3, 38.9];
        for bins in 1..=12 {
            let hist = bin_and_normalize(&scores, bins).unwrap();
            let sum: f64 = hist.bin_weights.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "bins={} sum={}", bins, sum);
            assert_eq!(hist.bin_edges.len(), hist.bin_weights.len() + 1);
        }
    }

    #[test]
    fn test_edges_strictly_increasing() {
        let scores = vec![2.0, 3.5, 9.0];
        let hist = bin_and_normalize(&scores, 7).unwrap();
        assert!(hist.bin_edges.windows(2).all(|p| p[0] < p[1]));
    }

    #[test]
    fn test_constant_scores_widen_range() {
        let hist = bin_and_normalize(&[4.0, 4.0, 4.0], 2).unwrap();
        assert_eq!(hist.bin_edges, vec![3.5, 4.0, 4.5]);
        assert_eq!(hist.counts, vec![0, 3]);
        assert_eq!(hist.bin_weights, vec![0.0, 1.0]);
    }

    #[test]
    fn test_empty_input_is_none() {
        assert!(bin_and_normalize(&[], 10).is_none());
    }

    #[test]
    fn test_nan_only_input_is_none() {
        assert!(bin_and_normalize(&[f64::NAN, f64::NAN], 10).is_none());
    }

    #[test]
    fn test_embedded_nan_is_filtered() {
        let hist = bin_and_normalize(&[1.0, f64::NAN, 3.0], 2).unwrap();
        assert_eq!(hist.counts, vec![1, 1]);
        assert_eq!(hist.bin_weights, vec![0.5, 0.5]);
    }

    #[test]
    fn test_zero_bins_is_none() {
        assert!(bin_and_normalize(&[1.0, 2.0], 0).is_none());
    }

    #[test]
    fn test_bin_index_out_of_range() {
        let hist = bin_and_normalize(&[1.0, 2.0], 2).unwrap();
        assert_eq!(hist.bin_index(0.5), None);
        assert_eq!(hist.bin_index(2.5), None);
        assert_eq!(hist.bin_index(f64::NAN), None);
        assert_eq!(hist.bin_index(1.0), Some(0));
    }
}
