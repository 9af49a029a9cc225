use tracing::{info, warn};

use crate::binning::{
    bin_and_normalize, boost_with_multipliers, BoostConfig, BoostedHistogram, Histogram,
};
use crate::data::{clean_scores, CleanedScores, ScoreTable};

/// Everything a successful run produces
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub cleaned: CleanedScores,
    pub histogram: Histogram,
    pub boosted: BoostedHistogram,
    pub multipliers: Vec<f64>,
}

/// Outcome of a run. Only `Boosted` carries weights; the other variants are
/// reportable conditions, not failures.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    Boosted(PipelineResult),
    /// Every row was missing its score
    NoValidRows { excluded: usize },
    /// Rows survived cleaning but nothing could be binned
    NoData,
}

/// Clean, bin and boost a score table.
///
/// This function is called from main.rs for each run; it performs no I/O
/// besides logging.
pub fn run_pipeline(table: &ScoreTable, config: &BoostConfig) -> PipelineOutcome {
    let cleaned = clean_scores(table);
    if !cleaned.has_data() {
        warn!("No valid data to process");
        return PipelineOutcome::NoValidRows {
            excluded: cleaned.excluded.len(),
        };
    }

    let Some(histogram) = bin_and_normalize(&cleaned.scores(), config.num_bins) else {
        warn!("No valid data to create bins");
        return PipelineOutcome::NoData;
    };

    let method = config.resolved_method();
    info!(
        "Applying {} boost (factor {}) to {} bins",
        method,
        config.factor,
        histogram.num_bins()
    );

    let multipliers = method.multipliers(histogram.num_bins(), config.factor);
    let boosted = boost_with_multipliers(&histogram, method, config.factor, &multipliers);

    PipelineOutcome::Boosted(PipelineResult {
        cleaned,
        histogram,
        boosted,
        multipliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::BoostMethod;
    use crate::data::ScoreRecord;

    fn table(scores: &[Option<f64>]) -> ScoreTable {
        ScoreTable::new(
            "2022",
            scores
                .iter()
                .enumerate()
                .map(|(i, s)| ScoreRecord::new(format!("C{:02}", i), format!("Country {}", i), *s))
                .collect(),
        )
    }

    fn config(method: &str, factor: f64, num_bins: usize) -> BoostConfig {
        BoostConfig {
            method: method.to_string(),
            factor,
            num_bins,
        }
    }

    #[test]
    fn test_full_pipeline() {
        let input = table(&[
            Some(30.0),
            Some(35.0),
            None,
            Some(41.0),
            Some(47.5),
            Some(52.0),
            Some(60.0),
            None,
            Some(68.0),
        ]);
        let outcome = run_pipeline(&input, &config("linear", 1.0, 4));

        let PipelineOutcome::Boosted(result) = outcome else {
            panic!("expected boosted outcome");
        };
        assert_eq!(result.cleaned.clean.len(), 7);
        assert_eq!(result.cleaned.excluded.len(), 2);
        assert_eq!(result.histogram.counts.iter().sum::<usize>(), 7);
        assert_eq!(result.boosted.method, BoostMethod::Linear);
        assert_eq!(result.multipliers, vec![4.0, 3.0, 2.0, 1.0]);
        assert!((result.boosted.checksum() - 1.0).abs() < 1e-9);
        assert_eq!(result.boosted.bin_edges.len(), 5);
        assert_eq!(
            result.boosted,
            crate::binning::boost_histogram(&result.histogram, BoostMethod::Linear, 1.0)
        );
    }

    #[test]
    fn test_none_method_keeps_weights() {
        let input = table(&[Some(1.0), Some(2.0), Some(2.0), Some(9.0)]);
        let PipelineOutcome::Boosted(result) = run_pipeline(&input, &config("none", 3.0, 3)) else {
            panic!("expected boosted outcome");
        };
        assert_eq!(result.boosted.boosted_weights, result.histogram.bin_weights);
    }

    #[test]
    fn test_unknown_method_keeps_weights() {
        let input = table(&[Some(1.0), Some(2.0), Some(2.0), Some(9.0)]);
        let PipelineOutcome::Boosted(result) = run_pipeline(&input, &config("wobble", 3.0, 3)) else {
            panic!("expected boosted outcome");
        };
        assert_eq!(result.boosted.method, BoostMethod::None);
        assert_eq!(result.boosted.boosted_weights, result.histogram.bin_weights);
    }

    #[test]
    fn test_all_missing_is_no_valid_rows() {
        let input = table(&[None, None, None]);
        match run_pipeline(&input, &BoostConfig::default()) {
            PipelineOutcome::NoValidRows { excluded } => assert_eq!(excluded, 3),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_zero_bins_is_no_data() {
        let input = table(&[Some(1.0), Some(2.0)]);
        assert!(matches!(
            run_pipeline(&input, &config("linear", 1.0, 0)),
            PipelineOutcome::NoData
        ));
    }
}
