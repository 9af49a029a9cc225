use tracing::info;

use super::types::{ScoreRecord, ScoreTable};

/// Result of splitting a table on score availability.
///
/// `clean` and `excluded` partition the input: every record lands in exactly
/// one of them, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedScores {
    pub clean: Vec<ScoreRecord>,
    pub excluded: Vec<ScoreRecord>,
}

impl CleanedScores {
    /// Number of records before cleaning
    pub fn original_len(&self) -> usize {
        self.clean.len() + self.excluded.len()
    }

    /// False when no usable rows remain. Callers must check before binning.
    pub fn has_data(&self) -> bool {
        !self.clean.is_empty()
    }

    /// Scores of the clean rows, in input order
    pub fn scores(&self) -> Vec<f64> {
        self.clean.iter().filter_map(|r| r.score).collect()
    }
}

/// Split a table into rows with a usable score and rows without one.
/// Logs counts and the excluded countries.
pub fn clean_scores(table: &ScoreTable) -> CleanedScores {
    let (clean, excluded): (Vec<ScoreRecord>, Vec<ScoreRecord>) = table
        .records
        .iter()
        .cloned()
        .partition(ScoreRecord::has_score);

    let cleaned = CleanedScores { clean, excluded };
    report(&cleaned, &table.score_column);
    cleaned
}

fn report(cleaned: &CleanedScores, column: &str) {
    info!("Original data length: {}", cleaned.original_len());
    info!(
        "Clean data length (after removing missing '{}'): {}",
        column,
        cleaned.clean.len()
    );
    info!("Filtered out rows: {}", cleaned.excluded.len());

    if !cleaned.excluded.is_empty() {
        let labels: Vec<String> = cleaned.excluded.iter().map(ScoreRecord::label).collect();
        info!("Filtered out countries (missing values): {}", labels.join(", "));
    }
}
