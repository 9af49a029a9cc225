use serde::Serialize;
use tracing::warn;

use crate::binning::BoostedHistogram;
use crate::data::ScoreRecord;

/// Country codes per bin, plus scored countries that matched no bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinAssignment {
    pub bins: Vec<Vec<String>>,
    pub unassigned: Vec<String>,
}

impl BinAssignment {
    pub fn countries_in(&self, bin: usize) -> &[String] {
        self.bins.get(bin).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One row of the export table. There is one row per bin edge; the final
/// row has no weights and no countries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub bin_edge: f64,
    pub original_weight: Option<f64>,
    pub boosted_weight: Option<f64>,
    pub countries: Option<Vec<String>>,
}

/// Assign countries to bins with `edge[i] <= score < edge[i + 1]` for every
/// bin, the last one included. A country scoring exactly the top edge is
/// therefore in no bin; it is reported in `unassigned` and logged.
/// Records without a score never match.
pub fn assign_countries(bin_edges: &[f64], records: &[ScoreRecord]) -> BinAssignment {
    let num_bins = bin_edges.len().saturating_sub(1);
    let mut bins = vec![Vec::new(); num_bins];
    let mut unassigned = Vec::new();

    for record in records {
        let Some(score) = record.score.filter(|s| s.is_finite()) else {
            continue;
        };

        let mut placed = false;
        for (i, pair) in bin_edges.windows(2).enumerate() {
            if score >= pair[0] && score < pair[1] {
                bins[i].push(record.country_code.clone());
                placed = true;
            }
        }
        if !placed {
            unassigned.push(record.country_code.clone());
        }
    }

    if !unassigned.is_empty() {
        warn!(
            "Countries outside every export bin (top edge is exclusive): {}",
            unassigned.join(", ")
        );
    }

    BinAssignment { bins, unassigned }
}

/// Join edges, weights and country lists into export rows
pub fn build_export_rows(boosted: &BoostedHistogram, assignment: &BinAssignment) -> Vec<ExportRow> {
    boosted
        .bin_edges
        .iter()
        .enumerate()
        .map(|(i, &edge)| ExportRow {
            bin_edge: edge,
            original_weight: boosted.original_weights.get(i).copied(),
            boosted_weight: boosted.boosted_weights.get(i).copied(),
            countries: assignment.bins.get(i).cloned(),
        })
        .collect()
}
