use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use super::types::{ScoreRecord, ScoreTable};

/// Column selection for reading a score table
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub code_column: String,
    pub name_column: String,
    /// Score column name. When None, the last column of the file is used.
    pub score_column: Option<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            code_column: "ISO3".to_string(),
            name_column: "Name".to_string(),
            score_column: None,
        }
    }
}

/// Load a score table from a CSV file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - A required column is missing from the header
/// - A row cannot be parsed as CSV
pub fn load_score_table(path: &Path, columns: &ColumnSpec) -> Result<ScoreTable> {
    if !path.exists() {
        bail!("Input file not found at {}", path.display());
    }

    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file at {}", path.display()))?;

    read_score_table(file, columns)
        .with_context(|| format!("Failed to load score table from {}", path.display()))
}

/// Read a score table from any CSV source
pub fn read_score_table<R: Read>(reader: R, columns: &ColumnSpec) -> Result<ScoreTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV file has no columns");
    }

    let code_idx = find_column(&headers, &columns.code_column)?;
    let name_idx = find_column(&headers, &columns.name_column)?;
    let score_idx = match columns.score_column {
        Some(ref name) => find_column(&headers, name)?,
        None => headers.len() - 1,
    };
    let score_column = headers[score_idx].clone();

    debug!(
        "Reading score column '{}' (code: '{}', name: '{}')",
        score_column, columns.code_column, columns.name_column
    );

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV row {}", row + 1))?;
        let code = record.get(code_idx).unwrap_or_default();
        let name = record.get(name_idx).unwrap_or_default();
        let raw = record.get(score_idx).unwrap_or_default();

        let score = parse_score(raw);
        if score.is_none() && !is_missing_marker(raw) {
            warn!("{}: unreadable score '{}' treated as missing", code, raw);
        }

        records.push(ScoreRecord::new(code, name, score));
    }

    Ok(ScoreTable::new(score_column, records))
}

fn find_column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("Column '{}' not found (available: {})", name, headers.join(", ")))
}

/// Parse a score cell. Empty cells, missing markers and non-finite numbers are None.
fn parse_score(raw: &str) -> Option<f64> {
    if is_missing_marker(raw) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn is_missing_marker(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty()
        || raw.eq_ignore_ascii_case("nan")
        || raw.eq_ignore_ascii_case("na")
        || raw.eq_ignore_ascii_case("null")
}
