use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::table::ExportRow;
use crate::binning::BoostMethod;

pub const EXPORT_HEADER: [&str; 4] = [
    "bin_edges",
    "original_counts",
    "boosted_counts",
    "countries_in_bin_ISO3",
];

/// Export file name derived from the run parameters, e.g.
/// `boosted_data_boost_method_linear_num_bins_10_bins_boosted_by_1.csv`
pub fn export_file_name(method: &str, num_bins: usize, factor: f64) -> String {
    format!(
        "boosted_data_boost_method_{}_num_bins_{}_bins_boosted_by_{}.csv",
        method_file_label(method),
        num_bins,
        factor
    )
}

/// Registered names map to their canonical name. Unknown names are kept
/// visible with every character outside `[A-Za-z0-9_.-]` replaced by `_`.
fn method_file_label(method: &str) -> String {
    match BoostMethod::lookup(method) {
        Some(m) => m.name().to_string(),
        None => method
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect(),
    }
}

/// Render a country list as a bracketed, quoted list: `['AFG', 'ALB']`
pub fn format_country_list(countries: &[String]) -> String {
    let quoted: Vec<String> = countries.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write export rows as CSV to any writer
pub fn write_export_csv<W: Write>(writer: W, rows: &[ExportRow]) -> Result<W> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADER)
        .context("Failed to write export header")?;

    for row in rows {
        wtr.write_record(&[
            row.bin_edge.to_string(),
            format_optional(row.original_weight),
            format_optional(row.boosted_weight),
            row.countries
                .as_deref()
                .map(format_country_list)
                .unwrap_or_default(),
        ])
        .context("Failed to write export row")?;
    }

    wtr.flush().context("Failed to flush export rows")?;
    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish export: {}", e.error()))
}

/// Write the export table into `dir` atomically and return the file path.
///
/// Creates `dir` if it doesn't exist.
pub fn write_export(dir: &Path, file_name: &str, rows: &[ExportRow]) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory at {}", dir.display()))?;
    }

    let path = dir.join(file_name);
    let file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    let file = write_export_csv(file, rows)?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    info!("Exported data to {}", path.display());
    Ok(path)
}
