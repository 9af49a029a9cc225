use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use super::table::BinAssignment;
use crate::binning::BoostedHistogram;

/// Default chart width when there is no terminal (pipes)
const DEFAULT_CHART_WIDTH: usize = 80;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Format a weight as a percentage with one decimal ("12.5%")
pub fn format_weight(weight: f64) -> String {
    format!("{:.1}%", weight * 100.0)
}

/// Format the boosted histogram as a table, one line per bin.
/// Columns: index, score range, original weight, boosted weight, country count
pub fn format_bin_table(
    boosted: &BoostedHistogram,
    assignment: &BinAssignment,
    use_colors: bool,
) -> String {
    if boosted.num_bins() == 0 {
        return "No bins to show.".to_string();
    }

    let header = format!(
        "{:>3} {:>17}  {:>8}  {:>8}  {:>9}",
        "#", "range", "original", "boosted", "countries"
    );
    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };

    let mut lines = vec![header];
    for i in 0..boosted.num_bins() {
        let index_str = format!("{:>2}.", i + 1);
        let range = format!(
            "{:>7.2} - {:>7.2}",
            boosted.bin_edges[i],
            boosted.bin_edges[i + 1]
        );
        let original = format!("{:>8}", format_weight(boosted.original_weights[i]));
        let boosted_str = format!("{:>8}", format_weight(boosted.boosted_weights[i]));
        let count = format!("{:>9}", assignment.countries_in(i).len());

        let line = if use_colors {
            let boosted_str = if boosted.boosted_weights[i] > boosted.original_weights[i] {
                boosted_str.green().to_string()
            } else if boosted.boosted_weights[i] < boosted.original_weights[i] {
                boosted_str.red().to_string()
            } else {
                boosted_str
            };
            format!(
                "{} {}  {}  {}  {}",
                index_str.dimmed(),
                range.cyan(),
                original,
                boosted_str.bold(),
                count
            )
        } else {
            format!("{} {}  {}  {}  {}", index_str, range, original, boosted_str, count)
        };
        lines.push(line);
    }

    lines.join("\n")
}

/// Draw original and boosted weights as horizontal bars, with the boost
/// curve scaled to `multiplier / max / 10` beside each bin.
pub fn format_chart(boosted: &BoostedHistogram, multipliers: &[f64], use_colors: bool) -> String {
    let width = get_terminal_width().unwrap_or(DEFAULT_CHART_WIDTH);
    render_chart(boosted, multipliers, width, use_colors)
}

fn render_chart(
    boosted: &BoostedHistogram,
    multipliers: &[f64],
    width: usize,
    use_colors: bool,
) -> String {
    if boosted.num_bins() == 0 {
        return "No bins to show.".to_string();
    }

    // Label "  1. 26.00 " and curve column " curve 0.100" take ~24 chars
    let bar_width = width.saturating_sub(24).max(10);
    let peak = boosted
        .original_weights
        .iter()
        .chain(&boosted.boosted_weights)
        .copied()
        .fold(0.0_f64, f64::max);
    let curve_max = multipliers.iter().copied().fold(0.0_f64, f64::max);

    let bar = |weight: f64| -> String {
        let len = if peak > 0.0 {
            ((weight / peak) * bar_width as f64).round() as usize
        } else {
            0
        };
        "#".repeat(len)
    };

    let title = format!(
        "{} boost, factor {} ({} bins)",
        boosted.method, boosted.factor, boosted.num_bins()
    );
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    for i in 0..boosted.num_bins() {
        let label = format!("{:>3}. {:>7.2}", i + 1, boosted.bin_edges[i]);
        let curve = match multipliers.get(i) {
            Some(m) if curve_max > 0.0 => format!("{:.3}", m / curve_max / 10.0),
            _ => "-".to_string(),
        };
        let original = bar(boosted.original_weights[i]);
        let boosted_bar = bar(boosted.boosted_weights[i]);

        if use_colors {
            lines.push(format!("{} {} curve {}", label.dimmed(), original.blue(), curve.dimmed()));
            lines.push(format!("{:>11} {}", "", boosted_bar.red()));
        } else {
            lines.push(format!("{} o {} curve {}", label, original, curve));
            lines.push(format!("{:>11} b {}", "", boosted_bar));
        }
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    histogram: &'a BoostedHistogram,
    multipliers: &'a [f64],
    assignment: &'a BinAssignment,
}

/// Pretty JSON with the boosted histogram, multipliers and bin assignment
pub fn format_json(
    boosted: &BoostedHistogram,
    multipliers: &[f64],
    assignment: &BinAssignment,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonSummary {
        histogram: boosted,
        multipliers,
        assignment,
    })
}
