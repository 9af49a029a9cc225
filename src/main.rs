use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use gain_weights::binning::{validate_boost, BoostMethod};
use gain_weights::config::{self, Config};
use gain_weights::export;
use gain_weights::{run_pipeline, PipelineOutcome};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_NO_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_EXPORT: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bin, boost and export the scores (default if no subcommand)
    Run(RunArgs),
    /// List the available boost methods
    Methods,
    /// Create a config file interactively
    Init,
}

#[derive(Args, Debug, Default, PartialEq)]
struct RunArgs {
    /// Input CSV with country scores
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Score column to bin (defaults to the last column)
    #[arg(long)]
    score_column: Option<String>,

    /// Boost method (see `methods`)
    #[arg(short, long)]
    method: Option<String>,

    /// Boost factor
    #[arg(short, long, allow_negative_numbers = true)]
    factor: Option<f64>,

    /// Number of histogram bins
    #[arg(short, long)]
    bins: Option<usize>,

    /// Directory for the exported CSV
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Draw the weight chart
    #[arg(long)]
    plot: bool,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Skip writing the export file
    #[arg(long)]
    no_export: bool,
}

#[derive(Parser, Debug)]
#[command(name = "gain-weights")]
#[command(about = "Turn ND-GAIN scores into boosted lottery weights", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/gain-weights/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "gain_weights=debug"
    } else {
        "gain_weights=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("Failed to initialize logging: {}", e);
    }
}

/// Command-line flags win over the config file
fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(ref input) = args.input {
        config.input.path = input.clone();
    }
    if let Some(ref column) = args.score_column {
        config.input.score_column = Some(column.clone());
    }
    if let Some(ref method) = args.method {
        config.boost.method = method.clone();
    }
    if let Some(factor) = args.factor {
        config.boost.factor = factor;
    }
    if let Some(bins) = args.bins {
        config.boost.num_bins = bins;
    }
    if let Some(ref dir) = args.output_dir {
        config.output.dir = dir.clone();
    }
    if args.plot {
        config.output.emit_plot = true;
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Run(cli.run));
    let config_path = cli.config.map(PathBuf::from);

    let code = match command {
        Commands::Methods => {
            for method in BoostMethod::ALL {
                println!("{:<15} {}", method.name(), method.description());
            }
            EXIT_SUCCESS
        }
        Commands::Init => match config::run_init_wizard(config_path) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_CONFIG
            }
        },
        Commands::Run(args) => run(config_path, &args),
    };

    std::process::exit(code);
}

fn run(config_path: Option<PathBuf>, args: &RunArgs) -> i32 {
    let start_time = Instant::now();

    let mut config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };
    apply_overrides(&mut config, args);

    // Validate boost parameters at startup
    if let Err(errors) = validate_boost(&config.boost) {
        eprintln!("Boost config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return EXIT_CONFIG;
    }

    let table = match gain_weights::data::load_score_table(
        &config.input.path,
        &config.input.column_spec(),
    ) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };
    debug!(
        "Loaded {} rows from {} (score column '{}')",
        table.len(),
        config.input.path.display(),
        table.score_column
    );

    let result = match run_pipeline(&table, &config.boost) {
        PipelineOutcome::Boosted(result) => result,
        PipelineOutcome::NoValidRows { excluded } => {
            eprintln!(
                "No valid data to process: all {} rows are missing '{}'",
                excluded, table.score_column
            );
            return EXIT_NO_DATA;
        }
        PipelineOutcome::NoData => {
            eprintln!("No valid data to create bins");
            return EXIT_NO_DATA;
        }
    };

    // Country lists use the full table, not just the cleaned rows
    let assignment = export::assign_countries(&result.boosted.bin_edges, &table.records);
    let use_colors = export::should_use_colors();

    if args.json {
        match export::format_json(&result.boosted, &result.multipliers, &assignment) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return EXIT_EXPORT;
            }
        }
    } else {
        println!(
            "{}",
            export::format_bin_table(&result.boosted, &assignment, use_colors)
        );
    }

    if config.output.emit_plot {
        println!();
        println!(
            "{}",
            export::format_chart(&result.boosted, &result.multipliers, use_colors)
        );
    }

    if args.no_export {
        info!("Export skipped (--no-export)");
    } else {
        let rows = export::build_export_rows(&result.boosted, &assignment);
        let file_name = export::export_file_name(
            &config.boost.method,
            result.boosted.num_bins(),
            config.boost.factor,
        );
        if let Err(e) = export::write_export(&config.output.dir, &file_name, &rows) {
            eprintln!("Export error: {:#}", e);
            return EXIT_EXPORT;
        }
    }

    if !assignment.unassigned.is_empty() {
        warn!(
            "{} scored countries are missing from the exported country lists",
            assignment.unassigned.len()
        );
    }

    debug!("Finished in {:?}", start_time.elapsed());
    EXIT_SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn run_args(argv: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command.unwrap_or(Commands::Run(cli.run)) {
            Commands::Run(args) => args,
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_flags_without_subcommand() {
        let args = run_args(&["gain-weights", "--method", "exponential", "-f", "-0.5", "--json"]);
        assert_eq!(args.method.as_deref(), Some("exponential"));
        assert_eq!(args.factor, Some(-0.5));
        assert!(args.json);
    }

    #[test]
    fn test_run_flags_with_subcommand() {
        let args = run_args(&["gain-weights", "-v", "run", "--bins", "4", "--no-export"]);
        assert_eq!(args.bins, Some(4));
        assert!(args.no_export);
    }

    #[test]
    fn test_no_arguments_runs_with_defaults() {
        assert_eq!(run_args(&["gain-weights"]), RunArgs::default());
    }

    #[test]
    fn test_global_flags_with_other_subcommands() {
        let cli = Cli::try_parse_from(["gain-weights", "-c", "cfg.yaml", "methods"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Methods)));
        assert_eq!(cli.config.as_deref(), Some("cfg.yaml"));
    }
}
