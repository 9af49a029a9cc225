use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::binning::{validate_boost, BoostConfig, BoostMethod};
use crate::config::{get_config_path, Config, InputConfig, OutputConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Check a method name typed into the wizard against the registry.
fn parse_method_input(input: &str) -> Result<BoostMethod, String> {
    BoostMethod::lookup(input).ok_or_else(|| {
        let names: Vec<&str> = BoostMethod::ALL.iter().map(|m| m.name()).collect();
        format!("unknown method '{}', expected one of: {}", input, names.join(", "))
    })
}

/// Serialize a config and write it to `path`, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, &yaml)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("GAIN Weights Configuration Wizard");
    println!("=================================");
    println!();

    let input_defaults = InputConfig::default();
    let boost_defaults = BoostConfig::default();

    // 1. Input
    println!("The input is the ND-GAIN country index CSV (gain.csv from the ND-GAIN download).");
    let path = prompt_with_default(
        "Input CSV path",
        &input_defaults.path.display().to_string(),
    )?;
    println!("Leave the score column empty to use the last column (the latest year).");
    let score_column = prompt("Score column []: ")?;
    let score_column = if score_column.is_empty() {
        None
    } else {
        Some(score_column)
    };

    // 2. Boost
    println!();
    println!("Boosting over-represents low-score (more vulnerable) countries in the lottery.");
    for method in BoostMethod::ALL {
        println!("  {:<15} {}", method.name(), method.description());
    }
    let method = loop {
        let input = prompt_with_default("Boost method", &boost_defaults.method)?;
        match parse_method_input(&input) {
            Ok(m) => break m,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let boost = loop {
        let factor: f64 = loop {
            let input = prompt_with_default("Boost factor", &boost_defaults.factor.to_string())?;
            match input.parse::<f64>() {
                Ok(v) => break v,
                Err(_) => println!("  Invalid: must be a number. Try again."),
            }
        };
        let num_bins: usize = loop {
            let input =
                prompt_with_default("Number of bins", &boost_defaults.num_bins.to_string())?;
            match input.parse::<usize>() {
                Ok(v) => break v,
                Err(_) => println!("  Invalid: must be a positive whole number. Try again."),
            }
        };

        let candidate = BoostConfig {
            method: method.name().to_string(),
            factor,
            num_bins,
        };
        match validate_boost(&candidate) {
            Ok(()) => break candidate,
            Err(errors) => {
                for error in errors {
                    println!("  Invalid: {}", error);
                }
                println!("  Try again.");
            }
        }
    };

    // 3. Output
    println!();
    let output_defaults = OutputConfig::default();
    let dir = prompt_with_default(
        "Output directory for exported bins",
        &output_defaults.dir.display().to_string(),
    )?;
    let emit_plot = prompt_yes_no("Draw the weight chart after each run?", false)?;

    // 4. Config path
    let default_config_path = match default_path.or_else(get_config_path) {
        Some(p) => p,
        None => PathBuf::from("gain-weights.yaml"),
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        input: InputConfig {
            path: PathBuf::from(path),
            score_column,
            ..input_defaults
        },
        boost,
        output: OutputConfig {
            dir: PathBuf::from(dir),
            emit_plot,
        },
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `gain-weights` to bin and boost the scores.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_method_input() {
        assert_eq!(parse_method_input("exponential"), Ok(BoostMethod::Exponential));
        let err = parse_method_input("cubic").unwrap_err();
        assert!(err.contains("cubic"));
        assert!(err.contains("flat_then_ramp"));
    }

    #[test]
    fn test_write_config_roundtrip() {
        let dir = env::temp_dir().join("gain_weights_test_init");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.yaml");

        let mut config = Config::default();
        config.boost.method = "flat_then_ramp".to_string();
        config.boost.factor = 4.0;
        write_config(&path, &config).unwrap();

        let loaded = crate::config::load_config(Some(path)).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
