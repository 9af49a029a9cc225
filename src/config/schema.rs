use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::binning::BoostConfig;
use crate::data::ColumnSpec;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub boost: BoostConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// ND-GAIN country index CSV
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
    #[serde(default = "default_code_column")]
    pub code_column: String,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    /// Score column; the last column of the file when unset
    #[serde(default)]
    pub score_column: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Draw the weight chart after each run
    #[serde(default)]
    pub emit_plot: bool,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("resources/gain.csv")
}

fn default_code_column() -> String {
    "ISO3".to_string()
}

fn default_name_column() -> String {
    "Name".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("resources")
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            code_column: default_code_column(),
            name_column: default_name_column(),
            score_column: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            emit_plot: false,
        }
    }
}

impl InputConfig {
    pub fn column_spec(&self) -> ColumnSpec {
        ColumnSpec {
            code_column: self.code_column.clone(),
            name_column: self.name_column.clone(),
            score_column: self.score_column.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.input.path, PathBuf::from("resources/gain.csv"));
        assert_eq!(config.boost.num_bins, 10);
        assert!(!config.output.emit_plot);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
input:
  path: data/gain.csv
  code_column: ISO3
  name_column: Name
  score_column: "2022"
boost:
  method: first_bin_only
  factor: 2
  num_bins: 4
output:
  dir: out
  emit_plot: true
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.input.path, PathBuf::from("data/gain.csv"));
        assert_eq!(config.input.score_column, Some("2022".to_string()));
        assert_eq!(config.boost.method, "first_bin_only");
        assert_eq!(config.boost.factor, 2.0);
        assert_eq!(config.boost.num_bins, 4);
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert!(config.output.emit_plot);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.input.score_column = Some("2021".to_string());
        config.boost.method = "exponential".to_string();
        config.boost.factor = 0.9;
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_column_spec() {
        let input = InputConfig::default();
        let columns = input.column_spec();
        assert_eq!(columns.code_column, "ISO3");
        assert_eq!(columns.name_column, "Name");
        assert!(columns.score_column.is_none());
    }
}
