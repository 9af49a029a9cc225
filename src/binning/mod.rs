pub mod apply;
pub mod boost;
pub mod config;
pub mod histogram;
pub mod validation;

pub use apply::{apply_multipliers, boost_histogram, boost_with_multipliers, normalize_preserve_relative_min, BoostedHistogram};
pub use boost::BoostMethod;
pub use config::BoostConfig;
pub use histogram::{bin_and_normalize, Histogram, DEFAULT_NUM_BINS};
pub use validation::validate_boost;
