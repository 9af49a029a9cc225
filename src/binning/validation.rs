use super::boost::BoostMethod;
use super::config::BoostConfig;

/// Largest accepted bin count
pub const MAX_NUM_BINS: usize = 10_000;

/// Validate boost configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// Unknown method names are not errors; they resolve to no boost at run time.
pub fn validate_boost(config: &BoostConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.num_bins == 0 {
        errors.push("boost.num_bins: must be at least 1".to_string());
    } else if config.num_bins > MAX_NUM_BINS {
        errors.push(format!(
            "boost.num_bins: must be at most {}, got {}",
            MAX_NUM_BINS, config.num_bins
        ));
    }

    if !config.factor.is_finite() {
        errors.push(format!("boost.factor: must be a finite number, got {}", config.factor));
    }

    // Check the actual curve for the chosen factor
    if let Some(method) = BoostMethod::lookup(&config.method) {
        if (1..=MAX_NUM_BINS).contains(&config.num_bins) && config.factor.is_finite() {
            let multipliers = method.multipliers(config.num_bins, config.factor);
            if let Some(i) = multipliers.iter().position(|m| !m.is_finite()) {
                errors.push(format!(
                    "boost.factor: {} with factor {} overflows at bin {}",
                    method, config.factor, i
                ));
            } else if let Some(i) = multipliers.iter().position(|&m| m < 0.0) {
                errors.push(format!(
                    "boost.factor: {} with factor {} gives a negative multiplier at bin {}",
                    method, config.factor, i
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
