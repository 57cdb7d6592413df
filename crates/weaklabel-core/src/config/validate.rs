//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.parallel_workers must be > 0".into(),
            ));
        }
        if self.ranking.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "ranking.top_k must be > 0".into(),
            ));
        }
        let factors = [
            ("weights.caption", self.weights.caption),
            ("weights.comments", self.weights.comments),
            ("weights.user_tag", self.weights.user_tag),
            ("weights.hashtag", self.weights.hashtag),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be a finite, non-negative number (got {value})"
                )));
            }
        }
        if !matches!(self.output.format.as_str(), "json" | "jsonl") {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be \"json\" or \"jsonl\" (got {:?})",
                self.output.format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_parallel_workers() {
        let mut config = Config::default();
        config.processing.parallel_workers = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("parallel_workers"));
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default();
        config.ranking.top_k = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_validate_rejects_negative_factor() {
        let mut config = Config::default();
        config.weights.comments = -0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("weights.comments"));
    }

    #[test]
    fn test_validate_rejects_nan_factor() {
        let mut config = Config::default();
        config.weights.hashtag = f32::NAN;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("weights.hashtag"));
    }

    #[test]
    fn test_validate_rejects_unknown_output_format() {
        let mut config = Config::default();
        config.output.format = "xml".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output.format"));
    }
}
