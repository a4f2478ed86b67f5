use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RetimeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetimeConfig {
    /// Minimum similarity ratio for two differing words to count as the same word.
    pub similarity_threshold: f64,
    /// Applied to the original confidence of a replaced word.
    pub replace_confidence_scale: f64,
    pub interpolated_confidence: f64,
    pub min_word_duration_secs: f64,
}

impl RetimeConfig {
    pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;
    pub const DEFAULT_REPLACE_CONFIDENCE_SCALE: f64 = 0.8;
    pub const DEFAULT_INTERPOLATED_CONFIDENCE: f64 = 0.5;
    pub const DEFAULT_MIN_WORD_DURATION_SECS: f64 = 0.05;

    pub fn load(path: &Path) -> Result<Self, RetimeError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| RetimeError::io("read retime config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| RetimeError::json("parse retime config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RetimeError> {
        check_unit_interval("similarity_threshold", self.similarity_threshold)?;
        check_unit_interval("replace_confidence_scale", self.replace_confidence_scale)?;
        check_unit_interval("interpolated_confidence", self.interpolated_confidence)?;
        if !self.min_word_duration_secs.is_finite() || self.min_word_duration_secs <= 0.0 {
            return Err(RetimeError::invalid_config(format!(
                "min_word_duration_secs must be a positive number, got {}",
                self.min_word_duration_secs
            )));
        }
        Ok(())
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), RetimeError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RetimeError::invalid_config(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

impl Default for RetimeConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: Self::DEFAULT_SIMILARITY_THRESHOLD,
            replace_confidence_scale: Self::DEFAULT_REPLACE_CONFIDENCE_SCALE,
            interpolated_confidence: Self::DEFAULT_INTERPOLATED_CONFIDENCE,
            min_word_duration_secs: Self::DEFAULT_MIN_WORD_DURATION_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn retime_config_default() {
        let config = RetimeConfig::default();
        assert_eq!(config.similarity_threshold, 0.7);
        assert_eq!(config.replace_confidence_scale, 0.8);
        assert_eq!(config.interpolated_confidence, 0.5);
        assert_eq!(config.min_word_duration_secs, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: RetimeConfig =
            serde_json::from_str(r#"{ "similarity_threshold": 0.85 }"#).expect("valid json");
        assert_eq!(config.similarity_threshold, 0.85);
        assert_eq!(
            config.min_word_duration_secs,
            RetimeConfig::DEFAULT_MIN_WORD_DURATION_SECS
        );
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let config = RetimeConfig {
            similarity_threshold: 1.5,
            ..RetimeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RetimeError::InvalidConfig { .. })
        ));

        let config = RetimeConfig {
            min_word_duration_secs: 0.0,
            ..RetimeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "interpolated_confidence": 0.4 }}"#).expect("write config");
        let config = RetimeConfig::load(file.path()).expect("config should load");
        assert_eq!(config.interpolated_confidence, 0.4);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let result = RetimeConfig::load(Path::new("/nonexistent/retime.json"));
        assert!(matches!(result, Err(RetimeError::Io { .. })));
    }

    #[test]
    fn load_fails_on_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "replace_confidence_scale": -0.1 }}"#).expect("write config");
        let result = RetimeConfig::load(file.path());
        assert!(matches!(result, Err(RetimeError::InvalidConfig { .. })));
    }
}
