// Showcase configuration
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub const DEFAULT_DEAL_SLIDES: [&str; 3] = [
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?q=80&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1526778548025-fa2f459cd5c1?q=80&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1491553895911-0055eca6402d?q=80&w=1600&auto=format&fit=crop",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub toast_duration_ms: u64,
    pub carousel_interval_ms: u64,
    pub variant_flag: String,
    pub treatment_value: String,
    pub flag_timeout_ms: u64,
    pub deal_slides: Vec<String>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 2200,
            carousel_interval_ms: 6000,
            variant_flag: "new-ui-appeal".to_string(),
            treatment_value: "new".to_string(),
            flag_timeout_ms: 3000,
            deal_slides: DEFAULT_DEAL_SLIDES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ShowcaseConfig {
    // Missing keys fall back to the defaults above
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ShowcaseConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toast_duration_ms == 0 {
            return Err(ConfigError::Invalid("toast_duration_ms must be > 0".into()));
        }
        if self.carousel_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "carousel_interval_ms must be > 0".into(),
            ));
        }
        if self.variant_flag.trim().is_empty() {
            return Err(ConfigError::Invalid("variant_flag must not be empty".into()));
        }
        Ok(())
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }

    pub fn flag_timeout(&self) -> Duration {
        Duration::from_millis(self.flag_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShowcaseConfig::default();
        assert_eq!(config.toast_duration(), Duration::from_millis(2200));
        assert_eq!(config.carousel_interval(), Duration::from_secs(6));
        assert_eq!(config.variant_flag, "new-ui-appeal");
        assert_eq!(config.treatment_value, "new");
        assert_eq!(config.deal_slides.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ShowcaseConfig::from_json_str(r#"{"toast_duration_ms": 500}"#).unwrap();
        assert_eq!(config.toast_duration_ms, 500);
        assert_eq!(config.carousel_interval_ms, 6000);
        assert_eq!(config.deal_slides.len(), 3);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let zero_toast = ShowcaseConfig::from_json_str(r#"{"toast_duration_ms": 0}"#);
        assert!(matches!(zero_toast, Err(ConfigError::Invalid(_))));

        let blank_flag = ShowcaseConfig::from_json_str(r#"{"variant_flag": "  "}"#);
        assert!(matches!(blank_flag, Err(ConfigError::Invalid(_))));

        let not_json = ShowcaseConfig::from_json_str("toast_duration_ms = 5");
        assert!(matches!(not_json, Err(ConfigError::JsonParseError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = ShowcaseConfig::from_file("does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
