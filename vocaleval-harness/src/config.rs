//! Configuration management
//!
//! The run takes no command-line arguments; everything tunable lives in a
//! TOML file under the platform config directory and is created with
//! defaults on first use. The correctness threshold is configuration, not a
//! literal buried in the scoring logic, so tests can vary it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vocaleval_audio::CaptureConfig;

/// Harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Path to configuration file
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Input: one expected utterance per row, first column only.
    pub expected_texts_path: String,

    /// Output: attempt-by-attempt record table.
    pub results_path: String,

    /// Similarity above which a transcription counts as correct.
    /// Strict inequality: a score exactly at the threshold is incorrect.
    pub correct_threshold: f64,

    /// Transcription service endpoint.
    pub transcribe_endpoint: String,

    /// Microphone capture settings.
    pub capture: CaptureConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            config_path: Self::default_config_path(),
            expected_texts_path: "expected_texts.csv".to_string(),
            results_path: "speech_results.csv".to_string(),
            correct_threshold: 0.8,
            transcribe_endpoint: "http://127.0.0.1:8090/transcribe".to_string(),
            capture: CaptureConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file, or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let mut config: HarnessConfig =
                toml::from_str(&contents).context("Failed to parse config file")?;

            config.config_path = config_path;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().context("Failed to save default config")?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&self.config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocaleval")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = HarnessConfig::default();
        assert_eq!(config.expected_texts_path, "expected_texts.csv");
        assert_eq!(config.results_path, "speech_results.csv");
        assert_eq!(config.correct_threshold, 0.8);
    }

    #[test]
    fn toml_roundtrip() {
        let config = HarnessConfig::default();
        let contents = toml::to_string_pretty(&config).unwrap();
        let parsed: HarnessConfig = toml::from_str(&contents).unwrap();

        assert_eq!(parsed.correct_threshold, config.correct_threshold);
        assert_eq!(parsed.results_path, config.results_path);
        assert_eq!(parsed.capture.trailing_silence, config.capture.trailing_silence);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: HarnessConfig = toml::from_str("correct_threshold = 0.9\n").unwrap();
        assert_eq!(parsed.correct_threshold, 0.9);
        assert_eq!(parsed.expected_texts_path, "expected_texts.csv");
    }
}
