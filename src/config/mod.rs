//! Configuration file support for digitscribe.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/digitscribe/config.toml`.
//! Settings cover the backend address, drawing defaults, and UI preferences.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod types;

// Re-export commonly used types at module level
pub use types::{BackendConfig, DrawingConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::predict::RecognizerMode;

/// Main configuration structure containing all user settings.
///
/// This is the root type deserialized from the TOML file. All fields have
/// sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [backend]
/// base_url = "http://127.0.0.1:8000"
///
/// [drawing]
/// stroke_thickness = 15.0
///
/// [ui]
/// low_confidence_threshold = 70.0
/// default_mode = "single"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Prediction service address
    #[serde(default)]
    pub backend: BackendConfig,

    /// Drawing defaults (ink thickness)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// UI display preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged.
    ///
    /// Validated ranges:
    /// - `stroke_thickness`: 1.0 - 50.0
    /// - `low_confidence_threshold`: 0.0 - 100.0
    /// - `default_mode`: "single" or "multi"
    /// - `base_url`: non-empty
    fn validate_and_clamp(&mut self) {
        // Thickness: 1.0 - 50.0
        if !(1.0..=50.0).contains(&self.drawing.stroke_thickness) {
            log::warn!(
                "Invalid stroke_thickness {:.1}, clamping to 1.0-50.0 range",
                self.drawing.stroke_thickness
            );
            self.drawing.stroke_thickness = self.drawing.stroke_thickness.clamp(1.0, 50.0);
        }

        // Low-confidence threshold: 0.0 - 100.0
        if !(0.0..=100.0).contains(&self.ui.low_confidence_threshold) {
            log::warn!(
                "Invalid low_confidence_threshold {:.1}, clamping to 0.0-100.0 range",
                self.ui.low_confidence_threshold
            );
            self.ui.low_confidence_threshold = self.ui.low_confidence_threshold.clamp(0.0, 100.0);
        }

        // Startup mode must name a known recognizer mode
        if RecognizerMode::parse(&self.ui.default_mode).is_none() {
            log::warn!(
                "Invalid default_mode '{}', falling back to 'single'",
                self.ui.default_mode
            );
            self.ui.default_mode = "single".to_string();
        }

        // An empty backend address cannot be dialed
        if self.backend.base_url.trim().is_empty() {
            log::warn!("Empty backend base_url, falling back to the default");
            self.backend.base_url = BackendConfig::default().base_url;
        }
    }

    /// Returns the recognition mode selected at startup.
    ///
    /// Always resolvable after validation; unknown names fall back to single.
    pub fn initial_mode(&self) -> RecognizerMode {
        RecognizerMode::parse(&self.ui.default_mode).unwrap_or(RecognizerMode::Single)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/digitscribe/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g.
    /// HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("digitscribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Creates the parent directory if it doesn't exist. Kept for future use
    /// (e.g. persisting the last selected mode).
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}
