//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::predict::client::DEFAULT_BASE_URL;

/// Recognition backend settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the prediction service (a trailing slash is tolerated)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Drawing-related settings.
///
/// The canvas size is fixed at 280x280; only the ink width is tunable.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Ink thickness in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_stroke_thickness")]
    pub stroke_thickness: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            stroke_thickness: default_stroke_thickness(),
        }
    }
}

/// UI display preferences.
#[derive(Debug, Serialize, Deserialize)]
pub struct UiConfig {
    /// Confidence percentage below which a card is flagged (valid range: 0 - 100)
    #[serde(default = "default_low_confidence_threshold")]
    pub low_confidence_threshold: f64,

    /// Recognition mode selected at startup ("single" or "multi")
    #[serde(default = "default_mode")]
    pub default_mode: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            low_confidence_threshold: default_low_confidence_threshold(),
            default_mode: default_mode(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_stroke_thickness() -> f64 {
    15.0
}

fn default_low_confidence_threshold() -> f64 {
    70.0
}

fn default_mode() -> String {
    "single".to_string()
}
