//! Data types for the prediction backend contract.

use serde::Deserialize;
use thiserror::Error;

use crate::draw::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Recognition mode selected by the user.
///
/// Determines which endpoint a stroke-end request is posted to and how the
/// resulting cards are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerMode {
    /// Classify the whole canvas as one digit
    Single,
    /// Segment the canvas and classify each detected digit
    Multi,
}

impl RecognizerMode {
    /// Endpoint path on the recognition service.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            RecognizerMode::Single => "/predict",
            RecognizerMode::Multi => "/predict-multi",
        }
    }

    /// Filename attached to the uploaded canvas image.
    pub fn upload_filename(self) -> &'static str {
        match self {
            RecognizerMode::Single => "digit.png",
            RecognizerMode::Multi => "digits.png",
        }
    }

    /// Parses a mode name as used by the CLI and the config file.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "single" => Some(RecognizerMode::Single),
            "multi" => Some(RecognizerMode::Multi),
            _ => None,
        }
    }
}

/// Rectangular canvas region a backend reports as containing one digit.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// The full canvas extent, used when the backend does not localize.
    pub fn full_canvas() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: CANVAS_WIDTH as f64,
            height: CANVAS_HEIGHT as f64,
        }
    }
}

/// Alternative digit interpretation with its display confidence.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Alternative {
    pub digit: u8,
    pub confidence: f64,
}

/// One recognized digit as rendered by the results panel.
///
/// `confidence` is always on the 0-100 display scale by the time a value of
/// this type exists; the single-digit path rescales the backend's [0, 1]
/// fraction, the multi-digit path trusts the wire value as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    /// Recognized digit (0-9)
    pub digit: u8,
    /// Confidence in percent (0-100)
    pub confidence: f64,
    /// Runner-up interpretations, possibly empty
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    /// Canvas region containing the digit
    #[serde(rename = "boundingBox")]
    pub bounding_box: BoundingBox,
    /// Base64-encoded PNG of the model's actual input, when provided
    #[serde(default)]
    pub preprocessed_image: Option<String>,
}

/// Wire shape of a successful `/predict` response.
#[derive(Debug, Deserialize)]
pub(crate) struct SingleDigitResponse {
    pub digit: u8,
    /// Fraction in [0, 1], rescaled client-side
    pub confidence: f64,
}

/// Wire shape of a successful `/predict-multi` response.
///
/// A missing `predictions` field is treated like an empty array.
#[derive(Debug, Deserialize)]
pub(crate) struct MultiDigitResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// Errors that can occur during a prediction request.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Prediction request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prediction service returned status {0}")]
    BackendStatus(reqwest::StatusCode),

    /// The multi-digit request succeeded but found nothing to classify.
    #[error("No digits detected")]
    NoDigits,
}
