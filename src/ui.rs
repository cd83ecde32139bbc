//! Pure view-model helpers for the results panel.
//!
//! Keeps the rendering contract testable without a GUI: which panel the
//! results area shows, how card labels are formatted, and which user-facing
//! message a failed request maps to.

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::input::{RecognizerState, RequestPhase};
use crate::predict::{BoundingBox, PredictError, Prediction, RecognizerMode};

/// Busy indicator text shown while a request is in flight.
pub const LOADING_LABEL: &str = "Predicting...";

/// Placeholder prompt shown when idle with no predictions.
pub const PLACEHOLDER: &str = "Draw a digit and prediction will appear here.";

/// Low-confidence badge text.
pub const LOW_CONFIDENCE_LABEL: &str = "Low confidence";

/// Heading of the secondary alternatives panel.
pub const ALTERNATIVES_HEADING: &str = "Alternative interpretations:";

/// Which panel the results area shows.
///
/// Variants are listed in contract precedence order: an in-flight request
/// always wins, then a failure, then the empty placeholder, then the cards.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsPanel<'a> {
    /// A request is in flight
    Loading,
    /// The last request failed
    Error(&'a str),
    /// Idle with nothing to show yet
    Placeholder,
    /// One card per prediction
    Cards(&'a [Prediction]),
}

/// Derives the panel to display from the workflow state.
pub fn results_panel(state: &RecognizerState) -> ResultsPanel<'_> {
    match state.request() {
        RequestPhase::Loading => ResultsPanel::Loading,
        RequestPhase::Failed(message) => ResultsPanel::Error(message),
        RequestPhase::Idle if state.predictions().is_empty() => ResultsPanel::Placeholder,
        RequestPhase::Idle => ResultsPanel::Cards(state.predictions()),
    }
}

/// Toggle label for a mode.
pub fn mode_label(mode: RecognizerMode) -> &'static str {
    match mode {
        RecognizerMode::Single => "Single Digit",
        RecognizerMode::Multi => "Multiple Digits",
    }
}

/// Guidance line shown under the mode toggle.
pub fn mode_description(mode: RecognizerMode) -> &'static str {
    match mode {
        RecognizerMode::Single => "Draw a single digit (0-9) in the center of the canvas",
        RecognizerMode::Multi => "Draw multiple digits with some space between them",
    }
}

/// Heading above the prediction cards.
pub fn results_heading(mode: RecognizerMode) -> &'static str {
    match mode {
        RecognizerMode::Single => "Prediction",
        RecognizerMode::Multi => "Predictions",
    }
}

/// Confidence formatted to one decimal place, e.g. `93.0%`.
pub fn confidence_label(confidence: f64) -> String {
    format!("{confidence:.1}%")
}

/// True when the prediction should carry the low-confidence marker.
pub fn is_low_confidence(confidence: f64, threshold: f64) -> bool {
    confidence < threshold
}

/// Bounding-box origin cue shown on multi-digit cards.
pub fn origin_label(bounding_box: &BoundingBox) -> String {
    format!("x:{}, y:{}", bounding_box.x, bounding_box.y)
}

/// True when any prediction carries alternatives worth a secondary panel.
pub fn has_alternatives(predictions: &[Prediction]) -> bool {
    predictions.iter().any(|p| !p.alternatives.is_empty())
}

/// Maps a request error to the user-facing message for the given mode.
pub fn error_message(mode: RecognizerMode, error: &PredictError) -> String {
    match (mode, error) {
        (_, PredictError::NoDigits) => {
            "No digits detected. Please draw multiple digits with clear separation.".to_string()
        }
        (RecognizerMode::Single, _) => {
            "Failed to fetch prediction. Please ensure the backend is running.".to_string()
        }
        (RecognizerMode::Multi, _) => {
            "Failed to fetch multi-digit prediction. Please ensure the backend is running."
                .to_string()
        }
    }
}

/// Decodes a base64 preprocessed-image payload into PNG bytes.
///
/// An undecodable payload drops the thumbnail instead of failing the card.
pub fn decode_preprocessed(data: &str) -> Option<Vec<u8>> {
    match STANDARD.decode(data) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log::warn!("Ignoring undecodable preprocessed image: {err}");
            None
        }
    }
}
