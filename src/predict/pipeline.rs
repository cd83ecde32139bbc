//! Orchestration of a single prediction pass.

use std::sync::Arc;

use super::backend::RecognizerBackend;
use super::types::{PredictError, Prediction, RecognizerMode};

/// Runs one prediction pass over the serialized canvas.
///
/// Dispatches to the endpoint matching `mode` and normalizes the result to
/// an ordered prediction list: exactly one entry in single mode, 1..N in
/// multi mode (zero surfaces as [`PredictError::NoDigits`]).
pub async fn perform_prediction(
    mode: RecognizerMode,
    png: Vec<u8>,
    backend: Arc<dyn RecognizerBackend>,
) -> Result<Vec<Prediction>, PredictError> {
    log::debug!("Starting {mode:?} prediction ({} PNG bytes)", png.len());

    let predictions = match mode {
        RecognizerMode::Single => vec![backend.predict_single(png).await?],
        RecognizerMode::Multi => backend.predict_multi(png).await?,
    };

    log::info!("{mode:?} prediction returned {} result(s)", predictions.len());

    Ok(predictions)
}
