//! Abstraction over the recognition service for dependency injection.

use async_trait::async_trait;

use super::client::PredictClient;
use super::types::{PredictError, Prediction};

/// Abstraction over the service answering prediction requests.
///
/// The production implementation is [`PredictClient`]; tests substitute
/// mocks to drive the pipeline without a network.
#[async_trait]
pub trait RecognizerBackend: Send + Sync {
    /// Classify the uploaded canvas as a single digit.
    async fn predict_single(&self, png: Vec<u8>) -> Result<Prediction, PredictError>;

    /// Segment the uploaded canvas and classify each detected digit.
    async fn predict_multi(&self, png: Vec<u8>) -> Result<Vec<Prediction>, PredictError>;
}

#[async_trait]
impl RecognizerBackend for PredictClient {
    async fn predict_single(&self, png: Vec<u8>) -> Result<Prediction, PredictError> {
        PredictClient::predict_single(self, png).await
    }

    async fn predict_multi(&self, png: Vec<u8>) -> Result<Vec<Prediction>, PredictError> {
        PredictClient::predict_multi(self, png).await
    }
}
