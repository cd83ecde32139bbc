//! HTTP client for the remote recognition service.

use reqwest::multipart;

use super::types::{
    BoundingBox, MultiDigitResponse, PredictError, Prediction, RecognizerMode, SingleDigitResponse,
};

/// Default backend address, matching the development server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Client for the prediction endpoints.
///
/// Uploads the serialized canvas as a multipart form with a single `file`
/// field and parses the JSON response for the mode's endpoint. No timeout is
/// configured; the caller decides when a newer request supersedes a hung one.
#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// The configured service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn upload(
        &self,
        mode: RecognizerMode,
        png: Vec<u8>,
    ) -> Result<reqwest::Response, PredictError> {
        let part = multipart::Part::bytes(png)
            .file_name(mode.upload_filename())
            .mime_str("image/png")?;
        let form = multipart::Form::new().part("file", part);

        let url = format!("{}{}", self.base_url, mode.endpoint_path());
        log::info!("Posting canvas to {url}");

        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("{url} answered with status {status}");
            return Err(PredictError::BackendStatus(status));
        }

        Ok(response)
    }

    /// Requests classification of the whole canvas as one digit.
    ///
    /// The backend reports confidence as a fraction in [0, 1]; it is rescaled
    /// to the 0-100 display range here. The bounding box always spans the
    /// full canvas - single-digit mode does not localize the digit, and the
    /// contract populates no alternatives.
    pub async fn predict_single(&self, png: Vec<u8>) -> Result<Prediction, PredictError> {
        let body: SingleDigitResponse = self
            .upload(RecognizerMode::Single, png)
            .await?
            .json()
            .await?;

        Ok(Prediction {
            digit: body.digit,
            confidence: body.confidence * 100.0,
            alternatives: Vec::new(),
            bounding_box: BoundingBox::full_canvas(),
            preprocessed_image: None,
        })
    }

    /// Requests segmentation and classification of the canvas into digits.
    ///
    /// Unlike the single-digit endpoint, confidences arrive already on the
    /// 0-100 display scale and entries pass through verbatim, including their
    /// bounding boxes, alternatives, and preprocessed images. An absent or
    /// empty `predictions` array maps to [`PredictError::NoDigits`].
    pub async fn predict_multi(&self, png: Vec<u8>) -> Result<Vec<Prediction>, PredictError> {
        let body: MultiDigitResponse = self
            .upload(RecognizerMode::Multi, png)
            .await?
            .json()
            .await?;

        if body.predictions.is_empty() {
            return Err(PredictError::NoDigits);
        }

        Ok(body.predictions)
    }
}
