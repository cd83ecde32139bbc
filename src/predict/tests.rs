use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::backend::RecognizerBackend;
use super::pipeline::perform_prediction;
use super::types::{BoundingBox, PredictError, Prediction, RecognizerMode};

struct MockBackend {
    single: Mutex<Option<Result<Prediction, PredictError>>>,
    multi: Mutex<Option<Result<Vec<Prediction>, PredictError>>>,
    uploads: Mutex<Vec<(RecognizerMode, usize)>>,
}

impl MockBackend {
    fn new() -> Self {
        Self {
            single: Mutex::new(None),
            multi: Mutex::new(None),
            uploads: Mutex::new(Vec::new()),
        }
    }

    fn with_single(result: Result<Prediction, PredictError>) -> Arc<Self> {
        let mock = Self::new();
        *mock.single.lock().unwrap() = Some(result);
        Arc::new(mock)
    }

    fn with_multi(result: Result<Vec<Prediction>, PredictError>) -> Arc<Self> {
        let mock = Self::new();
        *mock.multi.lock().unwrap() = Some(result);
        Arc::new(mock)
    }

    fn uploads(&self) -> Vec<(RecognizerMode, usize)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecognizerBackend for MockBackend {
    async fn predict_single(&self, png: Vec<u8>) -> Result<Prediction, PredictError> {
        self.uploads
            .lock()
            .unwrap()
            .push((RecognizerMode::Single, png.len()));
        self.single
            .lock()
            .unwrap()
            .take()
            .expect("no canned single response")
    }

    async fn predict_multi(&self, png: Vec<u8>) -> Result<Vec<Prediction>, PredictError> {
        self.uploads
            .lock()
            .unwrap()
            .push((RecognizerMode::Multi, png.len()));
        self.multi
            .lock()
            .unwrap()
            .take()
            .expect("no canned multi response")
    }
}

fn prediction(digit: u8, confidence: f64) -> Prediction {
    Prediction {
        digit,
        confidence,
        alternatives: Vec::new(),
        bounding_box: BoundingBox::full_canvas(),
        preprocessed_image: None,
    }
}

#[tokio::test]
async fn single_mode_wraps_the_result_in_a_one_element_list() {
    let backend = MockBackend::with_single(Ok(prediction(7, 93.0)));

    let predictions = perform_prediction(RecognizerMode::Single, vec![1, 2, 3], backend.clone())
        .await
        .unwrap();

    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].digit, 7);
    assert_eq!(backend.uploads(), vec![(RecognizerMode::Single, 3)]);
}

#[tokio::test]
async fn multi_mode_returns_the_list_verbatim() {
    let backend = MockBackend::with_multi(Ok(vec![prediction(1, 90.0), prediction(2, 65.0)]));

    let predictions = perform_prediction(RecognizerMode::Multi, vec![9; 42], backend.clone())
        .await
        .unwrap();

    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[1].digit, 2);
    assert_eq!(backend.uploads(), vec![(RecognizerMode::Multi, 42)]);
}

#[tokio::test]
async fn backend_errors_propagate() {
    let backend = MockBackend::with_multi(Err(PredictError::NoDigits));

    let err = perform_prediction(RecognizerMode::Multi, vec![0], backend)
        .await
        .unwrap_err();

    assert!(matches!(err, PredictError::NoDigits));
}

#[test]
fn mode_names_round_trip() {
    assert_eq!(RecognizerMode::parse("single"), Some(RecognizerMode::Single));
    assert_eq!(RecognizerMode::parse("Multi"), Some(RecognizerMode::Multi));
    assert!(RecognizerMode::parse("both").is_none());
}

#[test]
fn modes_map_to_their_endpoints_and_filenames() {
    assert_eq!(RecognizerMode::Single.endpoint_path(), "/predict");
    assert_eq!(RecognizerMode::Multi.endpoint_path(), "/predict-multi");
    assert_eq!(RecognizerMode::Single.upload_filename(), "digit.png");
    assert_eq!(RecognizerMode::Multi.upload_filename(), "digits.png");
}

#[test]
fn full_canvas_bounding_box_matches_surface_dimensions() {
    let bbox = BoundingBox::full_canvas();
    assert_eq!(bbox.x, 0.0);
    assert_eq!(bbox.y, 0.0);
    assert_eq!(bbox.width, 280.0);
    assert_eq!(bbox.height, 280.0);
}
