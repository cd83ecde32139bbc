//! Prediction workflow state machine.
//!
//! [`RecognizerState`] owns the canvas lifecycle end to end: stroke sessions,
//! the selected recognition mode, the prediction list, and the request phase.
//! It is deliberately free of GUI and network types so the whole workflow can
//! be driven and asserted in unit tests.

use crate::draw::{Sketch, Stroke};
use crate::input::events::PointerInput;
use crate::predict::{Prediction, RecognizerMode};

/// Current stroke session state machine.
///
/// At most one session is active at a time; a session is bounded by a
/// pointer-down and the matching pointer-up (or pointer-leave).
#[derive(Debug)]
pub enum StrokePhase {
    /// Not drawing - waiting for pointer input
    Idle,
    /// Pointer held down, stroke in progress
    Stroking {
        /// Stroke committed so far, starting with the anchor point
        stroke: Stroke,
    },
}

/// A prediction request issued when a stroke session ends.
///
/// Ending a session is the sole trigger for network activity; there is no
/// debounce and no submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionRequest {
    /// Monotonic tag; only the latest issued tag may update displayed state
    pub seq: u64,
    /// Mode selected at release time, determines the endpoint
    pub mode: RecognizerMode,
}

/// Network request phase as seen by the UI.
///
/// Loading and failure are mutually exclusive; "success" is simply `Idle`
/// with a non-empty prediction list.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPhase {
    /// No request outstanding
    Idle,
    /// A request is in flight
    Loading,
    /// The last request failed; holds the user-facing message
    Failed(String),
}

/// Main workflow state for the digit recognizer.
///
/// The state machine guarantees:
/// - exactly one prediction request per completed stroke session;
/// - predictions are cleared whenever a request starts or fails;
/// - a response only lands if it carries the latest issued sequence tag, so
///   an outdated in-flight request can never overwrite newer state.
pub struct RecognizerState {
    /// All completed strokes of the current drawing
    pub sketch: Sketch,
    /// Currently selected recognition mode
    mode: RecognizerMode,
    /// Stroke session state machine
    phase: StrokePhase,
    /// Request phase driving the results panel
    request: RequestPhase,
    /// Predictions from the most recent successful request
    predictions: Vec<Prediction>,
    /// Tag of the outstanding request allowed to update state, if any
    active_seq: Option<u64>,
    /// Next sequence tag to hand out
    next_seq: u64,
    /// Whether the canvas display needs to be repainted
    needs_redraw: bool,
}

impl RecognizerState {
    /// Creates a blank workflow state in the given mode.
    pub fn new(mode: RecognizerMode) -> Self {
        Self {
            sketch: Sketch::new(),
            mode,
            phase: StrokePhase::Idle,
            request: RequestPhase::Idle,
            predictions: Vec::new(),
            active_seq: None,
            next_seq: 0,
            needs_redraw: true,
        }
    }

    /// Feeds a normalized pointer event into the state machine.
    ///
    /// Returns the prediction request to dispatch when the event completed a
    /// stroke session.
    pub fn on_pointer(&mut self, input: PointerInput) -> Option<PredictionRequest> {
        match input {
            PointerInput::Down { x, y } => {
                self.begin(x, y);
                None
            }
            PointerInput::Move { x, y } => {
                self.extend(x, y);
                None
            }
            // Leaving the canvas mid-stroke finalizes it like a release.
            PointerInput::Up | PointerInput::Leave => self.end(),
        }
    }

    /// Starts a new stroke session at the given canvas-local coordinate.
    ///
    /// Ignored if a session is already active.
    pub fn begin(&mut self, x: f64, y: f64) {
        if matches!(self.phase, StrokePhase::Idle) {
            self.phase = StrokePhase::Stroking {
                stroke: Stroke::new(x, y),
            };
            self.needs_redraw = true;
        }
    }

    /// Extends the active stroke to the given coordinate.
    ///
    /// No-op when no session is active, so stray move events (e.g. the
    /// pointer entering the canvas with the button already down elsewhere)
    /// leave the canvas untouched.
    pub fn extend(&mut self, x: f64, y: f64) {
        if let StrokePhase::Stroking { stroke } = &mut self.phase {
            stroke.push(x, y);
            self.needs_redraw = true;
        }
    }

    /// Ends the active stroke session.
    ///
    /// Finalizes the stroke into the sketch and issues exactly one prediction
    /// request for the currently selected mode. Returns `None` when no
    /// session was active.
    pub fn end(&mut self) -> Option<PredictionRequest> {
        let StrokePhase::Stroking { stroke } = std::mem::replace(&mut self.phase, StrokePhase::Idle)
        else {
            return None;
        };

        self.sketch.add_stroke(stroke);
        self.needs_redraw = true;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.active_seq = Some(seq);
        self.request = RequestPhase::Loading;
        // A new request always starts from an empty prediction list.
        self.predictions.clear();

        log::debug!("Stroke ended; issuing {:?} request #{seq}", self.mode);

        Some(PredictionRequest {
            seq,
            mode: self.mode,
        })
    }

    /// Clears the canvas and all derived state.
    ///
    /// Resets the sketch to blank, discards predictions, clears any error and
    /// invalidates the outstanding request tag so a late response cannot
    /// repopulate state. Idempotent and safe to call mid-session.
    pub fn clear(&mut self) {
        self.sketch.clear();
        self.phase = StrokePhase::Idle;
        self.predictions.clear();
        self.request = RequestPhase::Idle;
        self.active_seq = None;
        self.needs_redraw = true;
    }

    /// Selects the recognition mode.
    ///
    /// Existing predictions are intentionally preserved; the mode only
    /// affects the next request and the card layout.
    pub fn set_mode(&mut self, mode: RecognizerMode) {
        self.mode = mode;
    }

    /// Returns the currently selected mode.
    pub fn mode(&self) -> RecognizerMode {
        self.mode
    }

    /// Drops a request that could not be dispatched (e.g. the canvas failed
    /// to serialize). Clears the loading state without surfacing an error.
    pub fn cancel_pending(&mut self, seq: u64) {
        if self.active_seq == Some(seq) {
            self.active_seq = None;
            self.request = RequestPhase::Idle;
        }
    }

    /// Applies the outcome of a prediction request.
    ///
    /// Responses carrying anything but the latest issued tag are discarded,
    /// so a slow backend cannot overwrite the results of a newer stroke.
    pub fn resolve(&mut self, seq: u64, outcome: Result<Vec<Prediction>, String>) {
        if self.active_seq != Some(seq) {
            log::debug!("Discarding stale prediction response #{seq}");
            return;
        }
        self.active_seq = None;

        match outcome {
            Ok(predictions) => {
                log::info!("Request #{seq} resolved with {} prediction(s)", predictions.len());
                self.predictions = predictions;
                self.request = RequestPhase::Idle;
            }
            Err(message) => {
                log::warn!("Request #{seq} failed: {message}");
                self.predictions.clear();
                self.request = RequestPhase::Failed(message);
            }
        }
    }

    /// Predictions from the most recent successful request.
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// Current request phase.
    pub fn request(&self) -> &RequestPhase {
        &self.request
    }

    /// Points of the stroke currently being drawn, for live preview.
    pub fn stroke_in_progress(&self) -> Option<&[(f64, f64)]> {
        match &self.phase {
            StrokePhase::Stroking { stroke } => Some(&stroke.points),
            StrokePhase::Idle => None,
        }
    }

    /// Takes and clears the redraw flag.
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::predict::BoundingBox;

    fn prediction(digit: u8, confidence: f64) -> Prediction {
        Prediction {
            digit,
            confidence,
            alternatives: Vec::new(),
            bounding_box: BoundingBox {
                x: 0.0,
                y: 0.0,
                width: CANVAS_WIDTH as f64,
                height: CANVAS_HEIGHT as f64,
            },
            preprocessed_image: None,
        }
    }

    fn drag(state: &mut RecognizerState) -> Option<PredictionRequest> {
        state.begin(10.0, 10.0);
        state.extend(40.0, 60.0);
        state.extend(80.0, 90.0);
        state.end()
    }

    #[test]
    fn drag_session_issues_exactly_one_request() {
        let mut state = RecognizerState::new(RecognizerMode::Single);

        let request = drag(&mut state).expect("stroke end should issue a request");
        assert_eq!(request.mode, RecognizerMode::Single);
        assert_eq!(*state.request(), RequestPhase::Loading);
        assert_eq!(state.sketch.strokes.len(), 1);

        // The release already ended the session; a repeated release is inert.
        assert!(state.end().is_none());
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut state = RecognizerState::new(RecognizerMode::Single);
        state.extend(50.0, 50.0);

        assert!(state.sketch.is_empty());
        assert!(state.stroke_in_progress().is_none());
        assert!(state.end().is_none());
    }

    #[test]
    fn release_uses_mode_selected_at_release_time() {
        let mut state = RecognizerState::new(RecognizerMode::Single);

        state.begin(10.0, 10.0);
        state.extend(20.0, 20.0);
        state.set_mode(RecognizerMode::Multi);
        let request = state.end().unwrap();

        assert_eq!(request.mode, RecognizerMode::Multi);
    }

    #[test]
    fn leave_ends_the_session_like_release() {
        let mut state = RecognizerState::new(RecognizerMode::Single);

        state.on_pointer(PointerInput::Down { x: 10.0, y: 10.0 });
        state.on_pointer(PointerInput::Move { x: 30.0, y: 30.0 });
        let request = state.on_pointer(PointerInput::Leave);

        assert!(request.is_some());
        assert_eq!(state.sketch.strokes.len(), 1);

        // Leaving the canvas while idle does nothing.
        assert!(state.on_pointer(PointerInput::Leave).is_none());
    }

    #[test]
    fn begin_during_active_session_is_ignored() {
        let mut state = RecognizerState::new(RecognizerMode::Single);

        state.begin(10.0, 10.0);
        state.begin(200.0, 200.0);
        state.extend(20.0, 20.0);
        state.end().unwrap();

        assert_eq!(state.sketch.strokes.len(), 1);
        assert_eq!(state.sketch.strokes[0].points[0], (10.0, 10.0));
    }

    #[test]
    fn successful_resolution_replaces_predictions() {
        let mut state = RecognizerState::new(RecognizerMode::Single);
        let request = drag(&mut state).unwrap();

        state.resolve(request.seq, Ok(vec![prediction(7, 93.0)]));

        assert_eq!(state.predictions().len(), 1);
        assert_eq!(state.predictions()[0].digit, 7);
        assert_eq!(*state.request(), RequestPhase::Idle);
    }

    #[test]
    fn failure_clears_predictions_and_sets_error() {
        let mut state = RecognizerState::new(RecognizerMode::Single);
        let first = drag(&mut state).unwrap();
        state.resolve(first.seq, Ok(vec![prediction(3, 88.0)]));

        let second = drag(&mut state).unwrap();
        state.resolve(second.seq, Err("backend unreachable".to_string()));

        assert!(state.predictions().is_empty());
        assert_eq!(
            *state.request(),
            RequestPhase::Failed("backend unreachable".to_string())
        );
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut state = RecognizerState::new(RecognizerMode::Single);
        let first = drag(&mut state).unwrap();
        let second = drag(&mut state).unwrap();
        assert_ne!(first.seq, second.seq);

        // The older request resolves after the newer one was issued.
        state.resolve(first.seq, Ok(vec![prediction(1, 50.0)]));
        assert!(state.predictions().is_empty());
        assert_eq!(*state.request(), RequestPhase::Loading);

        state.resolve(second.seq, Ok(vec![prediction(2, 99.0)]));
        assert_eq!(state.predictions()[0].digit, 2);
    }

    #[test]
    fn clear_resets_predictions_and_error() {
        let mut state = RecognizerState::new(RecognizerMode::Multi);
        let request = drag(&mut state).unwrap();
        state.resolve(request.seq, Err("no digits detected".to_string()));

        state.clear();

        assert!(state.sketch.is_empty());
        assert!(state.predictions().is_empty());
        assert_eq!(*state.request(), RequestPhase::Idle);

        // Clearing again is harmless.
        state.clear();
        assert_eq!(*state.request(), RequestPhase::Idle);
    }

    #[test]
    fn clear_discards_in_flight_response() {
        let mut state = RecognizerState::new(RecognizerMode::Single);
        let request = drag(&mut state).unwrap();

        state.clear();
        state.resolve(request.seq, Ok(vec![prediction(9, 97.0)]));

        assert!(state.predictions().is_empty());
        assert_eq!(*state.request(), RequestPhase::Idle);
    }

    #[test]
    fn cancel_pending_clears_loading_without_error() {
        let mut state = RecognizerState::new(RecognizerMode::Single);
        let request = drag(&mut state).unwrap();
        assert_eq!(*state.request(), RequestPhase::Loading);

        state.cancel_pending(request.seq);

        assert_eq!(*state.request(), RequestPhase::Idle);

        // A cancelled tag can no longer resolve.
        state.resolve(request.seq, Ok(vec![prediction(4, 80.0)]));
        assert!(state.predictions().is_empty());
    }

    #[test]
    fn switching_mode_preserves_predictions() {
        let mut state = RecognizerState::new(RecognizerMode::Single);
        let request = drag(&mut state).unwrap();
        state.resolve(request.seq, Ok(vec![prediction(5, 91.0)]));

        state.set_mode(RecognizerMode::Multi);

        assert_eq!(state.predictions().len(), 1);
        assert_eq!(state.mode(), RecognizerMode::Multi);
    }
}
