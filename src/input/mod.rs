//! Pointer input handling and the prediction workflow state machine.
//!
//! This module translates GUI pointer events (mouse and touch) into stroke
//! sessions and owns the workflow state: the sketch, the recognition mode,
//! the request phase, and the current predictions. It decides when exactly
//! one prediction request fires and which responses are allowed to update
//! displayed state.

pub mod events;
pub mod state;

// Re-export commonly used types at module level
pub use events::{PointerInput, canvas_position};
pub use state::{PredictionRequest, RecognizerState, RequestPhase};

// Re-export for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use state::StrokePhase;
