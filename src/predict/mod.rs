//! Remote digit recognition: backend contract, HTTP client, and pipeline.
//!
//! The neural network lives entirely behind an HTTP boundary; this module
//! owns the client half of that contract. [`PredictClient`] talks to the
//! service, [`RecognizerBackend`] abstracts it for tests, and
//! [`perform_prediction`] runs one pass for the selected mode.

pub mod backend;
pub mod client;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types at module level
pub use backend::RecognizerBackend;
pub use client::PredictClient;
pub use pipeline::perform_prediction;
pub use types::{BoundingBox, PredictError, Prediction, RecognizerMode};

// Re-export for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use types::Alternative;
