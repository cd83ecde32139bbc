//! Library exports for reusing digitscribe subsystems.
//!
//! Exposes the drawing model, the workflow state machine, the prediction
//! client, and the configuration types so that integration tests and
//! external tools can drive the whole prediction workflow without the GUI
//! shell.

pub mod config;
pub mod draw;
pub mod input;
pub mod predict;
pub mod ui;

pub use config::Config;
