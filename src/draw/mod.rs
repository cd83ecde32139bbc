//! Sketch model and rasterization (Cairo-based).
//!
//! This module defines the core drawing types for the digit canvas:
//! - [`Color`]: RGBA color representation with the canvas palette constants
//! - [`Stroke`] / [`Sketch`]: freehand polylines captured from the pointer
//! - [`surface`]: rendering onto the fixed 280x280 raster and PNG encoding

pub mod color;
pub mod sketch;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use sketch::{Sketch, Stroke};
pub use surface::{CANVAS_HEIGHT, CANVAS_WIDTH, encode_png};

// Re-export color constants for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use color::{BLACK, WHITE};

// Re-export for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use surface::{SurfaceError, rasterize};
