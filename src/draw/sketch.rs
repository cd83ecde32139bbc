//! Stroke and sketch containers for the drawing surface.

/// One continuous freehand stroke.
///
/// Holds the canvas-local points traced between pointer-down and pointer-up.
/// A stroke with a single point leaves no visible mark when rendered, which
/// matches a click without movement.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Sequence of (x, y) canvas-local coordinates in capture order
    pub points: Vec<(f64, f64)>,
}

impl Stroke {
    /// Starts a new stroke at the given canvas-local coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            points: vec![(x, y)],
        }
    }

    /// Appends a point, extending the stroke's polyline.
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }
}

/// Container for all strokes in the current drawing.
///
/// Acts as the canvas state: strokes accumulate in draw order and are
/// rendered bottom-to-top onto the raster at serialization time.
#[derive(Debug, Clone, Default)]
pub struct Sketch {
    /// Vector of all strokes in draw order (first = bottom layer, last = top layer)
    pub strokes: Vec<Stroke>,
}

impl Sketch {
    /// Creates a new empty sketch with no strokes.
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
        }
    }

    /// Removes all strokes, resetting the canvas to blank.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// Adds a completed stroke (drawn on top of existing strokes).
    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Returns true if nothing has been drawn.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Returns true if rasterizing would leave the canvas all white.
    ///
    /// Single-point strokes leave no mark, so a sketch can be non-empty and
    /// still blank.
    pub fn is_blank(&self) -> bool {
        self.strokes.iter().all(|stroke| stroke.points.len() < 2)
    }
}
