//! Cairo rasterization and PNG encoding of the drawing surface.
//!
//! The raster is always rendered from scratch: an opaque white background
//! with every stroke drawn in black on top. This keeps the invariant that a
//! serialized canvas is a valid, fully-opaque image regardless of how the
//! sketch was produced.

use super::color::{BLACK, WHITE};
use super::sketch::{Sketch, Stroke};
use thiserror::Error;

/// Canvas width in pixels. Logical size equals pixel size; no scaling correction is applied.
pub const CANVAS_WIDTH: i32 = 280;
/// Canvas height in pixels.
pub const CANVAS_HEIGHT: i32 = 280;

/// Errors that can occur while rasterizing or encoding the surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Failed to render drawing surface: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Failed to encode canvas as PNG: {0}")]
    Png(#[from] cairo::IoError),
}

/// Renders the sketch onto a fresh canvas-sized image surface.
///
/// The surface is filled opaque white before any stroke is drawn; strokes use
/// opaque black ink with round caps and joins at the given width.
pub fn rasterize(sketch: &Sketch, thickness: f64) -> Result<cairo::ImageSurface, SurfaceError> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, CANVAS_WIDTH, CANVAS_HEIGHT)?;
    let ctx = cairo::Context::new(&surface)?;

    ctx.set_source_rgba(WHITE.r, WHITE.g, WHITE.b, WHITE.a);
    ctx.paint()?;

    ctx.set_source_rgba(BLACK.r, BLACK.g, BLACK.b, BLACK.a);
    ctx.set_line_width(thickness);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    for stroke in &sketch.strokes {
        render_stroke(&ctx, stroke)?;
    }

    // Drop the context so the surface can be borrowed exclusively by callers.
    drop(ctx);
    surface.flush();

    Ok(surface)
}

fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) -> Result<(), SurfaceError> {
    // A single point has no segment to stroke; the canvas stays untouched.
    if stroke.points.len() < 2 {
        return Ok(());
    }

    let (x, y) = stroke.points[0];
    ctx.move_to(x, y);
    for &(x, y) in &stroke.points[1..] {
        ctx.line_to(x, y);
    }
    ctx.stroke()?;

    Ok(())
}

/// Rasterizes the sketch and encodes it as PNG bytes ready for upload.
pub fn encode_png(sketch: &Sketch, thickness: f64) -> Result<Vec<u8>, SurfaceError> {
    let surface = rasterize(sketch, thickness)?;
    let mut buffer = Vec::new();
    surface.write_to_png(&mut buffer)?;

    log::debug!(
        "Encoded {}x{} canvas to {} PNG bytes ({} strokes)",
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        buffer.len(),
        sketch.strokes.len()
    );

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPAQUE_WHITE: u32 = 0xFFFF_FFFF;
    const OPAQUE_BLACK: u32 = 0xFF00_0000;

    fn pixel_at(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().expect("surface data");
        let offset = y * stride + x * 4;
        u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn blank_sketch_rasterizes_to_white() {
        let mut surface = rasterize(&Sketch::new(), 15.0).unwrap();
        assert_eq!(pixel_at(&mut surface, 0, 0), OPAQUE_WHITE);
        assert_eq!(pixel_at(&mut surface, 140, 140), OPAQUE_WHITE);
        assert_eq!(pixel_at(&mut surface, 279, 279), OPAQUE_WHITE);
    }

    #[test]
    fn stroke_marks_black_pixels_along_its_path() {
        let mut sketch = Sketch::new();
        let mut stroke = Stroke::new(40.0, 140.0);
        stroke.push(240.0, 140.0);
        sketch.add_stroke(stroke);

        let mut surface = rasterize(&sketch, 15.0).unwrap();
        assert_eq!(pixel_at(&mut surface, 140, 140), OPAQUE_BLACK);
        // Far from the stroke the background stays white.
        assert_eq!(pixel_at(&mut surface, 140, 20), OPAQUE_WHITE);
    }

    #[test]
    fn single_point_stroke_leaves_surface_blank() {
        let mut sketch = Sketch::new();
        sketch.add_stroke(Stroke::new(140.0, 140.0));

        let mut surface = rasterize(&sketch, 15.0).unwrap();
        assert_eq!(pixel_at(&mut surface, 140, 140), OPAQUE_WHITE);
    }

    #[test]
    fn encoded_png_has_signature() {
        let mut sketch = Sketch::new();
        let mut stroke = Stroke::new(100.0, 100.0);
        stroke.push(180.0, 180.0);
        sketch.add_stroke(stroke);

        let png = encode_png(&sketch, 15.0).unwrap();
        assert!(!png.is_empty());
        // PNG signature
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
