//! Browser entry point: renders a noise field straight into a canvas 2D context.
//!
//! The host page owns the canvas and its size; it calls
//! `draw(ctx, canvas.width, canvas.height, configJson?)` once the module is
//! initialised.

use perlin_engine::{EngineConfig, EngineError, PixelBuffer};

#[cfg(target_arch = "wasm32")]
mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{draw, CanvasSurface};

/// Parses the optional JSON config handed over by the page.
pub fn parse_config(json: Option<&str>) -> Result<EngineConfig, EngineError> {
    match json.map(str::trim) {
        None | Some("") => Ok(EngineConfig::default()),
        Some(text) => EngineConfig::from_json_str(text),
    }
}

/// Checks that `buffer` covers the canvas backing store exactly. A canvas
/// resized by the page since `draw` was called would otherwise be painted
/// only partially.
pub fn ensure_fits(
    canvas_width: u32,
    canvas_height: u32,
    buffer: &PixelBuffer,
) -> Result<(), EngineError> {
    if buffer.width() == canvas_width && buffer.height() == canvas_height {
        return Ok(());
    }
    Err(EngineError::SurfaceWriteFailure(format!(
        "buffer is {}x{}, canvas is {canvas_width}x{canvas_height}",
        buffer.width(),
        buffer.height()
    )))
}
