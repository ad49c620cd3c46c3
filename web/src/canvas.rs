use perlin_engine::{EngineError, PixelBuffer, SurfaceWriter};
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

use crate::{ensure_fits, parse_config};

/// Writes committed buffers into a canvas at the origin.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl SurfaceWriter for CanvasSurface<'_> {
    fn commit(&mut self, buffer: PixelBuffer) -> Result<(), EngineError> {
        let canvas = self.ctx.canvas().ok_or_else(|| {
            EngineError::SurfaceWriteFailure("context is not attached to a canvas".into())
        })?;
        ensure_fits(canvas.width(), canvas.height(), &buffer)?;
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(buffer.as_bytes()),
            buffer.width(),
            buffer.height(),
        )
        .map_err(js_failure)?;
        self.ctx.put_image_data(&data, 0.0, 0.0).map_err(js_failure)
    }
}

fn js_failure(err: JsValue) -> EngineError {
    EngineError::SurfaceWriteFailure(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

#[wasm_bindgen]
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    width: u32,
    height: u32,
    config: Option<String>,
) -> Result<(), JsValue> {
    let config = parse_config(config.as_deref()).map_err(to_js)?;
    let mut surface = CanvasSurface::new(ctx);
    perlin_engine::draw(&mut surface, width, height, Some(&config)).map_err(to_js)
}

fn to_js(err: EngineError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
