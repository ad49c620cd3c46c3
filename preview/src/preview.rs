use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use perlin_engine::{EngineError, PixelBuffer, SurfaceWriter};
use tracing::info;

/// Surface that encodes each committed buffer as a PNG file.
#[derive(Debug, Clone)]
pub struct PngSurface {
    path: PathBuf,
}

impl PngSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SurfaceWriter for PngSurface {
    fn commit(&mut self, buffer: PixelBuffer) -> Result<(), EngineError> {
        let (width, height) = (buffer.width(), buffer.height());
        let image = RgbaImage::from_raw(width, height, buffer.into_vec())
            .ok_or_else(|| {
                EngineError::SurfaceWriteFailure(format!("buffer does not fill {width}x{height}"))
            })?;
        image
            .save_with_format(&self.path, ImageFormat::Png)
            .map_err(|e| {
                EngineError::SurfaceWriteFailure(format!("{}: {e}", self.path.display()))
            })?;
        info!(path = %self.path.display(), width, height, "preview written");
        Ok(())
    }
}
