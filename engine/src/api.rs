use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::raster::PixelBuffer;
use crate::surface::SurfaceWriter;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("surface rejected the buffer: {0}")]
    SurfaceWriteFailure(String),
    #[error("config could not be parsed: {0}")]
    ConfigParse(String),
    #[error("rendering was cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed(pub u64);

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Seed(seed)
    }
}

/// A seeded noise source that can render pixel buffers and hand them to a surface.
pub trait NoiseEngine: Send + Sync {
    fn seed(&self) -> Seed;

    /// Fractal value at pixel coordinates `(x, y)`.
    fn sample(&self, x: f64, y: f64, config: &EngineConfig) -> f64;

    fn render(
        &self,
        config: &EngineConfig,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, EngineError>;

    /// Renders with `config` (defaults when `None`) and commits the result to
    /// `surface` exactly once. Nothing reaches the surface if rendering fails.
    fn draw(
        &self,
        surface: &mut dyn SurfaceWriter,
        width: u32,
        height: u32,
        config: Option<&EngineConfig>,
    ) -> Result<(), EngineError> {
        let default;
        let config = match config {
            Some(config) => config,
            None => {
                default = EngineConfig::default();
                &default
            }
        };
        let buffer = self.render(config, width, height)?;
        crate::surface::commit(surface, buffer, width, height)
    }
}
