//! Seeded 2D gradient noise, composed into fractal fields and rasterized into
//! RGBA pixel buffers for a host-provided surface.

pub mod api;
pub mod color;
pub mod config;
pub mod fractal;
pub mod gradient;
pub mod permutation;
pub mod raster;
pub mod sampling;
pub mod surface;

pub use api::{EngineError, NoiseEngine, Seed};
pub use color::ColorMapper;
pub use config::{ColorMap, ColorStop, EngineConfig, Levels};
pub use fractal::FractalCompositor;
pub use gradient::{GradientNoise2D, GRADIENTS};
pub use permutation::PermutationTable;
pub use raster::{PixelBuffer, Rasterizer};
pub use sampling::PerlinEngine;
pub use surface::{MemorySurface, SurfaceWriter};

/// One-shot draw: validates, builds an engine for the config's seed, renders
/// and commits to `surface`.
pub fn draw<S>(
    surface: &mut S,
    width: u32,
    height: u32,
    config: Option<&EngineConfig>,
) -> Result<(), EngineError>
where
    S: SurfaceWriter,
{
    let config = config.cloned().unwrap_or_default();
    raster::buffer_len(width, height)?;
    config.validate()?;
    PerlinEngine::new(config.seed).draw(surface, width, height, Some(&config))
}
