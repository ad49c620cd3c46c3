use std::borrow::Cow;
use std::sync::atomic::AtomicBool;

use tracing::debug;

use crate::api::*;
use crate::config::EngineConfig;
use crate::fractal::FractalCompositor;
use crate::gradient::GradientNoise2D;
use crate::raster::{buffer_len, PixelBuffer, Rasterizer};

/// Noise engine bound to one seed. The permutation table is built once in
/// [`PerlinEngine::new`] and never changes, so one engine can serve any
/// number of draws, from any number of threads.
#[derive(Debug, Clone)]
pub struct PerlinEngine {
    seed: Seed,
    noise: GradientNoise2D,
}

impl PerlinEngine {
    pub fn new(seed: impl Into<Seed>) -> Self {
        let seed = seed.into();
        Self { seed, noise: GradientNoise2D::from_seed(seed.0) }
    }

    pub fn noise(&self) -> &GradientNoise2D {
        &self.noise
    }

    // A config carrying another seed gets a table of its own for that call.
    fn noise_for(&self, seed: u64) -> Cow<'_, GradientNoise2D> {
        if seed == self.seed.0 {
            Cow::Borrowed(&self.noise)
        } else {
            debug!(engine_seed = self.seed.0, seed, "config seed differs from engine seed");
            Cow::Owned(GradientNoise2D::from_seed(seed))
        }
    }

    pub fn render_cancellable(
        &self,
        config: &EngineConfig,
        width: u32,
        height: u32,
        cancel: &AtomicBool,
    ) -> Result<PixelBuffer, EngineError> {
        buffer_len(width, height)?;
        config.validate()?;
        let noise = self.noise_for(config.seed);
        Rasterizer::new(&noise).draw_cancellable(config, width, height, cancel)
    }
}

impl Default for PerlinEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default().seed)
    }
}

impl NoiseEngine for PerlinEngine {
    fn seed(&self) -> Seed {
        self.seed
    }

    fn sample(&self, x: f64, y: f64, config: &EngineConfig) -> f64 {
        let noise = self.noise_for(config.seed);
        FractalCompositor::new(&noise).sample(x, y, config)
    }

    fn render(
        &self,
        config: &EngineConfig,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, EngineError> {
        buffer_len(width, height)?;
        config.validate()?;
        let noise = self.noise_for(config.seed);
        Rasterizer::new(&noise).draw(config, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn foreign_seed_matches_dedicated_engine() {
        let config = EngineConfig::default().with_seed(77);
        let shared = PerlinEngine::new(1u64).render(&config, 8, 8).unwrap();
        let dedicated = PerlinEngine::new(77u64).render(&config, 8, 8).unwrap();
        assert_eq!(shared, dedicated);
    }

    #[test]
    fn draw_without_config_uses_defaults() {
        let engine = PerlinEngine::default();
        let mut surface = MemorySurface::new(6, 4);
        engine.draw(&mut surface, 6, 4, None).unwrap();
        let expected = engine.render(&EngineConfig::default(), 6, 4).unwrap();
        assert_eq!(surface.last(), Some(&expected));
    }

    #[test]
    fn failed_render_never_commits() {
        let engine = PerlinEngine::default();
        let mut surface = MemorySurface::new(6, 4);
        let bad = EngineConfig::default().with_persistence(1.0);
        assert!(matches!(
            engine.draw(&mut surface, 6, 4, Some(&bad)),
            Err(EngineError::InvalidConfig(_))
        ));
        assert_eq!(surface.commits(), 0);
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PerlinEngine>();
    }
}
