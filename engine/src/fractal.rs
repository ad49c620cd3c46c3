use crate::config::EngineConfig;
use crate::gradient::GradientNoise2D;

/// Sums octaves of [`GradientNoise2D`] into one value in `[-1, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct FractalCompositor<'a> {
    noise: &'a GradientNoise2D,
}

impl<'a> FractalCompositor<'a> {
    pub fn new(noise: &'a GradientNoise2D) -> Self {
        Self { noise }
    }

    /// Octave `i` samples at `(x, y) * lacunarity^i * scale` with weight
    /// `persistence^i`. The sum is divided by the total weight, not by the
    /// largest value reached, so the result does not depend on the field.
    pub fn sample(&self, x: f64, y: f64, config: &EngineConfig) -> f64 {
        let mut sum = 0.0;
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..config.octaves {
            let (sx, sy) = (x * frequency * config.scale, y * frequency * config.scale);
            sum += amplitude * self.noise.sample(sx, sy);
            total += amplitude;
            amplitude *= config.persistence;
            frequency *= config.lacunarity;
        }
        if total > 0.0 {
            sum / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_octave_matches_scaled_noise() {
        let noise = GradientNoise2D::from_seed(3);
        let config = EngineConfig::default().with_octaves(1).with_scale(0.25);
        let compositor = FractalCompositor::new(&noise);
        assert_eq!(compositor.sample(5.0, 9.0, &config), noise.sample(5.0 * 0.25, 9.0 * 0.25));
    }

    #[test]
    fn two_octaves_weighted_by_persistence() {
        let noise = GradientNoise2D::from_seed(8);
        let config = EngineConfig::default()
            .with_octaves(2)
            .with_persistence(0.5)
            .with_lacunarity(2.0)
            .with_scale(0.1);
        let expected = (noise.sample(0.3, 0.7) + 0.5 * noise.sample(0.6, 1.4)) / 1.5;
        let got = FractalCompositor::new(&noise).sample(3.0, 7.0, &config);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn many_octaves_stay_in_range() {
        let noise = GradientNoise2D::from_seed(21);
        let config = EngineConfig::default()
            .with_octaves(12)
            .with_persistence(0.9)
            .with_scale(0.013);
        let compositor = FractalCompositor::new(&noise);
        for i in 0..64 {
            for j in 0..64 {
                let v = compositor.sample(i as f64 * 3.0, j as f64 * 5.0, &config);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }
}
