use std::f64::consts::FRAC_1_SQRT_2;

use crate::permutation::PermutationTable;

/// Unit gradients selected by the low three bits of a lattice hash.
pub const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Quintic fade `6t^5 - 15t^4 + 10t^3`; first and second derivatives vanish at 0 and 1.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let (gx, gy) = GRADIENTS[(hash & 7) as usize];
    gx * x + gy * y
}

/// Single-octave 2D gradient noise over a seeded permutation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientNoise2D {
    table: PermutationTable,
}

impl GradientNoise2D {
    pub fn new(table: PermutationTable) -> Self {
        Self { table }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(PermutationTable::generate(seed))
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// Noise value at `(x, y)`, within `[-1/√2, 1/√2]`. Zero on every lattice point.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        let xf = x - x0;
        let yf = y - y0;
        let u = fade(xf);
        let v = fade(yf);

        let aa = self.table.hash(xi, yi);
        let ba = self.table.hash(xi + 1, yi);
        let ab = self.table.hash(xi, yi + 1);
        let bb = self.table.hash(xi + 1, yi + 1);

        let bottom = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let top = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
        lerp(bottom, top, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradients_are_unit_length() {
        for (gx, gy) in GRADIENTS {
            assert!(((gx * gx + gy * gy) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
    }

    #[test]
    fn zero_on_lattice_points() {
        let noise = GradientNoise2D::from_seed(11);
        for i in -5..5 {
            for j in -5..5 {
                assert_eq!(noise.sample(i as f64, j as f64), 0.0);
            }
        }
    }

    #[test]
    fn wraps_every_256_cells() {
        let noise = GradientNoise2D::from_seed(5);
        let a = noise.sample(3.25, 7.75);
        let b = noise.sample(3.25 + 256.0, 7.75 - 256.0);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn bounded_by_half_sqrt_two() {
        let noise = GradientNoise2D::from_seed(99);
        for i in 0..200 {
            for j in 0..200 {
                let v = noise.sample(i as f64 * 0.037, j as f64 * 0.041);
                assert!(v.abs() <= FRAC_1_SQRT_2 + 1e-12, "{v}");
            }
        }
    }
}
