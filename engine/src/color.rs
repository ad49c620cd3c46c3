use crate::api::EngineError;
use crate::config::{ColorMap, ColorStop};

/// Converts noise values into RGBA pixels.
#[derive(Debug, Clone, Default)]
pub struct ColorMapper {
    palette: Option<Box<[[u8; 4]; 256]>>,
}

impl ColorMapper {
    pub fn new(map: &ColorMap) -> Result<Self, EngineError> {
        map.validate()?;
        let palette = match map {
            ColorMap::Grayscale => None,
            ColorMap::Palette(stops) => Some(build_lut(stops)),
        };
        Ok(Self { palette })
    }

    pub fn grayscale() -> Self {
        Self::default()
    }

    /// `round((v + 1) / 2 * 255)` after clamping `v` to `[-1, 1]`.
    #[inline]
    pub fn intensity(value: f64) -> u8 {
        let v = value.clamp(-1.0, 1.0);
        ((v + 1.0) / 2.0 * 255.0).round() as u8
    }

    #[inline]
    pub fn map(&self, value: f64) -> [u8; 4] {
        let i = Self::intensity(value);
        match &self.palette {
            Some(lut) => lut[i as usize],
            None => [i, i, i, 255],
        }
    }
}

fn build_lut(stops: &[ColorStop]) -> Box<[[u8; 4]; 256]> {
    let mut sorted = stops.to_vec();
    sorted.sort_by(|a, b| a.position.total_cmp(&b.position));

    let mut lut = Box::new([[0u8; 4]; 256]);
    for (i, entry) in lut.iter_mut().enumerate() {
        let t = i as f64 / 255.0;
        *entry = color_at(&sorted, t);
    }
    lut
}

fn color_at(sorted: &[ColorStop], t: f64) -> [u8; 4] {
    let first = sorted[0];
    let last = sorted[sorted.len() - 1];
    if t <= first.position {
        return first.color;
    }
    if t >= last.position {
        return last.color;
    }
    for pair in sorted.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if t <= hi.position {
            let span = hi.position - lo.position;
            let f = if span > 0.0 { (t - lo.position) / span } else { 1.0 };
            let mut out = [0u8; 4];
            for c in 0..4 {
                let a = lo.color[c] as f64;
                let b = hi.color[c] as f64;
                out[c] = (a + (b - a) * f).round() as u8;
            }
            return out;
        }
    }
    last.color
}
