use std::mem::size_of;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::api::EngineError;
use crate::color::ColorMapper;
use crate::config::{EngineConfig, Levels};
use crate::fractal::FractalCompositor;
use crate::gradient::GradientNoise2D;

pub const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA pixels, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = self.data.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

// Allocations are capped at isize::MAX bytes, which is 2 GiB on wasm32.
fn grid_bytes(width: u32, height: u32, item_size: usize) -> Result<usize, EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(item_size))
        .filter(|&bytes| bytes <= isize::MAX as usize)
        .ok_or(EngineError::InvalidDimension { width, height })
}

/// Byte length of a `width x height` RGBA buffer, rejecting empty grids and
/// grids too large to allocate.
pub fn buffer_len(width: u32, height: u32) -> Result<usize, EngineError> {
    grid_bytes(width, height, BYTES_PER_PIXEL)
}

/// Number of samples in a `width x height` scalar field, checked the same way
/// as [`buffer_len`] for `f64` storage.
pub fn field_len(width: u32, height: u32) -> Result<usize, EngineError> {
    grid_bytes(width, height, size_of::<f64>())?;
    Ok(width as usize * height as usize)
}

/// Walks the pixel grid and fills a [`PixelBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer<'a> {
    compositor: FractalCompositor<'a>,
    parallel: bool,
}

impl<'a> Rasterizer<'a> {
    pub fn new(noise: &'a GradientNoise2D) -> Self {
        Self {
            compositor: FractalCompositor::new(noise),
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Process rows on the calling thread only.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn draw(
        &self,
        config: &EngineConfig,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer, EngineError> {
        self.run(config, width, height, None)
    }

    /// Like [`Rasterizer::draw`], but gives up between rows once `cancel` is set.
    pub fn draw_cancellable(
        &self,
        config: &EngineConfig,
        width: u32,
        height: u32,
        cancel: &AtomicBool,
    ) -> Result<PixelBuffer, EngineError> {
        self.run(config, width, height, Some(cancel))
    }

    /// Raw fractal values in row-major order, before levelling and color mapping.
    pub fn sample_field(
        &self,
        config: &EngineConfig,
        width: u32,
        height: u32,
    ) -> Result<Vec<f64>, EngineError> {
        let len = field_len(width, height)?;
        config.validate()?;
        let config = config.fit_to(width, height);
        self.field(&config, width, len, None)
    }

    fn run(
        &self,
        config: &EngineConfig,
        width: u32,
        height: u32,
        cancel: Option<&AtomicBool>,
    ) -> Result<PixelBuffer, EngineError> {
        let len = buffer_len(width, height)?;
        let samples = match config.levels {
            Levels::Fixed => 0,
            Levels::Stretch => field_len(width, height)?,
        };
        config.validate()?;
        let mapper = ColorMapper::new(&config.color_map)?;
        let config = config.fit_to(width, height);
        let config = config.as_ref();
        debug!(
            width,
            height,
            octaves = config.octaves,
            scale = config.scale,
            levels = ?config.levels,
            "rasterizing noise field"
        );

        let data = match config.levels {
            Levels::Fixed => {
                let mut data = vec![0u8; len];
                let compositor = &self.compositor;
                let row_len = width as usize * BYTES_PER_PIXEL;
                self.rows(&mut data, row_len, cancel, |py, row| {
                    for (px, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                        let value = compositor.sample(px as f64, py as f64, config);
                        pixel.copy_from_slice(&mapper.map(value));
                    }
                })?;
                data
            }
            Levels::Stretch => {
                let field = self.field(config, width, samples, cancel)?;
                let (min, max) = field
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    });
                let span = max - min;
                let mut data = Vec::with_capacity(len);
                for &v in &field {
                    let levelled = if span > 0.0 { 2.0 * (v - min) / span - 1.0 } else { 0.0 };
                    data.extend_from_slice(&mapper.map(levelled));
                }
                data
            }
        };
        Ok(PixelBuffer { width, height, data })
    }

    fn field(
        &self,
        config: &EngineConfig,
        width: u32,
        len: usize,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<f64>, EngineError> {
        let mut field = vec![0.0f64; len];
        let compositor = &self.compositor;
        self.rows(&mut field, width as usize, cancel, |py, row| {
            for (px, slot) in row.iter_mut().enumerate() {
                *slot = compositor.sample(px as f64, py as f64, config);
            }
        })?;
        Ok(field)
    }

    fn rows<T, F>(
        &self,
        out: &mut [T],
        row_len: usize,
        cancel: Option<&AtomicBool>,
        fill: F,
    ) -> Result<(), EngineError>
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        if self.parallel {
            par_rows(out, row_len, cancel, fill)
        } else {
            seq_rows(out, row_len, cancel, fill)
        }
    }
}

#[inline]
fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn seq_rows<T, F>(
    out: &mut [T],
    row_len: usize,
    cancel: Option<&AtomicBool>,
    fill: F,
) -> Result<(), EngineError>
where
    F: Fn(usize, &mut [T]),
{
    for (py, row) in out.chunks_mut(row_len).enumerate() {
        if is_cancelled(cancel) {
            return Err(EngineError::Cancelled);
        }
        fill(py, row);
    }
    Ok(())
}

// Rows are disjoint slices of the output, so workers never share pixels.
#[cfg(feature = "parallel")]
fn par_rows<T, F>(
    out: &mut [T],
    row_len: usize,
    cancel: Option<&AtomicBool>,
    fill: F,
) -> Result<(), EngineError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    use rayon::prelude::*;

    out.par_chunks_mut(row_len).enumerate().try_for_each(|(py, row)| {
        if is_cancelled(cancel) {
            return Err(EngineError::Cancelled);
        }
        fill(py, row);
        Ok(())
    })
}

#[cfg(not(feature = "parallel"))]
fn par_rows<T, F>(
    out: &mut [T],
    row_len: usize,
    cancel: Option<&AtomicBool>,
    fill: F,
) -> Result<(), EngineError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    seq_rows(out, row_len, cancel, fill)
}
