use tracing::warn;

use crate::api::EngineError;
use crate::raster::{buffer_len, PixelBuffer};

/// Host-side sink for finished buffers.
pub trait SurfaceWriter {
    fn commit(&mut self, buffer: PixelBuffer) -> Result<(), EngineError>;
}

/// Hands `buffer` to `surface` after checking it matches the announced size.
pub fn commit<S>(
    surface: &mut S,
    buffer: PixelBuffer,
    width: u32,
    height: u32,
) -> Result<(), EngineError>
where
    S: SurfaceWriter + ?Sized,
{
    let expected = buffer_len(width, height)?;
    if buffer.width() != width || buffer.height() != height || buffer.as_bytes().len() != expected {
        return Err(EngineError::SurfaceWriteFailure(format!(
            "buffer is {}x{} ({} bytes), surface expects {}x{}",
            buffer.width(),
            buffer.height(),
            buffer.as_bytes().len(),
            width,
            height
        )));
    }
    surface.commit(buffer).inspect_err(|e| warn!(width, height, "surface commit failed: {e}"))
}

/// Surface backed by memory with a fixed size; keeps the last committed buffer.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    last: Option<PixelBuffer>,
    commits: usize,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, last: None, commits: 0 }
    }

    pub fn last(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }

    pub fn take(&mut self) -> Option<PixelBuffer> {
        self.last.take()
    }

    pub fn commits(&self) -> usize {
        self.commits
    }
}

impl SurfaceWriter for MemorySurface {
    fn commit(&mut self, buffer: PixelBuffer) -> Result<(), EngineError> {
        if buffer.width() != self.width || buffer.height() != self.height {
            return Err(EngineError::SurfaceWriteFailure(format!(
                "backing store is {}x{}, got {}x{}",
                self.width,
                self.height,
                buffer.width(),
                buffer.height()
            )));
        }
        self.last = Some(buffer);
        self.commits += 1;
        Ok(())
    }
}
