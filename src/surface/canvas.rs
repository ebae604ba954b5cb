//! In-memory RGBA drawing surface.
//!
//! Mirrors the two primitives the dithering flow needs from a 2D canvas:
//! copying a buffer in at an offset and reading a rectangle back out. Both
//! clip against the canvas; reading outside it yields transparent black.

use step_dither::{BufferError, PixelBuffer};

use super::png_codec;
use crate::error::PresentError;
use crate::models::CanvasSpec;

const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: PixelBuffer,
}

/// Overlap of a span `[offset, offset + len)` with `[0, limit)`.
///
/// Returns `(start_in_span, start_in_limit, count)`.
fn clip_span(offset: i64, len: usize, limit: usize) -> Option<(usize, usize, usize)> {
    let start = offset.max(0);
    let end = offset.saturating_add(len as i64).min(limit as i64);
    if start >= end {
        return None;
    }
    Some(((start - offset) as usize, start as usize, (end - start) as usize))
}

impl Canvas {
    /// Create a transparent canvas.
    pub fn new(spec: CanvasSpec) -> Result<Self, BufferError> {
        Ok(Self {
            pixels: PixelBuffer::new(spec.width as usize, spec.height as usize)?,
        })
    }

    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Copy `buffer` onto the canvas with its top-left corner at `(dx, dy)`.
    ///
    /// Pixels replace what is underneath (no blending). Parts that fall
    /// outside the canvas are dropped.
    pub fn put(&mut self, buffer: &PixelBuffer, dx: i64, dy: i64) {
        let Some((src_x, dst_x, cols)) = clip_span(dx, buffer.width(), self.width()) else {
            return;
        };
        let Some((src_y, dst_y, rows)) = clip_span(dy, buffer.height(), self.height()) else {
            return;
        };

        let src_start = src_x * CHANNELS;
        let dst_start = dst_x * CHANNELS;
        let span = cols * CHANNELS;
        for row in 0..rows {
            let src = &buffer.row(src_y + row)[src_start..src_start + span];
            self.pixels.row_mut(dst_y + row)[dst_start..dst_start + span].copy_from_slice(src);
        }
    }

    /// Read the `width x height` rectangle at `(sx, sy)`.
    ///
    /// Pixels outside the canvas come back as transparent black.
    pub fn read(
        &self,
        sx: i64,
        sy: i64,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer, BufferError> {
        let mut out = PixelBuffer::new(width, height)?;
        let Some((dst_x, src_x, cols)) = clip_span(sx, width, self.width()) else {
            return Ok(out);
        };
        let Some((dst_y, src_y, rows)) = clip_span(sy, height, self.height()) else {
            return Ok(out);
        };

        let src_start = src_x * CHANNELS;
        let dst_start = dst_x * CHANNELS;
        let span = cols * CHANNELS;
        for row in 0..rows {
            let src = &self.pixels.row(src_y + row)[src_start..src_start + span];
            out.row_mut(dst_y + row)[dst_start..dst_start + span].copy_from_slice(src);
        }
        Ok(out)
    }

    /// Encode the whole canvas as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, PresentError> {
        png_codec::encode_rgba(&self.pixels)
    }
}
