//! Error diffuser.
//!
//! Pushes a pixel's quantization error into its not-yet-visited neighbors by
//! rewriting them in the source buffer. Raster-order reads then pick the
//! accumulated error up for free; there is no separate error buffer.

use crate::buffer::{index_of, PixelBuffer};
use crate::color::Color;

use super::kernel::{Kernel, FLOYD_STEINBERG};

/// How neighbors past the right and bottom edge are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeMode {
    /// Skip any neighbor with `x >= width` or `y >= height`.
    #[default]
    Strict,

    /// Reproduce the historical `x > width || y > height` check.
    ///
    /// A neighbor at exactly `x == width` is treated as in bounds. Its flat
    /// offset aliases the first pixel of the next row, which therefore
    /// receives the error. Neighbors whose offset falls past the end of the
    /// buffer are dropped.
    Legacy,
}

/// Distributes quantization error with a fixed kernel.
#[derive(Debug, Clone, Copy)]
pub struct Diffuser {
    kernel: &'static Kernel,
    edge_mode: EdgeMode,
    diffuse_alpha: bool,
}

impl Diffuser {
    /// Create a diffuser for `kernel`.
    pub fn new(kernel: &'static Kernel, edge_mode: EdgeMode, diffuse_alpha: bool) -> Self {
        Self {
            kernel,
            edge_mode,
            diffuse_alpha,
        }
    }

    /// Floyd-Steinberg diffuser with strict bounds and alpha diffusion.
    pub fn floyd_steinberg() -> Self {
        Self::new(&FLOYD_STEINBERG, EdgeMode::Strict, true)
    }

    /// The kernel in use.
    pub fn kernel(&self) -> &'static Kernel {
        self.kernel
    }

    /// Spread `error` from pixel `(x, y)` into its kernel neighbors.
    ///
    /// Each in-bounds neighbor is read from `buffer`, has
    /// `error * fraction` added to every channel, and is written back with
    /// 8-bit clamping. Out-of-bounds neighbors are skipped silently.
    pub fn distribute(&self, buffer: &mut PixelBuffer, error: Color, x: usize, y: usize) {
        let error = if self.diffuse_alpha {
            error
        } else {
            Color { a: 0.0, ..error }
        };

        for &(dx, dy, weight) in self.kernel.entries {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            let Some(offset) = self.target_offset(buffer, nx, ny) else {
                continue;
            };
            let Some(current) = buffer.read_color_at(offset) else {
                continue;
            };
            let adjusted = current + error.scaled(self.kernel.fraction(weight));
            buffer.write_color_at(offset, adjusted);
        }
    }

    /// Flat offset of neighbor `(nx, ny)`, or `None` if it is skipped.
    fn target_offset(&self, buffer: &PixelBuffer, nx: i64, ny: i64) -> Option<usize> {
        let in_bounds = match self.edge_mode {
            EdgeMode::Strict => buffer.contains(nx, ny),
            EdgeMode::Legacy => {
                nx >= 0
                    && ny >= 0
                    && nx as u64 <= buffer.width() as u64
                    && ny as u64 <= buffer.height() as u64
            }
        };
        in_bounds.then(|| index_of(nx as usize, ny as usize, buffer.width()))
    }
}

impl Default for Diffuser {
    fn default() -> Self {
        Self::floyd_steinberg()
    }
}
