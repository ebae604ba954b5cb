//! The drawing surface around the dithering engine.
//!
//! A [`SurfaceProvider`] hands the engine its source pixels, allocates the
//! output buffer and takes the finished buffer back for display.
//! [`CanvasSurface`] implements it on an in-memory [`Canvas`].

pub mod canvas;
pub mod canvas_surface;
pub mod loader;
pub mod png_codec;
pub mod resize;

pub use canvas::Canvas;
pub use canvas_surface::CanvasSurface;
pub use loader::{ImageLoader, ImageSource};

use async_trait::async_trait;
use step_dither::PixelBuffer;

use crate::error::{LoadError, PresentError};

/// Source pixels as they were drawn on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Drawn pixels, at the size the image occupies on the surface
    pub buffer: PixelBuffer,
    /// Width of the image file before scaling
    pub natural_width: u32,
    /// Height of the image file before scaling
    pub natural_height: u32,
}

#[async_trait]
pub trait SurfaceProvider: Send {
    /// Load the image behind `url`, draw it and return the drawn pixels.
    ///
    /// Completes exactly once with either the pixels or a [`LoadError`].
    async fn acquire_source_buffer(&mut self, url: &str) -> Result<SourceImage, LoadError>;

    /// Allocate a zero-filled buffer for the dithered output.
    fn create_output_buffer(
        &self,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer, PresentError>;

    /// Show `buffer` with its top-left corner at `(offset_x, offset_y)`.
    fn present(&mut self, buffer: &PixelBuffer, offset_x: i64, offset_y: i64);
}
