//! StepDitherer builder -- the primary ergonomic entry point for the crate.
//!
//! [`StepDitherer`] wraps [`DitherOptions`] with fluent configuration and
//! runs complete passes. [`dither`] and [`dither_rgba`] are one-shot
//! shortcuts for callers that already hold options.

use crate::buffer::PixelBuffer;
use crate::dither::{DitherOptions, DitherPass, EdgeMode};

use super::error::DitherError;

/// High-level dithering builder.
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder pattern)
/// - [`dither()`](Self::dither) takes `&self`, so the builder is reusable
///   across multiple images
/// - Options are validated on every call, before the source is touched
///
/// # Example
///
/// ```
/// use step_dither::{PixelBuffer, StepDitherer};
///
/// let ditherer = StepDitherer::new().steps(2).grayscale(true);
///
/// let mut source = PixelBuffer::from_rgba(vec![128; 4 * 4 * 4], 4, 4).unwrap();
/// let output = ditherer.dither(&mut source).unwrap();
///
/// assert_eq!(output.width(), 4);
/// assert_eq!(output.height(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StepDitherer {
    options: DitherOptions,
}

impl StepDitherer {
    /// Create a ditherer with default options (1 step, color, strict edges).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ditherer from existing options.
    pub fn with_options(options: DitherOptions) -> Self {
        Self { options }
    }

    /// Set the step count (levels per channel minus one).
    #[inline]
    pub fn steps(mut self, steps: u32) -> Self {
        self.options = self.options.steps(steps);
        self
    }

    /// Enable or disable grayscale output.
    #[inline]
    pub fn grayscale(mut self, enabled: bool) -> Self {
        self.options = self.options.grayscale(enabled);
        self
    }

    /// Set bounds handling at the right/bottom edge.
    #[inline]
    pub fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.options = self.options.edge_mode(mode);
        self
    }

    /// Enable or disable alpha error diffusion.
    #[inline]
    pub fn diffuse_alpha(mut self, enabled: bool) -> Self {
        self.options = self.options.diffuse_alpha(enabled);
        self
    }

    /// The options this ditherer runs with.
    #[inline]
    pub fn options(&self) -> &DitherOptions {
        &self.options
    }

    /// Dither `source` into a new buffer of the same size.
    ///
    /// `source` is rewritten with the diffused error as a side effect;
    /// copy it first if the original pixels are still needed.
    pub fn dither(&self, source: &mut PixelBuffer) -> Result<PixelBuffer, DitherError> {
        dither(source, &self.options)
    }

    /// Dither raw RGBA bytes, see [`dither_rgba`].
    pub fn dither_rgba(
        &self,
        data: &mut [u8],
        width: usize,
        height: usize,
    ) -> Result<Vec<u8>, DitherError> {
        dither_rgba(data, width, height, &self.options)
    }
}

/// Run one complete pass over `source`.
///
/// Fails with [`DitherError::InvalidConfig`] before any pixel is processed
/// if the options are unusable. `source` ends up holding the diffused error.
pub fn dither(
    source: &mut PixelBuffer,
    options: &DitherOptions,
) -> Result<PixelBuffer, DitherError> {
    Ok(DitherPass::new(source, options)?.finish())
}

/// Dither a raw `width x height` RGBA8 byte buffer.
///
/// Returns the dithered bytes. `data` is overwritten with the
/// error-adjusted source, mirroring [`dither`]. Fails with
/// [`DitherError::InvalidBuffer`] if `data.len() != width * height * 4`,
/// and with [`DitherError::InvalidConfig`] for unusable options; in both
/// cases `data` is left untouched.
///
/// # Example
///
/// ```
/// use step_dither::{dither_rgba, DitherOptions};
///
/// let mut data = vec![200, 200, 200, 255];
/// let out = dither_rgba(&mut data, 1, 1, &DitherOptions::new()).unwrap();
/// assert_eq!(out, vec![255, 255, 255, 255]);
/// ```
pub fn dither_rgba(
    data: &mut [u8],
    width: usize,
    height: usize,
    options: &DitherOptions,
) -> Result<Vec<u8>, DitherError> {
    options.validate()?;
    let mut source = PixelBuffer::from_rgba(data.to_vec(), width, height)?;
    let output = dither(&mut source, options)?;
    data.copy_from_slice(source.as_bytes());
    Ok(output.into_rgba())
}
