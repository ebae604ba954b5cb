//! Error diffusion dithering engine.
//!
//! A [`DitherPass`] walks the source buffer once in raster order. For every
//! pixel it:
//!
//! 1. reads the current (error-adjusted) color from the source,
//! 2. quantizes all four channels to the nearest step level,
//! 3. computes the error `current - quantized`,
//! 4. diffuses that error into later neighbors *in the source buffer*,
//! 5. optionally reduces the quantized color to gray,
//! 6. writes the quantized color to the output buffer.
//!
//! Step 4 is why the pass needs `&mut` access to the source: later reads see
//! the error accumulated by earlier pixels. Rows depend on the rows above
//! them, so the scan is strictly sequential.
//!
//! # Example
//!
//! ```
//! use step_dither::{DitherOptions, DitherPass, PassState, PixelBuffer};
//!
//! let mut source = PixelBuffer::from_rgba(vec![200, 200, 200, 255].repeat(4), 2, 2).unwrap();
//! let mut pass = DitherPass::new(&mut source, &DitherOptions::new()).unwrap();
//! assert_eq!(pass.state(), PassState::Idle);
//!
//! pass.run();
//! assert_eq!(pass.state(), PassState::Done);
//!
//! let output = pass.into_output().unwrap();
//! assert_eq!(output.read_color(0, 0).to_bytes(), [255, 255, 255, 255]);
//! ```

mod diffuse;
mod kernel;
mod options;
mod quantize;

pub use diffuse::{Diffuser, EdgeMode};
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::{ConfigError, DitherOptions};
pub use quantize::{closest_step, max_level, quantize_color, step_size, MAX_CHANNEL};

use crate::api::DitherError;
use crate::buffer::{BufferError, PixelBuffer};

/// Lifecycle of a [`DitherPass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// Created, no pixel processed yet.
    Idle,
    /// Scan in progress.
    Running,
    /// Every pixel processed; the output is complete.
    Done,
}

/// A single raster-order dither pass over one source buffer.
///
/// The pass borrows the source mutably (diffusion rewrites pixels ahead of
/// the scan) and owns the output until the pass is done.
#[derive(Debug)]
pub struct DitherPass<'a> {
    source: &'a mut PixelBuffer,
    output: PixelBuffer,
    steps: u32,
    grayscale: bool,
    diffuser: Diffuser,
    state: PassState,
}

impl<'a> DitherPass<'a> {
    /// Prepare a pass over `source`.
    ///
    /// Rejects invalid options before anything is touched. The output
    /// buffer starts zero-filled with the source's dimensions.
    pub fn new(source: &'a mut PixelBuffer, options: &DitherOptions) -> Result<Self, DitherError> {
        let output = PixelBuffer::new_like(source);
        Self::with_output(source, output, options)
    }

    /// Prepare a pass that writes into a caller-supplied output buffer.
    ///
    /// Every output pixel is overwritten by the scan, so `output` may hold
    /// anything as long as its dimensions match the source.
    pub fn with_output(
        source: &'a mut PixelBuffer,
        output: PixelBuffer,
        options: &DitherOptions,
    ) -> Result<Self, DitherError> {
        options.validate()?;
        let expected = (source.width(), source.height());
        let actual = (output.width(), output.height());
        if expected != actual {
            return Err(BufferError::SizeMismatch { expected, actual }.into());
        }
        Ok(Self {
            source,
            output,
            steps: options.steps,
            grayscale: options.grayscale,
            diffuser: Diffuser::new(&FLOYD_STEINBERG, options.edge_mode, options.diffuse_alpha),
            state: PassState::Idle,
        })
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> PassState {
        self.state
    }

    /// Run the scan to completion.
    ///
    /// A pass runs at most once; calling `run` on a finished pass does
    /// nothing.
    pub fn run(&mut self) {
        if self.state != PassState::Idle {
            return;
        }
        self.state = PassState::Running;

        for y in 0..self.source.height() {
            for x in 0..self.source.width() {
                self.process_pixel(x, y);
            }
        }

        self.state = PassState::Done;
    }

    /// Run the scan if it has not run yet and hand over the output.
    pub fn finish(mut self) -> PixelBuffer {
        self.run();
        self.output
    }

    /// Hand over the output buffer.
    ///
    /// Returns `None` if the pass has not run yet.
    pub fn into_output(self) -> Option<PixelBuffer> {
        (self.state == PassState::Done).then_some(self.output)
    }

    fn process_pixel(&mut self, x: usize, y: usize) {
        let current = self.source.read_color(x, y);
        let mut quantized = quantize_color(current, self.steps);
        let error = current.difference(quantized);

        self.diffuser.distribute(self.source, error, x, y);

        if self.grayscale {
            quantized = quantized.to_grayscale();
        }
        self.output.write_color(x, y, quantized);
    }
}
