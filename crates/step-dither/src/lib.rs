//! step-dither: Floyd-Steinberg error diffusion on flat RGBA buffers
//!
//! Quantizes every channel of an RGBA8 image to `steps + 1` evenly spaced
//! levels and diffuses the quantization error to neighboring pixels, so the
//! dithered output keeps the average color of the source.
//!
//! # Quick Start
//!
//! ```
//! use step_dither::{PixelBuffer, StepDitherer};
//!
//! let mut source = PixelBuffer::from_rgba(vec![200, 200, 200, 255].repeat(4), 2, 2).unwrap();
//! let output = StepDitherer::new().dither(&mut source).unwrap();
//!
//! assert_eq!(output.read_color(0, 0).to_bytes(), [255, 255, 255, 255]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! source (RGBA8, mutable)
//!     |
//!     |  raster order: y = 0..height, x = 0..width
//!     v
//! read Color ----> quantize (closest_step per channel, alpha too)
//!     |                 |
//!     |                 v
//!     +------> error = current - quantized
//!                       |
//!                       +--> diffuse into source:  .   X   7
//!                       |                          3   5   1   (/16)
//!                       v
//!              [grayscale]  ->  write to output (RGBA8)
//! ```
//!
//! Diffusion writes into the *source* buffer, so pixels ahead of the scan
//! carry the accumulated error when they are read. The source is therefore
//! modified by a pass; the output is a separate buffer of equal size.
//!
//! # Step Levels
//!
//! `closest_step(v, S) = round(S * v / 255) * floor(255 / S)`. With `S = 1`
//! each channel is 0 or 255. When `S` does not divide 255 the highest level
//! is `floor(255 / S) * S`, slightly below 255; for `S > 255` every level
//! collapses to 0.
//!
//! # Storage
//!
//! Channel math runs in `f64`. Writing a [`Color`] to a [`PixelBuffer`]
//! clamps to 0..=255 and rounds half to even, which is how an 8-bit
//! clamped byte array stores numbers.

pub mod api;
pub mod buffer;
pub mod color;
pub mod dither;


pub use api::{dither, dither_rgba, DitherError, StepDitherer};
pub use buffer::{channel_indices, index_of, BufferError, PixelBuffer};
pub use color::Color;
pub use dither::{
    closest_step, quantize_color, ConfigError, Diffuser, DitherOptions, DitherPass, EdgeMode,
    Kernel, PassState, FLOYD_STEINBERG,
};
