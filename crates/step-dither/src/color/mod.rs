//! Color value type
//!
//! [`Color`] carries four `f64` channels on the 0..=255 scale. It is the
//! unit of work for quantization and error diffusion; pixels are only
//! turned back into bytes when written to a [`PixelBuffer`](crate::PixelBuffer).
//!
//! # Example
//!
//! ```
//! use step_dither::Color;
//!
//! let pixel = Color::from_bytes([200, 200, 200, 255]);
//! let quantized = Color::rgb(255.0, 255.0, 255.0);
//! let error = pixel.difference(quantized);
//! assert_eq!(error.r, -55.0);
//! ```

mod rgba;

pub use rgba::{Color, OPAQUE};
