//! Pixel buffer types
//!
//! [`PixelBuffer`] owns a flat RGBA8 byte array and maps `(x, y)`
//! coordinates onto it. [`index_of`] exposes the raw offset arithmetic.

mod error;
mod pixel_buffer;

pub use error::BufferError;
pub use pixel_buffer::{channel_indices, index_of, PixelBuffer, CHANNELS};
