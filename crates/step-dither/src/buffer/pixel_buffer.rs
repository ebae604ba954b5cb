//! Flat RGBA pixel buffer with coordinate addressing.

use super::error::BufferError;
use crate::color::Color;

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// Offset of the red channel of pixel `(x, y)` in a row-major RGBA buffer.
///
/// Green, blue and alpha follow at `+1`, `+2` and `+3`. No bounds checking
/// is performed; callers must keep coordinates inside the buffer.
///
/// # Example
/// ```
/// use step_dither::index_of;
/// assert_eq!(index_of(0, 0, 3), 0);
/// assert_eq!(index_of(2, 1, 3), 20);
/// ```
#[inline]
pub fn index_of(x: usize, y: usize, width: usize) -> usize {
    y * width * CHANNELS + x * CHANNELS
}

/// Offsets of all four channels of pixel `(x, y)`.
#[inline]
pub fn channel_indices(x: usize, y: usize, width: usize) -> [usize; CHANNELS] {
    let index = index_of(x, y, width);
    [index, index + 1, index + 2, index + 3]
}

/// An owned RGBA8 pixel buffer.
///
/// Holds `width * height * 4` bytes in row-major order with four contiguous
/// bytes per pixel. Writes go through [`Color::to_bytes`], so values outside
/// 0..=255 are clamped exactly like an 8-bit clamped array would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Create a zero-filled buffer (transparent black).
    pub fn new(width: usize, height: usize) -> Result<Self, BufferError> {
        let len = byte_len(width, height)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Wrap existing RGBA bytes.
    ///
    /// Fails with [`BufferError::LengthMismatch`] unless
    /// `data.len() == width * height * 4`.
    ///
    /// # Example
    /// ```
    /// use step_dither::PixelBuffer;
    /// assert!(PixelBuffer::from_rgba(vec![0; 16], 2, 2).is_ok());
    /// assert!(PixelBuffer::from_rgba(vec![0; 15], 2, 2).is_err());
    /// ```
    pub fn from_rgba(data: Vec<u8>, width: usize, height: usize) -> Result<Self, BufferError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a zero-filled buffer with the same dimensions as `other`.
    pub fn new_like(other: &PixelBuffer) -> Self {
        Self {
            data: vec![0; other.data.len()],
            width: other.width,
            height: other.height,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the raw RGBA bytes.
    #[inline]
    pub fn into_rgba(self) -> Vec<u8> {
        self.data
    }

    /// RGBA bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        assert!(y < self.height, "row {y} outside height {}", self.height);
        let stride = self.width * CHANNELS;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Mutable RGBA bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        assert!(y < self.height, "row {y} outside height {}", self.height);
        let stride = self.width * CHANNELS;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    /// Whether `(x, y)` lies inside the buffer.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    /// Read the color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the buffer.
    #[inline]
    pub fn read_color(&self, x: usize, y: usize) -> Color {
        self.read_color_at(index_of(x, y, self.width))
            .unwrap_or_else(|| panic!("pixel ({x}, {y}) outside {}x{}", self.width, self.height))
    }

    /// Write `color` at `(x, y)`, clamping each channel to 0..=255.
    ///
    /// # Panics
    ///
    /// Panics if the pixel lies outside the buffer.
    #[inline]
    pub fn write_color(&mut self, x: usize, y: usize, color: Color) {
        let (width, height) = (self.width, self.height);
        if !self.write_color_at(index_of(x, y, width), color) {
            panic!("pixel ({x}, {y}) outside {width}x{height}");
        }
    }

    /// Read the pixel starting at flat byte `offset`.
    ///
    /// Returns `None` when the four bytes at `offset` are not all inside
    /// the buffer.
    #[inline]
    pub fn read_color_at(&self, offset: usize) -> Option<Color> {
        let bytes = self.data.get(offset..offset.checked_add(CHANNELS)?)?;
        Some(Color::from_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Write the pixel starting at flat byte `offset`.
    ///
    /// Returns `false` and leaves the buffer untouched when the four bytes
    /// at `offset` are not all inside the buffer.
    #[inline]
    pub fn write_color_at(&mut self, offset: usize, color: Color) -> bool {
        let Some(end) = offset.checked_add(CHANNELS) else {
            return false;
        };
        match self.data.get_mut(offset..end) {
            Some(slot) => {
                slot.copy_from_slice(&color.to_bytes());
                true
            }
            None => false,
        }
    }
}

fn byte_len(width: usize, height: usize) -> Result<usize, BufferError> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(CHANNELS))
        .ok_or(BufferError::DimensionOverflow { width, height })
}
