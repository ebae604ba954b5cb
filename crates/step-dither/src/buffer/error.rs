//! Error type for pixel buffer construction.

use std::fmt;

/// Error type for pixel buffer construction.
///
/// Returned when raw bytes do not describe a `width x height` RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Byte length does not equal `width * height * 4`
    LengthMismatch {
        /// Required byte length
        expected: usize,
        /// Byte length actually supplied
        actual: usize,
    },
    /// Two buffers that must match in size do not
    SizeMismatch {
        /// Required `(width, height)`
        expected: (usize, usize),
        /// `(width, height)` actually supplied
        actual: (usize, usize),
    },
    /// `width * height * 4` does not fit in `usize`
    DimensionOverflow {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
            BufferError::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "buffer size mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            BufferError::DimensionOverflow { width, height } => {
                write!(f, "buffer dimensions {}x{} overflow", width, height)
            }
        }
    }
}

impl std::error::Error for BufferError {}
