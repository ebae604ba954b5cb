//! Unified error type for the step-dither public API.
//!
//! [`DitherError`] wraps the buffer and configuration errors into a single
//! enum for convenient `?` propagation in application code.

use crate::buffer::BufferError;
use crate::dither::ConfigError;
use std::fmt;

/// Unified error type for the step-dither public API.
///
/// Both variants are raised before the first pixel is processed; a pass
/// that has started never fails.
///
/// # Example
///
/// ```
/// use step_dither::{DitherError, DitherOptions, dither_rgba};
///
/// let mut data = vec![0u8; 15]; // not a whole 2x2 image
/// let err = dither_rgba(&mut data, 2, 2, &DitherOptions::new()).unwrap_err();
/// assert!(matches!(err, DitherError::InvalidBuffer(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DitherError {
    /// Buffer length does not match the stated dimensions
    InvalidBuffer(BufferError),
    /// Options cannot drive a pass (e.g. zero steps)
    InvalidConfig(ConfigError),
}

impl fmt::Display for DitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherError::InvalidBuffer(err) => write!(f, "invalid buffer: {}", err),
            DitherError::InvalidConfig(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl std::error::Error for DitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherError::InvalidBuffer(err) => Some(err),
            DitherError::InvalidConfig(err) => Some(err),
        }
    }
}

impl From<BufferError> for DitherError {
    fn from(err: BufferError) -> Self {
        DitherError::InvalidBuffer(err)
    }
}

impl From<ConfigError> for DitherError {
    fn from(err: ConfigError) -> Self {
        DitherError::InvalidConfig(err)
    }
}
