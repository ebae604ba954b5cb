//! Dithering options and configuration.
//!
//! This module provides the [`DitherOptions`] struct for configuring a
//! dither pass, and [`ConfigError`] for rejecting unusable settings.

use std::fmt;

use super::diffuse::EdgeMode;

/// Configuration options for a dither pass.
///
/// # Defaults
///
/// - Steps: 1 (two levels per channel, black or full intensity)
/// - Grayscale: disabled
/// - Edge mode: [`EdgeMode::Strict`]
/// - Alpha diffusion: enabled
///
/// # Example
///
/// ```
/// use step_dither::{DitherOptions, EdgeMode};
///
/// let options = DitherOptions::new()
///     .steps(4)
///     .grayscale(true)
///     .edge_mode(EdgeMode::Legacy);
/// assert_eq!(options.steps, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherOptions {
    /// Quantization granularity: each channel gets `steps + 1` levels.
    ///
    /// Must be at least 1. Default: `1`
    pub steps: u32,

    /// Convert each quantized pixel to luma-weighted gray before output.
    ///
    /// The conversion happens after the error has been computed, so the
    /// diffused error is always the per-channel color error.
    ///
    /// Default: `false`
    pub grayscale: bool,

    /// Bounds handling for neighbors past the right/bottom edge.
    ///
    /// Default: [`EdgeMode::Strict`]
    pub edge_mode: EdgeMode,

    /// Diffuse alpha error along with color error.
    ///
    /// Default: `true`
    pub diffuse_alpha: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            steps: 1,
            grayscale: false,
            edge_mode: EdgeMode::Strict,
            diffuse_alpha: true,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step count.
    #[inline]
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Enable or disable grayscale output.
    #[inline]
    pub fn grayscale(mut self, enabled: bool) -> Self {
        self.grayscale = enabled;
        self
    }

    /// Set the edge mode.
    #[inline]
    pub fn edge_mode(mut self, mode: EdgeMode) -> Self {
        self.edge_mode = mode;
        self
    }

    /// Enable or disable alpha error diffusion.
    #[inline]
    pub fn diffuse_alpha(mut self, enabled: bool) -> Self {
        self.diffuse_alpha = enabled;
        self
    }

    /// Check that the options describe a runnable pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps < 1 {
            return Err(ConfigError::ZeroSteps);
        }
        Ok(())
    }
}

/// Error type for invalid dither configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `steps` was 0; at least one step is required
    ZeroSteps,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroSteps => write!(f, "steps must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
