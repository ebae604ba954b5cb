//! Public API for step-dither.
//!
//! This module provides the [`StepDitherer`] builder, the one-shot
//! [`dither`] / [`dither_rgba`] entry points and the unified
//! [`DitherError`] type.

mod builder;
mod error;

pub use builder::{dither, dither_rgba, StepDitherer};
pub use error::DitherError;
