//! Step quantizer.
//!
//! A step count `S` gives `S + 1` levels per channel, spaced
//! `floor(255 / S)` apart and always including 0. When `S` does not divide
//! 255 the top level sits below 255 (e.g. `S = 2` tops out at 254); that
//! attenuation is part of the output format and is kept as is.

use crate::color::Color;

/// Maximum channel value.
pub const MAX_CHANNEL: f64 = 255.0;

/// Spacing between adjacent levels: `floor(255 / steps)`.
///
/// Zero when `steps > 255`, in which case every value quantizes to 0.
#[inline]
pub fn step_size(steps: u32) -> u32 {
    255 / steps.max(1)
}

/// Highest representable level: `floor(255 / steps) * steps`.
#[inline]
pub fn max_level(steps: u32) -> u32 {
    step_size(steps).saturating_mul(steps)
}

/// Map a channel value to the closest step level.
///
/// Computes `round(steps * value / 255) * floor(255 / steps)` with
/// round-half-up. `steps` must be at least 1.
///
/// # Example
/// ```
/// use step_dither::closest_step;
/// assert_eq!(closest_step(200.0, 1), 255.0);
/// assert_eq!(closest_step(100.0, 1), 0.0);
/// assert_eq!(closest_step(255.0, 2), 254.0);
/// ```
#[inline]
pub fn closest_step(value: f64, steps: u32) -> f64 {
    debug_assert!(steps >= 1, "steps must be at least 1");
    let steps = steps as f64;
    round_half_up(steps * value / MAX_CHANNEL) * (MAX_CHANNEL / steps).floor()
}

/// Quantize all four channels, alpha included.
#[inline]
pub fn quantize_color(color: Color, steps: u32) -> Color {
    Color::new(
        closest_step(color.r, steps),
        closest_step(color.g, steps),
        closest_step(color.b, steps),
        closest_step(color.a, steps),
    )
}

/// Round to nearest, ties toward positive infinity.
#[inline]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
