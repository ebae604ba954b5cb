//! RGBA color value type
//!
//! Channels are plain `f64` values on the 0..=255 scale. Intermediate results
//! (quantization errors, error-adjusted neighbors) may leave that range or
//! carry fractions; clamping only happens when a color is stored as bytes.

use std::ops::Add;

/// Fully opaque alpha value.
pub const OPAQUE: f64 = 255.0;

/// Luma weights used by [`Color::to_grayscale`].
const LUMA_R: f64 = 0.3;
const LUMA_G: f64 = 0.59;
const LUMA_B: f64 = 0.11;

/// A four-channel color on the 0..=255 scale.
///
/// `Color` is a transient value: it is built for a single pixel read or
/// computation and never stored anywhere except as bytes in a
/// [`PixelBuffer`](crate::PixelBuffer).
///
/// No validation happens on construction. Negative or oversized channel
/// values are legal and represent signed quantization error or
/// error-adjusted pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Alpha channel (255 is opaque)
    pub a: f64,
}

impl Color {
    /// Create a color from four channel values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color (alpha = 255).
    ///
    /// # Example
    /// ```
    /// use step_dither::Color;
    /// let c = Color::rgb(10.0, 20.0, 30.0);
    /// assert_eq!(c.a, 255.0);
    /// ```
    #[inline]
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, OPAQUE)
    }

    /// Create a color from stored bytes `[R, G, B, A]`.
    #[inline]
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(
            bytes[0] as f64,
            bytes[1] as f64,
            bytes[2] as f64,
            bytes[3] as f64,
        )
    }

    /// Convert to bytes `[R, G, B, A]` the way an 8-bit clamped store does.
    ///
    /// Each channel is clamped to 0..=255 and rounded half-to-even. NaN
    /// stores as 0.
    ///
    /// # Example
    /// ```
    /// use step_dither::Color;
    /// let c = Color::new(-12.0, 300.0, 2.5, 3.5);
    /// assert_eq!(c.to_bytes(), [0, 255, 2, 4]);
    /// ```
    #[inline]
    pub fn to_bytes(self) -> [u8; 4] {
        [
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b),
            channel_to_byte(self.a),
        ]
    }

    /// Channel-wise `self - other`, alpha included.
    #[inline]
    pub fn difference(self, other: Color) -> Self {
        Self::new(
            self.r - other.r,
            self.g - other.g,
            self.b - other.b,
            self.a - other.a,
        )
    }

    /// Multiply every channel, alpha included, by `factor`.
    #[inline]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.r * factor,
            self.g * factor,
            self.b * factor,
            self.a * factor,
        )
    }

    /// Reduce to a luma-weighted gray.
    ///
    /// Red, green and blue all become `0.3*R + 0.59*G + 0.11*B`. Alpha is
    /// overwritten with 255 rather than preserved.
    ///
    /// # Example
    /// ```
    /// use step_dither::Color;
    /// let gray = Color::new(255.0, 0.0, 0.0, 0.0).to_grayscale();
    /// assert!((gray.r - 76.5).abs() < 1e-9);
    /// assert_eq!(gray.r, gray.g);
    /// assert_eq!(gray.a, 255.0);
    /// ```
    #[inline]
    pub fn to_grayscale(self) -> Self {
        let average = LUMA_R * self.r + LUMA_G * self.g + LUMA_B * self.b;
        Self::new(average, average, average, OPAQUE)
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }
}

impl Add for Color {
    type Output = Color;

    /// Channel-wise sum, alpha included.
    #[inline]
    fn add(self, other: Color) -> Color {
        Color::new(
            self.r + other.r,
            self.g + other.g,
            self.b + other.b,
            self.a + other.a,
        )
    }
}

impl From<[u8; 4]> for Color {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

/// Store a channel value as an 8-bit clamped byte.
#[inline]
fn channel_to_byte(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
