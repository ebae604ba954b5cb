//! Error diffusion kernel definition.

/// An error diffusion kernel.
///
/// Each entry gives a neighbor offset `(dx, dy)` relative to the pixel
/// being processed and the numerator of the error fraction it receives.
/// The neighbor gets `error * weight / divisor`.
///
/// Offsets only point at pixels later in raster order (same row to the
/// right, or rows below), so the error always lands on pixels that have
/// not been quantized yet.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (0 = current row, positive = below)
    /// - `weight`: numerator of the error fraction
    pub entries: &'static [(i32, i32, u8)],

    /// Denominator shared by all weights.
    pub divisor: u8,
}

impl Kernel {
    /// Fraction of the error carried by `weight`.
    #[inline]
    pub fn fraction(&self, weight: u8) -> f64 {
        weight as f64 / self.divisor as f64
    }

    /// Sum of all entry fractions (1.0 means full error propagation).
    pub fn total_weight(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, _, weight)| self.fraction(weight))
            .sum()
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};
