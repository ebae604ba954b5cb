//! Bilinear resampling for drawing the source image at its canvas size.

use step_dither::{BufferError, Color, PixelBuffer};

/// Source coordinate of destination pixel `dst_i` (pixel-center mapping).
#[inline]
fn src_coord(dst_i: usize, src_len: usize, dst_len: usize) -> f64 {
    let scale = src_len as f64 / dst_len as f64;
    let max = (src_len - 1) as f64;
    ((dst_i as f64 + 0.5) * scale - 0.5).clamp(0.0, max)
}

/// Alpha-aware blend of the four corners.
///
/// Color is weighted by alpha so transparent pixels do not bleed into
/// opaque ones; alpha itself is interpolated plainly.
#[inline]
fn blend(corners: [Color; 4], fx: f64, fy: f64) -> Color {
    let weights = [
        (1.0 - fx) * (1.0 - fy),
        fx * (1.0 - fy),
        (1.0 - fx) * fy,
        fx * fy,
    ];

    let alpha: f64 = corners.iter().zip(weights).map(|(c, w)| c.a * w).sum();
    if alpha <= 1e-9 {
        let rgb = corners
            .iter()
            .zip(weights)
            .fold(Color::new(0.0, 0.0, 0.0, 0.0), |acc, (c, w)| acc + c.scaled(w));
        return Color::new(rgb.r, rgb.g, rgb.b, alpha);
    }

    let rgb = corners
        .iter()
        .zip(weights)
        .fold(Color::new(0.0, 0.0, 0.0, 0.0), |acc, (c, w)| {
            acc + c.scaled(w * c.a / alpha)
        });
    Color::new(rgb.r, rgb.g, rgb.b, alpha)
}

/// Resample `src` to `dst_width x dst_height`.
///
/// An empty source or target yields a zero-filled buffer of the target
/// size.
pub fn resize_bilinear(
    src: &PixelBuffer,
    dst_width: usize,
    dst_height: usize,
) -> Result<PixelBuffer, BufferError> {
    if (src.width(), src.height()) == (dst_width, dst_height) {
        return Ok(src.clone());
    }
    let mut dst = PixelBuffer::new(dst_width, dst_height)?;
    if src.width() == 0 || src.height() == 0 {
        return Ok(dst);
    }

    for dst_y in 0..dst_height {
        let sy = src_coord(dst_y, src.height(), dst_height);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(src.height() - 1);
        let fy = sy - y0 as f64;

        for dst_x in 0..dst_width {
            let sx = src_coord(dst_x, src.width(), dst_width);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(src.width() - 1);
            let fx = sx - x0 as f64;

            let corners = [
                src.read_color(x0, y0),
                src.read_color(x1, y0),
                src.read_color(x0, y1),
                src.read_color(x1, y1),
            ];
            dst.write_color(dst_x, dst_y, blend(corners, fx, fy));
        }
    }

    Ok(dst)
}
