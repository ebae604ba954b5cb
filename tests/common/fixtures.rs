//! Test fixtures: PNG images generated on the fly.

use step_dither::PixelBuffer;

/// Encode raw RGBA8 pixels as PNG
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgba).unwrap();
    }
    out
}

/// Single-color RGBA image
pub fn solid_rgba(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    rgba.repeat((width * height) as usize)
}

/// Single-color PNG
pub fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    encode_png(width, height, &solid_rgba(width, height, rgba))
}

/// Horizontal gray ramp, opaque
pub fn gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            let v = ((i % width) * 255 / (width - 1).max(1)) as u8;
            [v, v, v, 255]
        })
        .collect()
}

pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    encode_png(width, height, &gradient_rgba(width, height))
}

/// Decode PNG bytes the way the server does
pub fn decode(png: &[u8]) -> PixelBuffer {
    dithercanvas::surface::png_codec::decode_rgba(png).expect("Failed to decode PNG")
}
