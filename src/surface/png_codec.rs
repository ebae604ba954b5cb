//! PNG decoding to RGBA8 buffers and RGBA8 encoding for presentation.

use std::io::Cursor;
use step_dither::PixelBuffer;

use crate::error::{LoadError, PresentError};

/// Decode PNG bytes into an RGBA8 buffer.
///
/// Palette, low bit depth and 16-bit images are normalized to 8 bits per
/// channel; gray and RGB images become opaque RGBA.
pub fn decode_rgba(bytes: &[u8]) -> Result<PixelBuffer, LoadError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| LoadError::Decode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| LoadError::Decode(e.to_string()))?;

    if info.width == 0 || info.height == 0 {
        return Err(LoadError::EmptyImage {
            width: info.width,
            height: info.height,
        });
    }

    let pixels = &buf[..info.buffer_size()];
    let rgba: Vec<u8> = match info.color_type {
        png::ColorType::Rgba => pixels.to_vec(),
        png::ColorType::Rgb => pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => pixels
            .chunks_exact(2)
            .flat_map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => pixels.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(LoadError::Decode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width = info.width,
        height = info.height,
        color_type = ?info.color_type,
        "Decoded PNG"
    );

    Ok(PixelBuffer::from_rgba(
        rgba,
        info.width as usize,
        info.height as usize,
    )?)
}

/// Encode an RGBA8 buffer as PNG.
///
/// The fast encoder output is re-compressed with oxipng; if that fails the
/// unoptimized bytes are returned.
pub fn encode_rgba(buffer: &PixelBuffer) -> Result<Vec<u8>, PresentError> {
    let png_bytes = encode_fast(buffer)?;
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

fn encode_fast(buffer: &PixelBuffer) -> Result<Vec<u8>, PresentError> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| PresentError::PngEncode(format!("width {} too large", buffer.width())))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| PresentError::PngEncode(format!("height {} too large", buffer.height())))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| PresentError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(buffer.as_bytes())
            .map_err(|e| PresentError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
