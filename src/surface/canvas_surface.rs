use async_trait::async_trait;
use step_dither::{BufferError, PixelBuffer};

use super::{png_codec, resize, Canvas, ImageLoader, SourceImage, SurfaceProvider};
use crate::error::{LoadError, PresentError};
use crate::models::CanvasSpec;

/// [`SurfaceProvider`] backed by an in-memory canvas.
///
/// The source image is drawn at the left edge, scaled to
/// `source_width_fraction` of the canvas width with its aspect ratio kept,
/// and read back from the canvas. Anything drawn past the canvas edge is
/// lost, just as on a real 2D canvas.
#[derive(Debug)]
pub struct CanvasSurface {
    canvas: Canvas,
    spec: CanvasSpec,
    loader: ImageLoader,
    source_width_fraction: f64,
}

impl CanvasSurface {
    pub fn new(
        spec: CanvasSpec,
        source_width_fraction: f64,
        loader: ImageLoader,
    ) -> Result<Self, BufferError> {
        Ok(Self {
            canvas: Canvas::new(spec)?,
            spec,
            loader,
            source_width_fraction,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}

#[async_trait]
impl SurfaceProvider for CanvasSurface {
    async fn acquire_source_buffer(&mut self, url: &str) -> Result<SourceImage, LoadError> {
        let bytes = self.loader.fetch(url).await?;
        let image = png_codec::decode_rgba(&bytes)?;
        let (natural_width, natural_height) = (image.width() as u32, image.height() as u32);

        let (width, height) = self
            .spec
            .fit_source(natural_width, natural_height, self.source_width_fraction)
            .filter(|&(w, h)| w > 0 && h > 0)
            .ok_or(LoadError::EmptyImage {
                width: natural_width,
                height: natural_height,
            })?;

        let drawn = resize::resize_bilinear(&image, width as usize, height as usize)?;
        self.canvas.put(&drawn, 0, 0);
        let buffer = self.canvas.read(0, 0, width as usize, height as usize)?;

        tracing::info!(
            natural_width,
            natural_height,
            width,
            height,
            "Source image drawn"
        );

        Ok(SourceImage {
            buffer,
            natural_width,
            natural_height,
        })
    }

    fn create_output_buffer(
        &self,
        width: usize,
        height: usize,
    ) -> Result<PixelBuffer, PresentError> {
        Ok(PixelBuffer::new(width, height)?)
    }

    fn present(&mut self, buffer: &PixelBuffer, offset_x: i64, offset_y: i64) {
        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            offset_x,
            offset_y,
            "Presenting buffer"
        );
        self.canvas.put(buffer, offset_x, offset_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &std::path::Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) {
        let data = rgba.repeat((width * height) as usize);
        let buffer = PixelBuffer::from_rgba(data, width as usize, height as usize).unwrap();
        std::fs::write(dir.join(name), png_codec::encode_rgba(&buffer).unwrap()).unwrap();
    }

    fn surface(dir: &std::path::Path, spec: CanvasSpec) -> CanvasSurface {
        let loader = ImageLoader::new(dir, None).unwrap();
        CanvasSurface::new(spec, 0.5, loader).unwrap()
    }

    #[tokio::test]
    async fn test_acquire_scales_to_half_width() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "src.png", 2, 1, [40, 80, 120, 255]);

        let mut surface = surface(dir.path(), CanvasSpec::new(8, 8));
        let source = surface.acquire_source_buffer("src.png").await.unwrap();

        assert_eq!((source.natural_width, source.natural_height), (2, 1));
        assert_eq!(source.buffer.width(), 4);
        assert_eq!(source.buffer.height(), 2);
        assert!(source
            .buffer
            .as_bytes()
            .chunks_exact(4)
            .all(|px| px == [40, 80, 120, 255]));
        // drawn onto the canvas as well
        assert_eq!(
            surface.canvas().pixels().read_color(3, 1).to_bytes(),
            [40, 80, 120, 255]
        );
    }

    #[tokio::test]
    async fn test_acquire_clips_to_canvas_height() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "tall.png", 1, 4, [200, 200, 200, 255]);

        // 2 wide on the canvas -> 8 tall, canvas only has 3 rows
        let mut surface = surface(dir.path(), CanvasSpec::new(4, 3));
        let source = surface.acquire_source_buffer("tall.png").await.unwrap();

        assert_eq!(source.buffer.width(), 2);
        assert_eq!(source.buffer.height(), 8);
        assert_eq!(source.buffer.read_color(0, 2).to_bytes(), [200, 200, 200, 255]);
        assert_eq!(source.buffer.read_color(0, 3).to_bytes(), [0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_acquire_image_too_narrow_for_canvas() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "src.png", 2, 2, [1, 2, 3, 255]);

        // floor(1 * 0.5) = 0 columns
        let mut surface = surface(dir.path(), CanvasSpec::new(1, 4));
        let err = surface.acquire_source_buffer("src.png").await.unwrap_err();
        assert!(matches!(err, LoadError::EmptyImage { width: 2, height: 2 }));
    }

    #[test]
    fn test_create_output_buffer_is_zeroed() {
        let dir = tempfile::tempdir().unwrap();
        let surface = surface(dir.path(), CanvasSpec::new(4, 4));
        let out = surface.create_output_buffer(3, 2).unwrap();
        assert_eq!(out.as_bytes(), &[0; 24]);
    }

    #[test]
    fn test_present_draws_at_offset() {
        let dir = tempfile::tempdir().unwrap();
        let mut surface = surface(dir.path(), CanvasSpec::new(4, 1));
        let buffer = PixelBuffer::from_rgba(vec![255; 8], 2, 1).unwrap();
        surface.present(&buffer, 2, 0);
        assert_eq!(
            surface.into_canvas().pixels().as_bytes(),
            &[0, 0, 0, 0, 0, 0, 0, 0, 255, 255, 255, 255, 255, 255, 255, 255]
        );
    }
}
