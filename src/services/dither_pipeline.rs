use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use step_dither::{DitherError, DitherOptions, DitherPass};

use crate::error::{PipelineError, PresentError};
use crate::models::AppConfig;
use crate::surface::{Canvas, CanvasSurface, ImageLoader, SurfaceProvider};

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    /// Size of the dithered buffer (equal to the drawn source)
    pub width: usize,
    pub height: usize,
    /// Size of the image file before scaling
    pub natural_width: u32,
    pub natural_height: u32,
    /// Time spent in the dither pass itself
    pub elapsed: Duration,
}

/// Per-render replacements for configured values
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RenderOverrides {
    pub steps: Option<u32>,
    pub grayscale: Option<bool>,
}

/// Application flow: load the source onto a surface, dither it and present
/// the result directly to the right of the source.
pub struct DitherPipeline {
    config: Arc<AppConfig>,
    loader: ImageLoader,
}

impl DitherPipeline {
    /// Relative image paths are resolved against `base_dir`.
    ///
    /// Rejects unusable configuration up front, so a pipeline that was
    /// built never fails on its options.
    pub fn new(
        config: Arc<AppConfig>,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        config
            .dither_options()
            .validate()
            .map_err(DitherError::from)?;

        let loader = ImageLoader::new(base_dir, config.fetch_timeout())?;
        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Engine options for one render, checked before any pixel is loaded.
    pub fn options_for(&self, overrides: &RenderOverrides) -> Result<DitherOptions, DitherError> {
        let mut options = self.config.dither_options();
        if let Some(steps) = overrides.steps {
            options = options.steps(steps);
        }
        if let Some(grayscale) = overrides.grayscale {
            options = options.grayscale(grayscale);
        }
        options.validate()?;
        Ok(options)
    }

    /// Run one load, dither, present cycle against `surface`.
    ///
    /// The scan runs on the blocking thread pool; rows are processed in
    /// order on that one thread.
    pub async fn run<S: SurfaceProvider>(
        &self,
        surface: &mut S,
        overrides: &RenderOverrides,
    ) -> Result<PassSummary, PipelineError> {
        let options = self.options_for(overrides)?;
        let source = surface
            .acquire_source_buffer(&self.config.image_url)
            .await?;
        let (width, height) = (source.buffer.width(), source.buffer.height());
        let output = surface.create_output_buffer(width, height)?;

        let started = Instant::now();
        let mut buffer = source.buffer;
        let pass_options = options.clone();
        let output = tokio::task::spawn_blocking(move || {
            DitherPass::with_output(&mut buffer, output, &pass_options).map(DitherPass::finish)
        })
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))??;
        let elapsed = started.elapsed();

        surface.present(&output, width as i64, 0);

        tracing::info!(
            width,
            height,
            steps = options.steps,
            grayscale = options.grayscale,
            elapsed_ms = elapsed.as_millis() as u64,
            "done"
        );

        Ok(PassSummary {
            width,
            height,
            natural_width: source.natural_width,
            natural_height: source.natural_height,
            elapsed,
        })
    }

    /// Run against a fresh canvas and return it.
    pub async fn render(
        &self,
        overrides: &RenderOverrides,
    ) -> Result<(Canvas, PassSummary), PipelineError> {
        let mut surface = CanvasSurface::new(
            self.config.canvas,
            self.config.source_width_fraction,
            self.loader.clone(),
        )
        .map_err(PresentError::from)?;
        let summary = self.run(&mut surface, overrides).await?;
        Ok((surface.into_canvas(), summary))
    }

    /// Run against a fresh canvas and encode it as PNG.
    pub async fn render_png(&self, overrides: &RenderOverrides) -> Result<Vec<u8>, PipelineError> {
        let (canvas, _) = self.render(overrides).await?;
        let png_bytes = tokio::task::spawn_blocking(move || canvas.to_png())
            .await
            .map_err(|e| PipelineError::Task(e.to_string()))??;
        tracing::debug!(bytes = png_bytes.len(), "Encoded canvas");
        Ok(png_bytes)
    }
}
