use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use step_dither::{DitherOptions, EdgeMode};

use super::CanvasSpec;

/// Application configuration loaded from config.yaml
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Source image: `http(s)://` URL or a path relative to the config file
    pub image_url: String,

    /// Quantization steps per channel (levels minus one)
    pub steps: u32,

    /// Reduce every quantized pixel to gray
    pub grayscale: bool,

    /// Share of the canvas width the source image is drawn at
    pub source_width_fraction: f64,

    /// Drawing surface size
    pub canvas: CanvasSpec,

    /// Bounds handling at the right/bottom edge while diffusing
    pub edge_mode: EdgeModeSetting,

    /// Diffuse alpha error along with color error
    pub diffuse_alpha: bool,

    /// Timeout for fetching a remote image; unset waits indefinitely
    pub fetch_timeout_secs: Option<u64>,
}

/// Serializable mirror of [`EdgeMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EdgeModeSetting {
    /// Skip neighbors outside the image
    #[default]
    Strict,
    /// Let error past the last column wrap into the next row
    Legacy,
}

impl From<EdgeModeSetting> for EdgeMode {
    fn from(setting: EdgeModeSetting) -> Self {
        match setting {
            EdgeModeSetting::Strict => EdgeMode::Strict,
            EdgeModeSetting::Legacy => EdgeMode::Legacy,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// Falls back to defaults (with a warning) when there is no file or it
    /// cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        image = %config.image_url,
                        steps = config.steps,
                        grayscale = config.grayscale,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Directory relative image paths are resolved against.
    ///
    /// This is the config file's directory, or the working directory when
    /// there is no config file.
    pub fn base_dir(config_path: Option<&Path>) -> PathBuf {
        config_path
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Client timeout for remote images, if one is configured.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Engine options for one pass.
    pub fn dither_options(&self) -> DitherOptions {
        DitherOptions::new()
            .steps(self.steps)
            .grayscale(self.grayscale)
            .edge_mode(self.edge_mode.into())
            .diffuse_alpha(self.diffuse_alpha)
    }

    /// Reject values that cannot describe a render.
    ///
    /// Step counts are checked by the engine itself.
    pub fn validate(&self) -> Result<(), String> {
        let fraction = self.source_width_fraction;
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(format!(
                "source_width_fraction must be in (0, 1], got {fraction}"
            ));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(format!(
                "canvas must not be empty, got {}x{}",
                self.canvas.width, self.canvas.height
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            image_url: "img/test-01.png".to_string(),
            steps: 1,
            grayscale: false,
            source_width_fraction: 0.5,
            canvas: CanvasSpec::default(),
            edge_mode: EdgeModeSetting::Strict,
            diffuse_alpha: true,
            fetch_timeout_secs: None,
        }
    }
}
