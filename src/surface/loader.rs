//! Fetches image bytes from a URL or the local filesystem.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::LoadError;

/// Where an image reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(String),
    Local(PathBuf),
}

impl ImageSource {
    /// Classify `reference`, resolving relative paths against `base_dir`.
    pub fn parse(reference: &str, base_dir: &Path) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return ImageSource::Remote(reference.to_string());
        }
        let path = reference.strip_prefix("file://").unwrap_or(reference);
        let path = Path::new(path);
        if path.is_absolute() {
            ImageSource::Local(path.to_path_buf())
        } else {
            ImageSource::Local(base_dir.join(path))
        }
    }
}

/// Single-shot image fetcher: one request per load, no retries.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
    base_dir: PathBuf,
}

impl ImageLoader {
    /// Without a `timeout` a remote fetch waits as long as the server does.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        timeout: Option<Duration>,
    ) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("dithercanvas/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(LoadError::Client)?;
        Ok(Self {
            client,
            base_dir: base_dir.into(),
        })
    }

    /// Read the raw bytes behind `reference`.
    pub async fn fetch(&self, reference: &str) -> Result<Vec<u8>, LoadError> {
        match ImageSource::parse(reference, &self.base_dir) {
            ImageSource::Remote(url) => self.fetch_remote(url).await,
            ImageSource::Local(path) => {
                tracing::debug!(path = %path.display(), "Reading image file");
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| LoadError::Io { path, source })
            }
        }
    }

    async fn fetch_remote(&self, url: String) -> Result<Vec<u8>, LoadError> {
        tracing::debug!(url = %url, "Fetching image");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => return Err(LoadError::Http { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url,
                status: status.as_u16(),
            });
        }

        match response.bytes().await {
            Ok(bytes) => {
                tracing::debug!(url = %url, bytes = bytes.len(), "Fetched image");
                Ok(bytes.to_vec())
            }
            Err(source) => Err(LoadError::Http { url, source }),
        }
    }
}
