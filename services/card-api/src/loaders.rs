//! Image loading with graceful degradation.
//!
//! Sources may be `http(s)://` URLs, `data:` URIs, `file://` URLs or plain
//! filesystem paths. Optional images go through [`ImageLoader::load_image_safe`],
//! which turns every failure into `None`; only the bundled default background
//! is allowed to fail a render.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

use card_common::{CardError, CardResult};
use renderer::ImageAsset;

/// Where an image source points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource<'a> {
    Http(&'a str),
    Data(&'a str),
    File(PathBuf),
}

impl<'a> ImageSource<'a> {
    pub fn classify(source: &'a str) -> Self {
        let lower = source.get(..8).unwrap_or(source).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Http(source)
        } else if lower.starts_with("data:") {
            ImageSource::Data(source)
        } else if lower.starts_with("file://") {
            ImageSource::File(PathBuf::from(&source[7..]))
        } else {
            ImageSource::File(PathBuf::from(source))
        }
    }
}

/// Fetches and decodes images for one service instance.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
    max_bytes: usize,
}

impl ImageLoader {
    /// Loader whose remote fetches give up after `timeout`.
    pub fn new(timeout: Duration, max_bytes: usize) -> CardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(concat!("card-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CardError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, max_bytes })
    }

    /// Load an optional image. Empty sources and every failure yield `None`.
    #[instrument(skip(self), level = "debug")]
    pub async fn load_image_safe(&self, source: &str) -> Option<ImageAsset> {
        if source.is_empty() {
            return None;
        }
        match self.load(source).await {
            Ok(asset) => {
                debug!(width = asset.width(), height = asset.height(), "Loaded image");
                Some(asset)
            }
            Err(e) => {
                debug!(error = %e, "Image unavailable, treating as absent");
                None
            }
        }
    }

    /// Load and decode `source`.
    pub async fn load(&self, source: &str) -> CardResult<ImageAsset> {
        let bytes = match ImageSource::classify(source) {
            ImageSource::Http(url) => self.fetch_http(url).await?,
            ImageSource::Data(uri) => decode_data_uri(uri)?,
            ImageSource::File(path) => self.read_file(&path).await?,
        };
        decode_blocking(bytes).await
    }

    /// Load the bundled default background. Failure here is fatal.
    pub async fn load_default_background(&self, path: &Path) -> CardResult<ImageAsset> {
        let unavailable = |e: CardError| CardError::BackgroundUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let bytes = self.read_file(path).await.map_err(unavailable)?;
        decode_blocking(bytes).await.map_err(unavailable)
    }

    async fn fetch_http(&self, url: &str) -> CardResult<Vec<u8>> {
        let load_err = |message: String| CardError::ImageLoad {
            location: url.to_string(),
            message,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| load_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(load_err(format!("HTTP {}", status)));
        }
        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(load_err(format!("{} bytes exceeds limit of {}", len, self.max_bytes)));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| load_err(e.to_string()))? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(load_err(format!("body exceeds limit of {} bytes", self.max_bytes)));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    async fn read_file(&self, path: &Path) -> CardResult<Vec<u8>> {
        let load_err = |message: String| CardError::ImageLoad {
            location: path.display().to_string(),
            message,
        };

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| load_err(e.to_string()))?;
        if metadata.len() > self.max_bytes as u64 {
            return Err(load_err(format!(
                "{} bytes exceeds limit of {}",
                metadata.len(),
                self.max_bytes
            )));
        }
        tokio::fs::read(path).await.map_err(|e| load_err(e.to_string()))
    }
}

/// Payload of a base64 `data:` URI.
fn decode_data_uri(uri: &str) -> CardResult<Vec<u8>> {
    let load_err = |message: &str| CardError::ImageLoad {
        location: uri.chars().take(48).collect(),
        message: message.to_string(),
    };

    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| load_err("data URI has no payload"))?;
    if !header.to_ascii_lowercase().ends_with(";base64") {
        return Err(load_err("only base64 data URIs are supported"));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| load_err(&e.to_string()))
}

async fn decode_blocking(bytes: Vec<u8>) -> CardResult<ImageAsset> {
    tokio::task::spawn_blocking(move || ImageAsset::decode(&bytes))
        .await
        .map_err(|e| CardError::Internal(format!("Image decode task failed: {}", e)))?
}
