//! Service configuration.
//!
//! Values come from CLI flags with environment fallbacks; `.env` is loaded
//! by `main` before parsing. Asset locations are fixed relative to the
//! installation root.

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default background image, relative to the asset root.
pub const DEFAULT_BACKGROUND_FILE: &str = "original.png";

/// Bundled font directory, relative to the asset root.
pub const FONT_DIR: &str = "fonts";

/// Static preview page directory, relative to the asset root.
pub const PUBLIC_DIR: &str = "public";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Text,
}

/// Stat card API server
#[derive(Parser, Debug, Clone)]
#[command(name = "card-api")]
#[command(about = "Renders stat card PNGs from query parameters")]
pub struct ServiceConfig {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000", env = "CARD_LISTEN_ADDR")]
    pub listen: String,

    /// Log level or tracing filter directive
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json, env = "CARD_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Installation root holding original.png, fonts/ and public/
    #[arg(long, default_value = ".", env = "CARD_ASSET_ROOT")]
    pub asset_root: PathBuf,

    /// Timeout for fetching remote images, in seconds
    #[arg(long, default_value_t = 10, env = "CARD_FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: u64,

    /// Largest image download accepted, in bytes
    #[arg(long, default_value_t = 20 * 1024 * 1024, env = "CARD_MAX_IMAGE_BYTES")]
    pub max_image_bytes: usize,

    /// Number of tokio worker threads (default: number of CPU cores)
    #[arg(long, env = "CARD_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            asset_root: PathBuf::from("."),
            fetch_timeout_secs: 10,
            max_image_bytes: 20 * 1024 * 1024,
            worker_threads: None,
        }
    }
}

impl ServiceConfig {
    /// Default configuration rooted at `asset_root`.
    pub fn with_asset_root(asset_root: impl AsRef<Path>) -> Self {
        Self {
            asset_root: asset_root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn background_path(&self) -> PathBuf {
        self.asset_root.join(DEFAULT_BACKGROUND_FILE)
    }

    pub fn font_dir(&self) -> PathBuf {
        self.asset_root.join(FONT_DIR)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.asset_root.join(PUBLIC_DIR)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }
}
