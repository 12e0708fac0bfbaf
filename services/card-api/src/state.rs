//! Application state shared by all handlers.

use std::sync::Arc;

use card_common::{CardError, CardResult};
use renderer::FontRegistry;

use crate::config::ServiceConfig;
use crate::loaders::ImageLoader;

/// Shared application state.
pub struct AppState {
    pub config: ServiceConfig,

    /// Image fetcher with the configured timeout and size cap.
    pub loader: ImageLoader,

    /// Font registry; the process-wide one outside of tests.
    pub fonts: Arc<FontRegistry>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> CardResult<Self> {
        Self::with_fonts(config, FontRegistry::global())
    }

    /// State with an explicit font registry.
    pub fn with_fonts(config: ServiceConfig, fonts: Arc<FontRegistry>) -> CardResult<Self> {
        let loader = ImageLoader::new(config.fetch_timeout(), config.max_image_bytes)?;
        Ok(Self {
            config,
            loader,
            fonts,
        })
    }

    /// Register bundled fonts on the blocking pool unless already done.
    pub async fn provision_fonts(&self) -> CardResult<()> {
        if self.fonts.is_provisioned() {
            return Ok(());
        }
        let fonts = Arc::clone(&self.fonts);
        let font_dir = self.config.font_dir();
        tokio::task::spawn_blocking(move || fonts.ensure_fonts(&font_dir))
            .await
            .map_err(|e| CardError::Internal(format!("Font provisioning task failed: {}", e)))
    }
}
