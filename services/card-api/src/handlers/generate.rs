//! GET /api/generate

use axum::{
    extract::{Extension, Query},
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use card_common::{CardError, CardResult};
use renderer::{CardImages, ImageAsset};

use super::common::{failure_response, png_response, Disposition};
use crate::metrics::{self, ImageSlot};
use crate::params::RenderRequest;
use crate::state::AppState;

/// Render a stat card from query parameters.
///
/// Returns the PNG on success and a 500 plain-text description otherwise;
/// no partial image is ever returned.
#[instrument(skip_all)]
pub async fn generate_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let start = Instant::now();
    metrics::record_request();

    let request = RenderRequest::new(params);
    let disposition = Disposition::from_download_flag(request.download());

    match render_card(&state, &request).await {
        Ok(png) => {
            let elapsed = start.elapsed();
            metrics::record_render(elapsed, png.len());
            info!(
                bytes = png.len(),
                download = request.download(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Generated card"
            );
            png_response(png, disposition)
        }
        Err(e) => {
            error!(error = %e, kind = e.kind(), "Failed to generate image");
            metrics::record_failure(&e);
            failure_response(&e)
        }
    }
}

/// Load images, resolve the layout and render PNG bytes.
pub async fn render_card(state: &AppState, request: &RenderRequest) -> CardResult<Vec<u8>> {
    state.provision_fonts().await?;

    let sources = request.image_sources();
    let loader = &state.loader;
    let (background, circle, square) = tokio::join!(
        loader.load_image_safe(&sources.background),
        loader.load_image_safe(&sources.circle),
        loader.load_image_safe(&sources.square),
    );

    note_missing(ImageSlot::Circle, &sources.circle, circle.as_ref());
    note_missing(ImageSlot::Square, &sources.square, square.as_ref());
    note_missing(ImageSlot::Background, &sources.background, background.as_ref());

    let background = match background {
        Some(bg) => bg,
        None => {
            metrics::record_background_fallback();
            let path = state.config.background_path();
            debug!(path = %path.display(), "Using default background");
            loader.load_default_background(&path).await?
        }
    };

    let layout = request.resolve_layout((background.width(), background.height()));
    let images = CardImages {
        background,
        circle,
        square,
    };
    let fonts = Arc::clone(&state.fonts);

    tokio::task::spawn_blocking(move || renderer::render_png(&layout, &images, &fonts))
        .await
        .map_err(|e| CardError::Internal(format!("Render task failed: {}", e)))?
}

fn note_missing(slot: ImageSlot, source: &str, loaded: Option<&ImageAsset>) {
    if !source.is_empty() && loaded.is_none() {
        metrics::record_image_unavailable(slot);
    }
}
