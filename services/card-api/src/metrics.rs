//! Prometheus metrics for card rendering.
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! (tests, embedding) every call is a no-op.

use metrics::{counter, histogram};
use std::time::Duration;

use card_common::CardError;

/// Image slots, used as the `slot` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlot {
    Background,
    Circle,
    Square,
}

impl ImageSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSlot::Background => "background",
            ImageSlot::Circle => "circle",
            ImageSlot::Square => "square",
        }
    }
}

pub fn record_request() {
    counter!("card_render_requests_total").increment(1);
}

pub fn record_failure(err: &CardError) {
    counter!("card_render_failures_total", "kind" => err.kind()).increment(1);
}

/// A requested image could not be used.
pub fn record_image_unavailable(slot: ImageSlot) {
    counter!("card_image_load_failures_total", "slot" => slot.as_str()).increment(1);
}

/// The bundled default background was used.
pub fn record_background_fallback() {
    counter!("card_background_fallbacks_total").increment(1);
}

pub fn record_render(elapsed: Duration, png_bytes: usize) {
    histogram!("card_render_duration_seconds").record(elapsed.as_secs_f64());
    histogram!("card_png_bytes").record(png_bytes as f64);
}
