//! HTTP request handlers.

pub mod common;
pub mod generate;
pub mod health;

pub use common::{failure_response, png_response, Disposition};
pub use generate::{generate_handler, render_card};
pub use health::{health_handler, metrics_handler, ready_handler};
