//! Shared test utilities for the stat-card workspace.
//!
//! This crate provides common testing infrastructure including:
//! - PNG fixture generators (solid, split, gradient)
//! - Temporary installation roots with a default background
//! - System font discovery and a skip macro for font-dependent tests
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{require_font, AssetRoot, solid_png};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if no system font is available.
///
/// Text drawing degrades to a no-op without fonts, so assertions about
/// rendered glyphs only make sense when one can be found.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_font;
///
/// #[test]
/// fn test_text_pixels() {
///     let font_path = require_font!();
///     // Test code using font_path...
/// }
/// ```
#[macro_export]
macro_rules! require_font {
    () => {{
        match $crate::find_system_font() {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: no system font found. Install fonts-dejavu or set TEST_FONT.");
                return;
            }
        }
    }};
}
