//! Common types shared by the stat card renderer and HTTP service.

pub mod color;
pub mod error;
pub mod layout;

pub use color::{normalize_hex, Rgba};
pub use error::{CardError, CardResult};
pub use layout::{
    BarColors, BarGeometry, FontSpec, LayoutConfig, Ornament, Rect, Row, ROW_COUNT,
};
