//! Error types for stat card rendering.

use thiserror::Error;

/// Result type alias using CardError.
pub type CardResult<T> = Result<T, CardError>;

/// Primary error type for card loading, composition and encoding.
#[derive(Debug, Error)]
pub enum CardError {
    // === Recoverable (degraded to an absent image by the loader) ===
    #[error("Failed to load image from {location}: {message}")]
    ImageLoad { location: String, message: String },

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    // === Fatal render errors ===
    #[error("Default background unavailable at {path}: {message}")]
    BackgroundUnavailable { path: String, message: String },

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("Font error: {0}")]
    Font(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CardError {
    /// Whether the error only means "no usable image" for an optional slot.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CardError::ImageLoad { .. } | CardError::ImageDecode(_))
    }

    /// Short machine-friendly name, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            CardError::ImageLoad { .. } => "image_load",
            CardError::ImageDecode(_) => "image_decode",
            CardError::BackgroundUnavailable { .. } => "background_unavailable",
            CardError::InvalidCanvas { .. } => "invalid_canvas",
            CardError::Font(_) => "font",
            CardError::Encode(_) => "encode",
            CardError::Internal(_) => "internal",
        }
    }

    /// HTTP status for an error that reaches the request handler.
    ///
    /// Recoverable errors are absorbed by the loader before this point, so
    /// everything that surfaces is a failed render.
    pub fn http_status_code(&self) -> u16 {
        match self {
            CardError::ImageLoad { .. }
            | CardError::ImageDecode(_)
            | CardError::BackgroundUnavailable { .. }
            | CardError::InvalidCanvas { .. }
            | CardError::Font(_)
            | CardError::Encode(_)
            | CardError::Internal(_) => 500,
        }
    }
}

impl From<std::io::Error> for CardError {
    fn from(err: std::io::Error) -> Self {
        CardError::Internal(err.to_string())
    }
}
