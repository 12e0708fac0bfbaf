//! Response construction shared by the handlers.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use card_common::CardError;

/// Filename advertised for every generated image.
pub const RESULT_FILENAME: &str = "result.png";

/// How the client should present the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    pub fn from_download_flag(download: bool) -> Self {
        if download {
            Disposition::Attachment
        } else {
            Disposition::Inline
        }
    }

    pub fn header_value(self) -> String {
        let token = match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        format!("{}; filename=\"{}\"", token, RESULT_FILENAME)
    }
}

/// 200 response carrying PNG bytes.
pub fn png_response(png: Vec<u8>, disposition: Disposition) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CACHE_CONTROL, "no-store".to_string()),
            (header::CONTENT_DISPOSITION, disposition.header_value()),
        ],
        png,
    )
        .into_response()
}

/// Plain-text response for a failed render.
pub fn failure_response(err: &CardError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("Failed to generate image.\n\n{}", err),
    )
        .into_response()
}
