// src/error.rs

use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

/// Failures of one sheet fetch. Every variant is terminal for that call.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid sheet URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The `"table":` … `});` frame was not found in the response body.
    #[error("malformed response: table frame not found{}", malformed_detail(.preview, .reason))]
    MalformedResponse {
        preview: String,
        reason: Option<String>,
    },

    #[error("payload parse error: {0}")]
    PayloadParse(#[from] serde_json::Error),
}

fn malformed_detail(preview: &str, reason: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(r) = reason {
        out.push_str(&format!(" ({})", r));
    }
    if !preview.is_empty() {
        out.push_str(&format!(", body starts with {:?}", preview));
    }
    out
}

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JPEG quality must be in (0, 1], got {0}")]
    InvalidQuality(f32),

    #[error("max width must be positive")]
    InvalidWidth,
}
