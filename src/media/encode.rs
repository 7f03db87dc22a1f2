// src/media/encode.rs

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Raw media bytes with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl MediaBlob {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedMedia {
    /// Upload timestamp (RFC 3339, UTC).
    pub name: String,
    pub mime_type: String,
    pub base64: String,
}

/// Base64-encode each blob for upload. Blobs with no data are skipped.
pub fn encode_blobs(blobs: &[MediaBlob]) -> Vec<EncodedMedia> {
    blobs
        .iter()
        .enumerate()
        .filter_map(|(idx, blob)| {
            if blob.data.is_empty() {
                warn!(index = idx, mime = %blob.mime_type, "skipping empty blob");
                return None;
            }
            Some(EncodedMedia {
                name: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                mime_type: blob.mime_type.clone(),
                base64: STANDARD.encode(&blob.data),
            })
        })
        .collect()
}

/// `data:<mime>;base64,<payload>`
pub fn to_data_uri(blob: &MediaBlob) -> String {
    format!("data:{};base64,{}", blob.mime_type, STANDARD.encode(&blob.data))
}
