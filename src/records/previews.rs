// src/records/previews.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::{FieldValue, Record};
use crate::process::CellValue;

/// Drive share links carry the file id as the `/d/<id>/` path segment.
static DRIVE_FILE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([A-Za-z0-9_-]*)/").expect("drive id regex should compile"));

/// Every Drive file id in a comma-joined link list, in order.
pub fn drive_file_ids(links: &str) -> Vec<&str> {
    DRIVE_FILE_ID
        .captures_iter(links)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Thumbnail URL for a Drive file, usable directly as an `<img>` source.
pub fn preview_url(file_id: &str, width: u32) -> String {
    format!("https://drive.google.com/thumbnail?sz=w{}&id={}", width, file_id)
}

pub fn preview_urls(links: &str, width: u32) -> Vec<String> {
    drive_file_ids(links)
        .into_iter()
        .map(|id| preview_url(id, width))
        .collect()
}

/// Replace a link-list `field` with its preview URLs.
///
/// Only text (or empty) values are expanded, so running this on an
/// already-processed record leaves it unchanged.
pub fn expand_previews(record: &mut Record, field: &str, width: u32) {
    let Some(slot) = record.get_mut(field) else {
        return;
    };
    let links = match slot {
        FieldValue::Cell(CellValue::Text(s)) => s.as_str(),
        FieldValue::Cell(CellValue::Empty) => "",
        _ => return,
    };
    let urls = preview_urls(links, width);
    trace!(field, count = urls.len(), "expanded preview links");
    *slot = FieldValue::Previews(urls);
}
