// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};
use url::Url;

pub const DEFAULT_SHEET_ID: &str = "1l1JdsIleqocV2pNGlSSxGbl7-PzU9QeGh52N9tEQScc";
pub const DEFAULT_SHEET_GID: &str = "0";
pub const DEFAULT_PREVIEW_WIDTH: u32 = 600;
pub const DEFAULT_IMAGE_FIELD: &str = "images";
pub const DEFAULT_BASE_URL: &str = "https://docs.google.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Defaults for one data source. Every field can be overridden per call
/// through [`crate::SheetRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Scheme + host of the gviz endpoint, e.g. `https://docs.google.com`.
    pub base_url: String,
    pub sheet_id: String,
    pub gid: String,
    /// Target width (px) of generated preview URLs.
    pub preview_width: u32,
    /// Record field holding the comma-joined Drive links.
    pub image_field: String,
    #[serde(with = "secs")]
    pub timeout: Duration,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            gid: DEFAULT_SHEET_GID.to_string(),
            preview_width: DEFAULT_PREVIEW_WIDTH,
            image_field: DEFAULT_IMAGE_FIELD.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SheetConfig {
    /// Start from the defaults and apply any `SHEET_*` environment overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup("SHEET_BASE_URL") {
            cfg.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = lookup("SHEET_ID") {
            cfg.sheet_id = v;
        }
        if let Some(v) = lookup("SHEET_GID") {
            cfg.gid = v;
        }
        if let Some(v) = lookup("SHEET_PREVIEW_WIDTH") {
            cfg.preview_width = v
                .trim()
                .parse()
                .with_context(|| format!("parsing SHEET_PREVIEW_WIDTH={:?}", v))?;
        }
        if let Some(v) = lookup("SHEET_IMAGE_FIELD") {
            cfg.image_field = v;
        }
        if let Some(v) = lookup("SHEET_TIMEOUT_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("parsing SHEET_TIMEOUT_SECS={:?}", v))?;
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    /// `{base}/spreadsheets/d/{id}/gviz/tq?tqx=out:json&gid={gid}`
    pub fn sheet_url(&self, sheet_id: &str, gid: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(&["spreadsheets", "d", sheet_id, "gviz", "tq"]);
        url.query_pairs_mut()
            .append_pair("tqx", "out:json")
            .append_pair("gid", gid);
        Ok(url)
    }
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
