// src/sheet.rs

use futures::future::try_join_all;
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::config::SheetConfig;
use crate::error::SheetResult;
use crate::fetch::fetch_response_text;
use crate::process::{build_table, parse_response};
use crate::records::{expand_previews, table_to_records, Record};

/// Per-call overrides of the [`SheetConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRequest {
    pub sheet_id: Option<String>,
    pub gid: Option<String>,
    pub preview_width: Option<u32>,
}

impl SheetRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet_id(mut self, id: impl Into<String>) -> Self {
        self.sheet_id = Some(id.into());
        self
    }

    pub fn gid(mut self, gid: impl Into<String>) -> Self {
        self.gid = Some(gid.into());
        self
    }

    pub fn preview_width(mut self, width: u32) -> Self {
        self.preview_width = Some(width);
        self
    }
}

/// Fetch one sheet and turn it into records:
/// response → frame → table → records → preview expansion.
///
/// Any failure ends the call; there is no retry and no partial result.
#[instrument(level = "info", skip(client, config), fields(sheet_id = tracing::field::Empty, gid = tracing::field::Empty))]
pub async fn fetch_records(
    client: &Client,
    config: &SheetConfig,
    request: &SheetRequest,
) -> SheetResult<Vec<Record>> {
    let sheet_id = request.sheet_id.as_deref().unwrap_or(&config.sheet_id);
    let gid = request.gid.as_deref().unwrap_or(&config.gid);
    let width = request.preview_width.unwrap_or(config.preview_width);
    tracing::Span::current()
        .record("sheet_id", sheet_id)
        .record("gid", gid);

    let url = config.sheet_url(sheet_id, gid)?;
    let text = fetch_response_text(client, &url, config.timeout).await?;
    let raw = parse_response(&text)?;
    let table = build_table(&raw);
    let mut records = table_to_records(&table);
    for record in &mut records {
        expand_previews(record, &config.image_field, width);
    }

    info!(records = records.len(), "sheet loaded");
    Ok(records)
}

/// Entry point holding a shared HTTP client and the default source.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
    config: SheetConfig,
}

impl SheetClient {
    pub fn new(config: SheetConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: SheetConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub async fn records(&self, request: &SheetRequest) -> SheetResult<Vec<Record>> {
        fetch_records(&self.client, &self.config, request).await
    }

    /// Records from the configured default sheet.
    pub async fn default_records(&self) -> SheetResult<Vec<Record>> {
        self.records(&SheetRequest::default()).await
    }

    /// Load several tabs of one sheet concurrently. Results follow `gids`
    /// order; the first failure fails the whole batch.
    pub async fn records_for_gids(
        &self,
        sheet_id: Option<&str>,
        gids: &[&str],
    ) -> SheetResult<Vec<Vec<Record>>> {
        debug!(tabs = gids.len(), "loading tabs");
        let requests: Vec<SheetRequest> = gids
            .iter()
            .map(|gid| SheetRequest {
                sheet_id: sheet_id.map(str::to_string),
                gid: Some(gid.to_string()),
                preview_width: None,
            })
            .collect();
        try_join_all(requests.iter().map(|req| self.records(req))).await
    }
}
