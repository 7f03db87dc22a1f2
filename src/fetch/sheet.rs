// src/fetch/sheet.rs

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::SheetResult;

/// One GET of a gviz endpoint, returning the full body as text.
/// Non-success statuses surface as transport errors; nothing is retried.
#[instrument(level = "info", skip(client), fields(url = %url))]
pub async fn fetch_response_text(client: &Client, url: &Url, timeout: Duration) -> SheetResult<String> {
    debug!("fetching sheet response");
    let text = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(bytes = text.len(), "read sheet response");
    Ok(text)
}
