use anyhow::{Context, Result};
use sheetscraper::{SheetClient, SheetConfig, SheetRequest};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) config: env defaults, positional overrides ───────────────
    let config = SheetConfig::from_env().context("loading SHEET_* configuration")?;
    let mut args = env::args().skip(1);
    let mut request = SheetRequest::new();
    if let Some(id) = args.next() {
        request = request.sheet_id(id);
    }
    if let Some(gid) = args.next() {
        request = request.gid(gid);
    }
    info!(
        sheet_id = request.sheet_id.as_deref().unwrap_or(&config.sheet_id),
        gid = request.gid.as_deref().unwrap_or(&config.gid),
        "startup"
    );

    // ─── 3) fetch + print ────────────────────────────────────────────
    let client = SheetClient::new(config);
    let records = client
        .records(&request)
        .await
        .context("loading sheet records")?;
    println!("{}", serde_json::to_string_pretty(&records)?);

    info!(records = records.len(), "all done");
    Ok(())
}
