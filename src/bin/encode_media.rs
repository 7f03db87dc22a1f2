use anyhow::{Context, Result};
use sheetscraper::media::{
    compress::{DEFAULT_MAX_WIDTH, DEFAULT_QUALITY},
    compress_image_file, encode_blobs, to_data_uri, CompressedImage, MediaBlob,
};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!(
            "Usage: {} <image> [max_width] [quality]",
            args.first().map(String::as_str).unwrap_or("encode_media")
        );
        std::process::exit(1);
    }
    let path = &args[1];
    let max_width: u32 = match args.get(2) {
        Some(w) => w.parse().with_context(|| format!("parsing max_width {:?}", w))?,
        None => DEFAULT_MAX_WIDTH,
    };
    let quality: f32 = match args.get(3) {
        Some(q) => q.parse().with_context(|| format!("parsing quality {:?}", q))?,
        None => DEFAULT_QUALITY,
    };

    let compressed = compress_image_file(path, max_width, quality)
        .with_context(|| format!("compressing {}", path))?;
    info!(
        width = compressed.width,
        height = compressed.height,
        bytes = compressed.bytes.len(),
        "compressed"
    );

    let blob = MediaBlob::new(CompressedImage::MIME_TYPE, compressed.bytes);
    let data_uri_len = to_data_uri(&blob).len();
    let encoded = encode_blobs(std::slice::from_ref(&blob));
    println!("{}", serde_json::to_string_pretty(&encoded)?);
    info!(data_uri_len, "done");
    Ok(())
}
