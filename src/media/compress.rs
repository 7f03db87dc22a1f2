// src/media/compress.rs

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, GenericImageView};
use std::path::Path;
use tracing::debug;

use crate::error::MediaError;

pub const DEFAULT_MAX_WIDTH: u32 = 1000;
pub const DEFAULT_QUALITY: f32 = 0.7;

/// A re-encoded JPEG and its final dimensions.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CompressedImage {
    pub const MIME_TYPE: &'static str = "image/jpeg";
}

/// Decode `bytes`, shrink to `max_width` (aspect kept) if wider, and
/// re-encode as JPEG at `quality` in (0, 1].
pub fn compress_image(
    bytes: &[u8],
    max_width: u32,
    quality: f32,
) -> Result<CompressedImage, MediaError> {
    if !(quality > 0.0 && quality <= 1.0) {
        return Err(MediaError::InvalidQuality(quality));
    }
    if max_width == 0 {
        return Err(MediaError::InvalidWidth);
    }

    let img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();
    let img = if width > max_width {
        let scaled = (height as f64 * max_width as f64 / width as f64).round().max(1.0) as u32;
        img.resize_exact(max_width, scaled, FilterType::Triangle)
    } else {
        img
    };
    let (out_w, out_h) = img.dimensions();

    let q = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    let mut out = Vec::new();
    img.to_rgb8()
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, q))?;

    debug!(
        from = ?(width, height),
        to = ?(out_w, out_h),
        in_bytes = bytes.len(),
        out_bytes = out.len(),
        "compressed image"
    );
    Ok(CompressedImage {
        bytes: out,
        width: out_w,
        height: out_h,
    })
}

pub fn compress_image_file(
    path: impl AsRef<Path>,
    max_width: u32,
    quality: f32,
) -> Result<CompressedImage, MediaError> {
    let bytes = std::fs::read(path.as_ref()).map_err(image::ImageError::IoError)?;
    compress_image(&bytes, max_width, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 5) as u8, (y * 9) as u8, 120, 200])
        });
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn wide_images_are_downscaled() {
        let out = compress_image(&png(40, 20), 10, DEFAULT_QUALITY).unwrap();
        assert_eq!((out.width, out.height), (10, 5));
        let decoded = image::load_from_memory_with_format(&out.bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (10, 5));
    }

    #[test]
    fn narrow_images_keep_size() {
        let out = compress_image(&png(8, 30), DEFAULT_MAX_WIDTH, 1.0).unwrap();
        assert_eq!((out.width, out.height), (8, 30));
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(matches!(
            compress_image(&png(4, 4), 10, 0.0),
            Err(MediaError::InvalidQuality(_))
        ));
        assert!(matches!(
            compress_image(&png(4, 4), 0, 0.5),
            Err(MediaError::InvalidWidth)
        ));
        assert!(matches!(
            compress_image(b"not an image", 10, 0.5),
            Err(MediaError::Image(_))
        ));
    }

    #[test]
    fn compresses_from_disk() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(&png(30, 30)).unwrap();
        let out = compress_image_file(tmp.path(), 15, 0.5).unwrap();
        assert_eq!((out.width, out.height), (15, 15));
    }
}
