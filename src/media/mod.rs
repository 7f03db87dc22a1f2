// src/media/mod.rs

pub mod compress;
pub mod encode;

pub use compress::{compress_image, compress_image_file, CompressedImage};
pub use encode::{encode_blobs, to_data_uri, EncodedMedia, MediaBlob};
