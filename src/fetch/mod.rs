// src/fetch/mod.rs

pub mod sheet;

pub use sheet::fetch_response_text;
