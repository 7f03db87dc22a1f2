// src/process/mod.rs

pub mod cell;
pub mod frame;
pub mod raw_table;
pub mod table;

pub use cell::{normalize_cell, CellValue};
pub use frame::{extract_payload, parse_payload, parse_response};
pub use raw_table::{RawCell, RawColumn, RawRow, RawTable};
pub use table::{build_table, PositionalTable};
