// src/process/table.rs

use tracing::debug;

use super::cell::{normalize_cell, CellValue};
use super::raw_table::RawTable;

/// Header labels plus the kept, normalized data rows, in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionalTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl PositionalTable {
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Normalize every cell and drop data rows whose values are all falsy.
pub fn build_table(raw: &RawTable) -> PositionalTable {
    let header: Vec<String> = raw.cols.iter().map(|c| c.label.clone()).collect();

    let mut dropped = 0usize;
    let rows: Vec<Vec<CellValue>> = raw
        .rows
        .iter()
        .filter_map(|r| {
            let row: Vec<CellValue> = r.c.iter().map(|c| normalize_cell(c.as_ref())).collect();
            if row.iter().all(CellValue::is_falsy) {
                dropped += 1;
                None
            } else {
                Some(row)
            }
        })
        .collect();

    debug!(
        columns = header.len(),
        kept = rows.len(),
        dropped,
        "built positional table"
    );
    PositionalTable { header, rows }
}
