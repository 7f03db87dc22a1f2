// src/process/raw_table.rs

use serde::Deserialize;

/// The `table` object of a gviz response: column schema plus data rows.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawTable {
    pub cols: Vec<RawColumn>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawColumn {
    #[serde(default)]
    pub id: String,
    /// Header text; empty when the sheet has no header row.
    #[serde(default)]
    pub label: String,
    /// Endpoint type tag (`string`, `number`, `date`, `boolean`, ...).
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawRow {
    /// One entry per column; `null` for cells the endpoint left out.
    pub c: Vec<Option<RawCell>>,
}

/// Wire cell: `f` is the display string, `v` the literal value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawCell {
    #[serde(default)]
    pub f: Option<String>,
    #[serde(default)]
    pub v: Option<serde_json::Value>,
}
