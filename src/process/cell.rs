// src/process/cell.rs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::trace;

use super::raw_table::RawCell;

static DATE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Date\((.*)\)$").expect("date literal regex should compile"));

/// A normalized cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
    /// Neither value present (or both falsy). Serializes as `""`.
    Empty,
}

impl CellValue {
    /// Falsy values are what the row filter discards: `""`, `0`, `false`, empty.
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Bool(b) => !b,
            CellValue::Number(n) => number_is_zero(n),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(n) => n.serialize(s),
            CellValue::Text(t) => s.serialize_str(t),
            CellValue::Bool(b) => s.serialize_bool(*b),
            CellValue::Empty => s.serialize_str(""),
        }
    }
}

fn number_is_zero(n: &serde_json::Number) -> bool {
    n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan())
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !number_is_zero(n),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Pick the literal `v` when truthy, else the display `f`, else empty.
/// Strings come back trimmed. Never fails.
pub fn normalize_cell(cell: Option<&RawCell>) -> CellValue {
    let Some(cell) = cell else {
        return CellValue::Empty;
    };

    if let Some(v) = cell.v.as_ref().filter(|v| is_truthy(v)) {
        return match v {
            Value::Number(n) => CellValue::Number(n.clone()),
            Value::Bool(b) => CellValue::Bool(*b),
            Value::String(s) => {
                if let Some(args) = date_literal_args(s) {
                    trace!(args, "date literal kept as text");
                }
                text(s)
            }
            other => text(&other.to_string()),
        };
    }

    match cell.f.as_deref() {
        Some(f) if !f.is_empty() => text(f),
        _ => CellValue::Empty,
    }
}

fn text(s: &str) -> CellValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(trimmed.to_string())
    }
}

/// Arguments of a `Date(y,m,d[,h,m,s])` literal, if `s` is one.
pub fn date_literal_args(s: &str) -> Option<&str> {
    DATE_LITERAL
        .captures(s.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
