// src/records/mod.rs

pub mod previews;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::process::{CellValue, PositionalTable};

pub use previews::{drive_file_ids, expand_previews, preview_url, preview_urls};

/// A record field after mapping and post-processing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Cell(CellValue),
    /// Row was shorter than the header. Serializes as `null`.
    Absent,
    /// Preview URLs derived from a link-list field.
    Previews(Vec<String>),
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Cell(c) => c.serialize(s),
            FieldValue::Absent => s.serialize_none(),
            FieldValue::Previews(urls) => urls.serialize(s),
        }
    }
}

impl From<CellValue> for FieldValue {
    fn from(c: CellValue) -> Self {
        FieldValue::Cell(c)
    }
}

/// One data row keyed by header label. Keys keep header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An existing key keeps its position.
    ///
    /// Lookup is a linear scan; bulk construction goes through
    /// [`table_to_records`], which resolves label slots once per table.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldValue> {
        self.fields
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Map each data row onto the header labels.
///
/// Short rows pad with [`FieldValue::Absent`]; cells past the header width
/// are dropped. Both cases log a shape-mismatch warning and never fail.
/// Duplicate labels collapse: the later present column wins.
pub fn table_to_records(table: &PositionalTable) -> Vec<Record> {
    let width = table.width();

    // label -> slot, resolved once; duplicate labels share the first slot
    let mut keys: Vec<String> = Vec::new();
    let mut slot_of: HashMap<&str, usize> = HashMap::new();
    let slots: Vec<usize> = table
        .header
        .iter()
        .map(|label| {
            *slot_of.entry(label.as_str()).or_insert_with(|| {
                keys.push(label.clone());
                keys.len() - 1
            })
        })
        .collect();

    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            if row.len() != width {
                warn!(
                    row = idx,
                    expected = width,
                    actual = row.len(),
                    "row shape mismatch"
                );
            }
            let mut values = vec![FieldValue::Absent; keys.len()];
            for (cell, &slot) in row.iter().zip(&slots) {
                values[slot] = FieldValue::Cell(cell.clone());
            }
            Record {
                fields: keys.iter().cloned().zip(values).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn table(header: &[&str], rows: Vec<Vec<CellValue>>) -> PositionalTable {
        PositionalTable {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn maps_rows_by_header_position() {
        let t = table(
            &["a", "b"],
            vec![vec![text("1"), text("2")], vec![text("3"), CellValue::Empty]],
        );
        let records = table_to_records(&t);
        assert_eq!(records.len(), 2);
        assert_eq!(
            serde_json::to_value(&records).unwrap(),
            json!([{"a": "1", "b": "2"}, {"a": "3", "b": ""}])
        );
    }

    #[test]
    fn short_row_pads_with_absent() {
        let t = table(&["a", "b", "c"], vec![vec![text("x")]]);
        let records = table_to_records(&t);
        assert_eq!(records[0].get("a"), Some(&FieldValue::Cell(text("x"))));
        assert_eq!(records[0].get("b"), Some(&FieldValue::Absent));
        assert_eq!(records[0].get("c"), Some(&FieldValue::Absent));
        assert_eq!(
            serde_json::to_value(&records[0]).unwrap(),
            json!({"a": "x", "b": null, "c": null})
        );
    }

    #[test]
    fn long_row_is_truncated_to_header() {
        let t = table(&["a"], vec![vec![text("x"), text("y")]]);
        let records = table_to_records(&t);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("a"), Some(&FieldValue::Cell(text("x"))));
    }

    #[test]
    fn duplicate_labels_later_column_wins() {
        let t = table(&["k", "other", "k"], vec![vec![text("1"), text("2"), text("3")]]);
        let records = table_to_records(&t);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["k", "other"]);
        assert_eq!(records[0].get("k"), Some(&FieldValue::Cell(text("3"))));
    }

    #[test]
    fn duplicate_label_missing_in_short_row_keeps_earlier_value() {
        let t = table(&["k", "other", "k"], vec![vec![text("1")]]);
        let records = table_to_records(&t);
        assert_eq!(records[0].get("k"), Some(&FieldValue::Cell(text("1"))));
        assert_eq!(records[0].get("other"), Some(&FieldValue::Absent));
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut r = Record::new();
        assert_eq!(r.insert("a", FieldValue::Absent), None);
        r.insert("b", FieldValue::Cell(text("2")));
        let old = r.insert("a", FieldValue::Cell(text("1")));
        assert_eq!(old, Some(FieldValue::Absent));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn key_order_follows_header() {
        let t = table(&["z", "a", "m"], vec![vec![text("1"), text("2"), text("3")]]);
        let out = serde_json::to_string(&table_to_records(&t)[0]).unwrap();
        assert_eq!(out, r#"{"z":"1","a":"2","m":"3"}"#);
    }
}
