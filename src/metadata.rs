// src/metadata.rs
//! Chunk metadata: the open key set handed to the indexing collaborator.
//!
//! Metadata is a mapping from string keys to a closed variant type so that
//! enrichment stays total and type-safe while callers remain free to attach
//! arbitrary keys of their own.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caller-extensible metadata mapping.
pub type Metadata = BTreeMap<String, MetadataValue>;

/// Closed value type for metadata entries.
///
/// Serializes to the natural JSON form (string, number, boolean, null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for MetadataValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// The unit handed to the indexing collaborator: serialized text plus
/// retrieval metadata. Table-derived chunks carry the canonical Markdown
/// rendering of their table (see [`crate::table::Table::to_markdown`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub metadata: Metadata,
}

/// Return a copy of `metadata` with `chunk_type` forced to `"table"` when
/// `is_table` is true.
///
/// Copy-on-write contract: the input mapping is never mutated, so callers may
/// safely reuse it across chunks. All other keys pass through unchanged; an
/// existing `chunk_type` entry is overridden.
pub fn enrich(metadata: &Metadata, is_table: bool) -> Metadata {
    let mut enriched = metadata.clone();
    if is_table {
        enriched.insert("chunk_type".to_string(), MetadataValue::from("table"));
    }
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), MetadataValue::from("doc1"));
        metadata
    }

    #[test]
    fn test_enrich_sets_chunk_type() {
        let input = base();
        let enriched = enrich(&input, true);

        assert_eq!(
            enriched.get("chunk_type"),
            Some(&MetadataValue::from("table"))
        );
        assert_eq!(enriched.get("source"), Some(&MetadataValue::from("doc1")));
    }

    #[test]
    fn test_enrich_does_not_mutate_input() {
        let input = base();
        let _ = enrich(&input, true);

        assert_eq!(input.len(), 1);
        assert!(!input.contains_key("chunk_type"));
    }

    #[test]
    fn test_enrich_not_table_passes_through() {
        let input = base();
        let enriched = enrich(&input, false);

        assert_eq!(enriched, input);
    }

    #[test]
    fn test_enrich_overrides_existing_chunk_type() {
        let mut input = base();
        input.insert("chunk_type".to_string(), MetadataValue::from("paragraph"));

        let enriched = enrich(&input, true);
        assert_eq!(
            enriched.get("chunk_type"),
            Some(&MetadataValue::from("table"))
        );
    }

    #[test]
    fn test_metadata_value_json_forms() {
        assert_eq!(
            serde_json::to_string(&MetadataValue::from("x")).unwrap(),
            "\"x\""
        );
        assert_eq!(
            serde_json::to_string(&MetadataValue::from(2.5)).unwrap(),
            "2.5"
        );
        assert_eq!(
            serde_json::to_string(&MetadataValue::from(true)).unwrap(),
            "true"
        );
        assert_eq!(serde_json::to_string(&MetadataValue::Null).unwrap(), "null");
    }
}
