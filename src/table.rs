// src/table.rs
//! Canonical table types shared by every stage of the pipeline.
//!
//! All entities here are created during a single `extract` call and are
//! read-only afterwards; the caller owns them via [`ExtractionResult`].

use crate::error::WarningKind;
use serde::{Deserialize, Serialize};

/// Byte and line offsets of a table block in the originating document.
///
/// Line numbers are 1-based and inclusive; byte offsets are half-open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: usize,
    pub end_line: usize,
}

/// Provenance flag recording whether a table was row-major in its source or
/// was normalized from a transposed ("label down the side") layout.
///
/// The matrix held by a [`Table`] is always row-major regardless of this
/// flag; `Transposed` only records that a rewrite happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    RowMajor,
    Transposed,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RowMajor => "row_major",
            Self::Transposed => "transposed",
        }
    }
}

/// A single positioned cell, unique by `(row, col)` within its table.
///
/// Produced by range decomposition or direct parsing; immutable once created.
/// `is_range_origin` is true only on the anchor cell of an expanded range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub value: String,
    pub is_range_origin: bool,
}

/// A normalized table: flat headers, rectangular row-major body.
///
/// Invariants:
/// - every row has exactly `headers.len()` cells (missing cells are empty
///   strings, never omitted);
/// - header labels are unique after flattening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub orientation: Orientation,
    pub source_span: SourceSpan,
}

impl Table {
    pub fn num_cols(&self) -> usize {
        self.headers.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Render the canonical textual form consumed by the indexing
    /// collaborator: a Markdown pipe table with leading/trailing pipes,
    /// cells joined with `" | "`, and a dash separator row.
    ///
    /// The rendering is deterministic and round-trips through re-extraction
    /// to the same headers and rows. Orientation is not recoverable from the
    /// text alone and must be carried alongside as metadata.
    pub fn to_markdown(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format!("| {} |", self.headers.join(" | ")));
        let separators = vec!["---"; self.headers.len()];
        lines.push(format!("| {} |", separators.join(" | ")));
        for row in &self.rows {
            lines.push(format!("| {} |", row.join(" | ")));
        }
        lines.join("\n")
    }
}

/// A non-fatal condition recorded while extracting, tied to the span of the
/// offending block or row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub span: SourceSpan,
    pub message: String,
}

/// Everything extracted from one document: tables in document order plus the
/// warning log. The engine always returns a result (possibly empty); no
/// single malformed table aborts extraction for the rest of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub tables: Vec<Table>,
    pub warnings: Vec<Warning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table {
            headers: vec!["Name".to_string(), "Age".to_string()],
            rows: vec![
                vec!["Alice".to_string(), "30".to_string()],
                vec!["Bob".to_string(), String::new()],
            ],
            orientation: Orientation::RowMajor,
            source_span: SourceSpan::default(),
        }
    }

    #[test]
    fn test_to_markdown_format() {
        let expected = "\
| Name | Age |
| --- | --- |
| Alice | 30 |
| Bob |  |";
        assert_eq!(sample().to_markdown(), expected);
    }

    #[test]
    fn test_orientation_as_str() {
        assert_eq!(Orientation::RowMajor.as_str(), "row_major");
        assert_eq!(Orientation::Transposed.as_str(), "transposed");
    }

    #[test]
    fn test_dimensions() {
        let table = sample();
        assert_eq!(table.num_cols(), 2);
        assert_eq!(table.num_rows(), 2);
    }
}
