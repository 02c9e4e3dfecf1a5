// src/lib.rs
//! # Table Chunker
//!
//! A table extraction and normalization engine for RAG ingestion pipelines.
//! Locates tabular structures inside semi-structured documents (Markdown,
//! embedded HTML, tool-generated exports), repairs authoring irregularities,
//! and emits canonical row-oriented tables annotated with retrieval metadata.
//!
//! ## Features
//!
//! - **Markdown pipe tables**: line-scanning segmentation with multi-row
//!   header support
//! - **Embedded HTML tables**: `<table>` parsing with `colspan`/`rowspan`
//!   expansion
//! - **Merged-cell ranges**: compact range notations (`A1:C1`, `2-4`) are
//!   expanded into a flat grid
//! - **Pivot normalization**: transposed "label down the side" layouts are
//!   detected and rewritten row-major
//! - **Best-effort recovery**: malformed rows and blocks are dropped with
//!   warnings; extraction never fails on recoverable input
//!
//! ## Quick Start
//!
//! ```rust
//! use table_chunker::TableExtractor;
//!
//! let document = "| Name | Age |\n| --- | --- |\n| Alice | 30 |";
//! let extractor = TableExtractor::new();
//! let result = extractor.extract(document);
//!
//! assert_eq!(result.tables.len(), 1);
//! assert_eq!(result.tables[0].headers, vec!["Name", "Age"]);
//! ```
//!
//! ## Advanced Usage
//!
//! ```rust
//! use table_chunker::TableExtractor;
//!
//! let extractor = TableExtractor::builder()
//!     .pivot_column_threshold(4)
//!     .pivot_row_ratio(3.0)
//!     .html_enabled(false)
//!     .build();
//!
//! let result = extractor.extract("| Label | Value |\n| --- | --- |\n| a | 1 |");
//! ```

pub mod error;
pub mod header;
pub mod metadata;
pub mod parser;
pub mod pivot;
pub mod range;
pub mod table;

pub use error::{ExtractError, SkipReason, WarningKind};
pub use metadata::{enrich, Chunk, Metadata, MetadataValue};
pub use pivot::{OrientationDecision, PivotConfig};
pub use range::RangeSpec;
pub use table::{Cell, ExtractionResult, Orientation, SourceSpan, Table, Warning};

/// Main extraction interface.
///
/// Stateless apart from read-only configuration, so a single instance may be
/// shared across threads; parsing is synchronous and per-document.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    pivot: PivotConfig,
    html_enabled: bool,
}

impl TableExtractor {
    /// Create an extractor with default settings.
    ///
    /// Defaults: `pivot_column_threshold = 3`, `pivot_row_ratio = 2.0`,
    /// `html_enabled = true`.
    pub fn new() -> Self {
        Self {
            pivot: PivotConfig::default(),
            html_enabled: true,
        }
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> TableExtractorBuilder {
        TableExtractorBuilder::new()
    }

    /// Extract every table from the document, in document order, together
    /// with the warning log for whatever had to be repaired or dropped.
    ///
    /// Never fails on recoverable input: a document with no tables (or only
    /// malformed ones) yields an empty table list plus warnings.
    pub fn extract(&self, text: &str) -> ExtractionResult {
        parser::extract(text, &self.pivot, self.html_enabled)
    }

    /// Like [`extract`](Self::extract), for callers holding raw bytes.
    ///
    /// Non-UTF-8 input or interior NUL bytes (binary content) are a fatal
    /// precondition violation.
    pub fn extract_bytes(&self, bytes: &[u8]) -> error::Result<ExtractionResult> {
        if bytes.contains(&0) {
            return Err(ExtractError::InvalidInputEncoding(
                "interior NUL byte".to_string(),
            ));
        }
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ExtractError::InvalidInputEncoding(e.to_string()))?;
        Ok(self.extract(text))
    }

    /// Extract tables and package each as an indexing-ready [`Chunk`]:
    /// the canonical Markdown rendering plus enriched metadata
    /// (`chunk_type = "table"`, source span, orientation). Caller-supplied
    /// keys in `base_metadata` are preserved; the input map is not mutated.
    pub fn chunks(&self, text: &str, base_metadata: &Metadata) -> Vec<Chunk> {
        self.extract(text)
            .tables
            .into_iter()
            .map(|table| {
                let mut metadata = enrich(base_metadata, true);
                metadata.insert(
                    "source_start_line".to_string(),
                    MetadataValue::from(table.source_span.start_line),
                );
                metadata.insert(
                    "source_end_line".to_string(),
                    MetadataValue::from(table.source_span.end_line),
                );
                metadata.insert(
                    "orientation".to_string(),
                    MetadataValue::from(table.orientation.as_str()),
                );
                Chunk {
                    text: table.to_markdown(),
                    metadata,
                }
            })
            .collect()
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a [`TableExtractor`].
pub struct TableExtractorBuilder {
    pivot: PivotConfig,
    html_enabled: bool,
}

impl TableExtractorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            pivot: PivotConfig::default(),
            html_enabled: true,
        }
    }

    /// Widest table that may still be classified as transposed.
    ///
    /// Default: 3
    pub fn pivot_column_threshold(mut self, threshold: usize) -> Self {
        self.pivot.column_threshold = threshold;
        self
    }

    /// Minimum row-to-column ratio for a transposed classification.
    ///
    /// Default: 2.0
    pub fn pivot_row_ratio(mut self, ratio: f64) -> Self {
        self.pivot.row_ratio = ratio;
        self
    }

    /// Whether embedded HTML `<table>` elements are parsed.
    ///
    /// Default: true
    pub fn html_enabled(mut self, enabled: bool) -> Self {
        self.html_enabled = enabled;
        self
    }

    /// Build the extractor with the configured settings.
    pub fn build(self) -> TableExtractor {
        TableExtractor {
            pivot: self.pivot,
            html_enabled: self.html_enabled,
        }
    }
}

impl Default for TableExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
