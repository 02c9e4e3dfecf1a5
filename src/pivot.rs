// src/pivot.rs
//! Pivot orientation detection and normalization.
//!
//! Some exporters lay a table out with its semantic header running down the
//! first column instead of across the first row. Detection is a pure scoring
//! function over explicit shape and cardinality signals; it returns a tagged
//! decision (never a boolean guess) so callers can inspect and log the
//! rationale. Normalization transposes the full matrix back to row-major.

use crate::header;
use crate::table::{Orientation, Table};
use std::collections::HashSet;

/// Thresholds for orientation detection. Read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotConfig {
    /// A table wider than this is never classified transposed.
    pub column_threshold: usize,
    /// Minimum ratio of row count to column count for a transposed layout.
    pub row_ratio: f64,
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self {
            column_threshold: 3,
            row_ratio: 2.0,
        }
    }
}

/// Outcome of orientation scoring, with the rationale attached when the
/// signals disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrientationDecision {
    RowMajor,
    Transposed,
    /// Shape signals fired but first-column cardinality is inconclusive.
    /// Callers default to row-major and record the reason as a warning.
    Ambiguous(String),
}

/// Score a raw table's orientation.
///
/// Classified transposed when the table is narrow (`num_cols <=
/// column_threshold`), tall relative to its width (`num_rows >= row_ratio *
/// num_cols`), and the first column's values are all distinct and non-empty,
/// signalling a "label down the side" layout. Never fails.
pub fn detect(table: &Table, config: &PivotConfig) -> OrientationDecision {
    let num_cols = table.num_cols();
    let num_rows = table.num_rows();

    // A transposed layout needs a label column plus at least one value
    // column; single-column tables have nothing to swap.
    if num_cols < 2 || num_rows == 0 {
        return OrientationDecision::RowMajor;
    }
    if num_cols > config.column_threshold {
        return OrientationDecision::RowMajor;
    }
    if (num_rows as f64) < config.row_ratio * num_cols as f64 {
        return OrientationDecision::RowMajor;
    }

    let first_column: Vec<&str> = table
        .rows
        .iter()
        .map(|row| row.first().map(String::as_str).unwrap_or("").trim())
        .collect();
    if first_column.iter().any(|value| value.is_empty()) {
        return OrientationDecision::RowMajor;
    }

    let distinct: HashSet<&str> = first_column.iter().copied().collect();
    if distinct.len() == num_rows {
        OrientationDecision::Transposed
    } else if distinct.len() * 2 >= num_rows {
        OrientationDecision::Ambiguous(format!(
            "first column has {} distinct values across {} rows",
            distinct.len(),
            num_rows
        ))
    } else {
        OrientationDecision::RowMajor
    }
}

/// Rewrite a transposed table into row-major form.
///
/// The full matrix (header row plus data rows) is transposed: the former
/// first column becomes the new header row and the former header row becomes
/// the new first column. Headers are re-flattened so the uniqueness invariant
/// holds, and the result records `Orientation::Transposed` for provenance.
pub fn transpose(table: &Table) -> Table {
    let old_cols = table.num_cols();

    // Column 0 of the old matrix, header cell included.
    let mut new_headers: Vec<String> = Vec::with_capacity(table.num_rows() + 1);
    new_headers.push(table.headers.first().cloned().unwrap_or_default());
    for row in &table.rows {
        new_headers.push(row.first().cloned().unwrap_or_default());
    }

    let new_cols = new_headers.len();
    let mut new_rows = Vec::with_capacity(old_cols.saturating_sub(1));
    for col in 1..old_cols {
        let mut new_row = Vec::with_capacity(new_cols);
        new_row.push(table.headers[col].clone());
        for row in &table.rows {
            new_row.push(row.get(col).cloned().unwrap_or_default());
        }
        new_rows.push(new_row);
    }

    Table {
        headers: header::flatten(&[new_headers], new_cols),
        rows: new_rows,
        orientation: Orientation::Transposed,
        source_span: table.source_span,
    }
}
