// src/range.rs
//! Range decomposition: expands compact merged-cell notations into explicit
//! per-cell coordinates so downstream stages only ever see a flat grid.
//!
//! Two grammars are recognized:
//! - spreadsheet style `<col><row>:<col><row>` (e.g. `A1:C1`, `B2:B5`)
//! - numeric-span style `<n>-<n>` (e.g. `2-4`), which spans rows
//!
//! The spreadsheet grammar takes precedence when a token could match both.

use crate::error::SkipReason;
use crate::table::Cell;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SPREADSHEET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{1,3})([1-9][0-9]*):([A-Za-z]{1,3})([1-9][0-9]*)$")
        .expect("spreadsheet range pattern is valid")
});

static NUMERIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([1-9][0-9]*)-([1-9][0-9]*)$").expect("numeric range pattern is valid"));

/// A parsed range token: the rectangular extent of a merged cell, measured
/// from its anchor. Spans are at least 1 on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub span_rows: usize,
    pub span_cols: usize,
}

impl RangeSpec {
    /// Parse a range token against the supported grammars.
    ///
    /// Reversed spans (end before start) are malformed; so are tokens that
    /// match neither grammar. The caller decides the recovery action (the
    /// owning cell is retained as literal text).
    pub fn parse(token: &str) -> Result<Self, SkipReason> {
        let token = token.trim();

        if let Some(caps) = SPREADSHEET_RE.captures(token) {
            let start_col = column_index(&caps[1]);
            let end_col = column_index(&caps[3]);
            let start_row = parse_row(&caps[2], token)?;
            let end_row = parse_row(&caps[4], token)?;
            if end_col < start_col || end_row < start_row {
                return Err(malformed(token));
            }
            return Ok(Self {
                span_rows: end_row - start_row + 1,
                span_cols: end_col - start_col + 1,
            });
        }

        if let Some(caps) = NUMERIC_RE.captures(token) {
            let start = parse_row(&caps[1], token)?;
            let end = parse_row(&caps[2], token)?;
            if end < start {
                return Err(malformed(token));
            }
            // Numeric spans run down the rows: the vertical merge convention
            // used by pivot-table exports.
            return Ok(Self {
                span_rows: end - start + 1,
                span_cols: 1,
            });
        }

        Err(malformed(token))
    }

    /// Clamp the span so it fits a `num_rows` x `num_cols` grid when
    /// anchored at `(anchor_row, anchor_col)`. The anchor cell itself is
    /// always retained.
    ///
    /// Token extents are author-controlled and unbounded (`1-9999999999`
    /// parses fine), so spans must be clipped against the destination grid
    /// before they are materialized.
    pub fn clip(self, anchor_row: usize, anchor_col: usize, num_rows: usize, num_cols: usize) -> Self {
        Self {
            span_rows: self.span_rows.min(num_rows.saturating_sub(anchor_row)).max(1),
            span_cols: self.span_cols.min(num_cols.saturating_sub(anchor_col)).max(1),
        }
    }

    /// Coordinate offsets covered by this span, relative to the anchor,
    /// in row-major order starting at `(0, 0)`. Call [`clip`](Self::clip)
    /// first; extents are taken at face value here.
    pub fn offsets(&self) -> Vec<(usize, usize)> {
        let capacity = self.span_rows.checked_mul(self.span_cols).unwrap_or(0);
        let mut offsets = Vec::with_capacity(capacity);
        for row in 0..self.span_rows {
            for col in 0..self.span_cols {
                offsets.push((row, col));
            }
        }
        offsets
    }

    /// Materialize the span as cells anchored at `(anchor_row, anchor_col)`.
    ///
    /// Every cell carries an owned copy of the anchor's value (duplication,
    /// not a reference) so the table stays a flat row/column structure with
    /// no merged-cell concept downstream. `is_range_origin` is true only on
    /// the anchor.
    pub fn expand(&self, anchor_row: usize, anchor_col: usize, value: &str) -> Vec<Cell> {
        self.offsets()
            .into_iter()
            .map(|(row, col)| Cell {
                row: anchor_row + row,
                col: anchor_col + col,
                value: value.to_string(),
                is_range_origin: row == 0 && col == 0,
            })
            .collect()
    }
}

/// Split a trailing `{token}` annotation off a cell, e.g. `"Total {A1:C1}"`
/// yields `("Total", "A1:C1")`. Returns `None` when the cell carries no
/// annotation; the token itself is not validated here.
pub(crate) fn split_annotation(cell: &str) -> Option<(&str, &str)> {
    let trimmed = cell.trim_end();
    let inner = trimmed.strip_suffix('}')?;
    let open = inner.rfind('{')?;
    Some((cell[..open].trim_end(), &inner[open + 1..]))
}

/// Convert column letters to a 0-based index (A=0, B=1, ..., Z=25, AA=26).
fn column_index(letters: &str) -> usize {
    let mut index = 0usize;
    for ch in letters.chars() {
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize;
        index = index * 26 + digit + 1;
    }
    index - 1
}

fn parse_row(digits: &str, token: &str) -> Result<usize, SkipReason> {
    digits.parse::<usize>().map_err(|_| malformed(token))
}

fn malformed(token: &str) -> SkipReason {
    SkipReason::MalformedRange {
        token: token.to_string(),
    }
}
