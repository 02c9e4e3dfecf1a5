// src/parser/mod.rs
//! Table parsing orchestration.
//!
//! Segmentation is format-specific ([`markdown`] line scan, [`html`] DOM
//! walk); both produce the same [`RawBlock`] shape, which is then taken
//! through range expansion, header flattening, and orientation normalization
//! here. Malformed blocks are dropped with a warning rather than aborting
//! the document.

pub(crate) mod html;
pub(crate) mod markdown;

use crate::error::{SkipReason, WarningKind};
use crate::header;
use crate::pivot::{self, OrientationDecision, PivotConfig};
use crate::range::{self, RangeSpec};
use crate::table::{ExtractionResult, Orientation, SourceSpan, Table, Warning};

/// A segmented candidate table before normalization: raw cell text split
/// into a header block and body rows, plus where it came from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawBlock {
    pub header_rows: Vec<Vec<String>>,
    pub body_rows: Vec<Vec<String>>,
    pub span: SourceSpan,
}

/// Scan a document and assemble every candidate block into a [`Table`].
pub(crate) fn extract(text: &str, pivot_config: &PivotConfig, html_enabled: bool) -> ExtractionResult {
    let mut warnings = Vec::new();

    let mut blocks = markdown::scan(text, &mut warnings);
    if html_enabled {
        blocks.extend(html::scan(text));
    }
    blocks.sort_by_key(|block| block.span.start_byte);

    let mut tables = Vec::new();
    for block in blocks {
        let span = block.span;
        match assemble(block, pivot_config, &mut warnings) {
            Ok(table) => tables.push(table),
            Err(reason) => {
                log::warn!(
                    "skipping table block at lines {}-{}: {reason}",
                    span.start_line,
                    span.end_line
                );
                warnings.push(Warning {
                    message: format!(
                        "skipped table block at lines {}-{}: {reason}",
                        span.start_line, span.end_line
                    ),
                    kind: WarningKind::Skipped(reason),
                    span,
                });
            }
        }
    }

    ExtractionResult { tables, warnings }
}

/// Normalize one raw block into a canonical table.
///
/// Body rows that cannot be reconciled with the header width (padding empty
/// cells, truncating empty extras) are dropped with a warning; a block whose
/// every body row was dropped is skipped entirely. A block that never had
/// body rows (header plus separator only) is a legitimate empty table.
fn assemble(
    block: RawBlock,
    pivot_config: &PivotConfig,
    warnings: &mut Vec<Warning>,
) -> Result<Table, SkipReason> {
    let num_cols = block.header_rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Err(SkipReason::UnsupportedTableSyntax {
            detail: "block has no header columns".to_string(),
        });
    }

    let mut header_rows = block.header_rows;
    for row in &mut header_rows {
        row.resize(num_cols, String::new());
    }
    expand_ranges(&mut header_rows, block.span, warnings);

    let had_body_rows = !block.body_rows.is_empty();
    let mut rows = Vec::with_capacity(block.body_rows.len());
    for mut row in block.body_rows {
        if row.is_empty() || row.len() > num_cols {
            // Extra trailing empty cells are authoring noise; anything else
            // is irreconcilable.
            if row.len() > num_cols && row[num_cols..].iter().all(String::is_empty) {
                row.truncate(num_cols);
            } else {
                let reason = SkipReason::ColumnCountMismatch {
                    expected: num_cols,
                    found: row.len(),
                };
                log::warn!(
                    "dropping row in table at lines {}-{}: {reason}",
                    block.span.start_line,
                    block.span.end_line
                );
                warnings.push(Warning {
                    message: format!(
                        "dropped row in table at lines {}-{}: {reason}",
                        block.span.start_line, block.span.end_line
                    ),
                    kind: WarningKind::Skipped(reason),
                    span: block.span,
                });
                continue;
            }
        }
        row.resize(num_cols, String::new());
        rows.push(row);
    }

    if had_body_rows && rows.is_empty() {
        return Err(SkipReason::UnsupportedTableSyntax {
            detail: "no body row could be reconciled with the header".to_string(),
        });
    }
    expand_ranges(&mut rows, block.span, warnings);

    let table = Table {
        headers: header::flatten(&header_rows, num_cols),
        rows,
        orientation: Orientation::RowMajor,
        source_span: block.span,
    };

    Ok(match pivot::detect(&table, pivot_config) {
        OrientationDecision::Transposed => pivot::transpose(&table),
        OrientationDecision::Ambiguous(detail) => {
            warnings.push(Warning {
                message: format!("ambiguous pivot orientation, defaulted to row-major: {detail}"),
                kind: WarningKind::AmbiguousOrientation { detail },
                span: block.span,
            });
            table
        }
        OrientationDecision::RowMajor => table,
    })
}

/// Route range-annotated cells through the decomposer, spreading the anchor
/// value over the covered grid slots. Spans are clipped at the grid edge;
/// occupied cells are never clobbered. A malformed token keeps the whole
/// cell text literally.
fn expand_ranges(grid: &mut [Vec<String>], span: SourceSpan, warnings: &mut Vec<Warning>) {
    for row_idx in 0..grid.len() {
        for col_idx in 0..grid[row_idx].len() {
            let annotation = range::split_annotation(&grid[row_idx][col_idx])
                .map(|(value, token)| (value.to_string(), token.to_string()));
            let Some((value, token)) = annotation else {
                continue;
            };

            match RangeSpec::parse(&token) {
                Ok(spec) => {
                    // Token extents are unbounded author input; clip before
                    // materializing so a huge span cannot blow up allocation.
                    let spec = spec.clip(row_idx, col_idx, grid.len(), grid[row_idx].len());
                    for cell in spec.expand(row_idx, col_idx, &value) {
                        if cell.row >= grid.len() || cell.col >= grid[cell.row].len() {
                            continue;
                        }
                        if cell.is_range_origin || grid[cell.row][cell.col].is_empty() {
                            grid[cell.row][cell.col] = cell.value;
                        }
                    }
                }
                Err(reason) => {
                    log::warn!("{reason}; cell retained as literal text");
                    warnings.push(Warning {
                        message: format!("{reason}; cell retained as literal text"),
                        kind: WarningKind::Skipped(reason),
                        span,
                    });
                }
            }
        }
    }
}
