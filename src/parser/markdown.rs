// src/parser/markdown.rs
//! Markdown pipe-table segmentation.
//!
//! Scans line by line: a block starts at a pipe row followed by a separator
//! row of dashes (every pipe row before the separator belongs to the header
//! block). The block ends at the first line that breaks the column-count
//! invariant for two consecutive lines, at a blank gap of two or more lines,
//! at a non-table line, or at an HTML table close.

use super::RawBlock;
use crate::error::{SkipReason, WarningKind};
use crate::table::{SourceSpan, Warning};

/// Segment a document into candidate table blocks. Pipe-row runs that never
/// produce a separator row are recorded as unsupported syntax.
pub(crate) fn scan(text: &str, warnings: &mut Vec<Warning>) -> Vec<RawBlock> {
    let lines = Lines::new(text);
    let mut blocks = Vec::new();
    let mut position = 0;

    while position < lines.len() {
        if !is_pipe_row(lines.get(position)) {
            position += 1;
            continue;
        }

        let start = position;

        // Header phase: consecutive pipe rows up to the separator.
        let mut separator = None;
        let mut cursor = start;
        while cursor < lines.len() && is_pipe_row(lines.get(cursor)) {
            if cursor > start && is_separator_row(lines.get(cursor)) {
                separator = Some(cursor);
                break;
            }
            cursor += 1;
        }

        let Some(separator) = separator else {
            let span = lines.span(start, cursor - 1);
            let reason = SkipReason::UnsupportedTableSyntax {
                detail: "pipe rows without a separator row".to_string(),
            };
            log::warn!(
                "lines {}-{}: {reason}",
                span.start_line,
                span.end_line
            );
            warnings.push(Warning {
                message: format!("lines {}-{}: {reason}", span.start_line, span.end_line),
                kind: WarningKind::Skipped(reason),
                span,
            });
            position = cursor;
            continue;
        };

        let header_rows: Vec<Vec<String>> = (start..separator)
            .map(|idx| split_cells(lines.get(idx)))
            .collect();
        let num_cols = header_rows.iter().map(Vec::len).max().unwrap_or(0);

        // Body phase.
        let mut body_lines: Vec<usize> = Vec::new();
        let mut cursor = separator + 1;
        let mut blank_run = 0;
        let mut mismatch_run = 0;

        while cursor < lines.len() {
            let line = lines.get(cursor);

            if line.trim().is_empty() {
                blank_run += 1;
                if blank_run >= 2 {
                    break;
                }
                cursor += 1;
                continue;
            }
            if !is_pipe_row(line) || line.to_ascii_lowercase().contains("</table") {
                break;
            }
            blank_run = 0;

            if split_cells(line).len() == num_cols {
                mismatch_run = 0;
            } else {
                mismatch_run += 1;
                if mismatch_run >= 2 {
                    // Two consecutive breaking lines end the block before
                    // them; the first one is handed back to the scanner.
                    body_lines.pop();
                    cursor -= 1;
                    break;
                }
            }

            body_lines.push(cursor);
            cursor += 1;
        }

        let end = body_lines.last().copied().unwrap_or(separator);
        blocks.push(RawBlock {
            header_rows,
            body_rows: body_lines
                .iter()
                .map(|&idx| split_cells(lines.get(idx)))
                .collect(),
            span: lines.span(start, end),
        });
        position = cursor;
    }

    blocks
}

/// A pipe row has leading and trailing pipes after trimming.
pub(crate) fn is_pipe_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// A separator row is a pipe row whose every cell is dashes with optional
/// alignment colons, e.g. `| --- | :--: |`.
pub(crate) fn is_separator_row(line: &str) -> bool {
    if !is_pipe_row(line) {
        return false;
    }
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            cell.contains('-') && cell.chars().all(|ch| ch == '-' || ch == ':')
        })
}

/// Split a pipe row into trimmed cell texts, outer pipes stripped.
pub(crate) fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Line-indexed view of the document with byte offsets for span bookkeeping.
struct Lines<'a> {
    lines: Vec<&'a str>,
    offsets: Vec<usize>,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut offsets = Vec::new();
        let mut offset = 0;
        for line in text.split('\n') {
            lines.push(line);
            offsets.push(offset);
            offset += line.len() + 1;
        }
        Self { lines, offsets }
    }

    fn len(&self) -> usize {
        self.lines.len()
    }

    fn get(&self, index: usize) -> &'a str {
        self.lines[index]
    }

    /// Inclusive line span (1-based lines, half-open bytes).
    fn span(&self, start: usize, end: usize) -> SourceSpan {
        SourceSpan {
            start_byte: self.offsets[start],
            end_byte: self.offsets[end] + self.lines[end].len(),
            start_line: start + 1,
            end_line: end + 1,
        }
    }
}
