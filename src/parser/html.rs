// src/parser/html.rs
//! Embedded HTML table segmentation.
//!
//! `<table>` elements are located with `scraper`; `colspan`/`rowspan` are
//! expanded by duplicating the cell text into every covered grid slot, so
//! downstream stages see the same flat [`RawBlock`] shape as the Markdown
//! path. Tables nested inside another table's cell are not descended into.

use super::RawBlock;
use crate::table::SourceSpan;
use scraper::{ElementRef, Html, Selector};

/// Extract every top-level `<table>` element as a raw block, in document
/// order. Returns nothing when the text carries no HTML table at all.
pub(crate) fn scan(text: &str) -> Vec<RawBlock> {
    if !text.to_ascii_lowercase().contains("<table") {
        return Vec::new();
    }

    let selector = match Selector::parse("table") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let dom = Html::parse_fragment(text);
    let spans = table_spans(text);
    let mut blocks = Vec::new();

    let mut top_level_index = 0;
    for element in dom.select(&selector) {
        if has_table_ancestor(&element) {
            continue;
        }
        let span = spans.get(top_level_index).copied().unwrap_or_default();
        top_level_index += 1;
        if let Some(block) = parse_table(&element, span) {
            blocks.push(block);
        }
    }

    blocks
}

/// Build a raw block from one table element. Empty tables yield `None`.
fn parse_table(table: &ElementRef, span: SourceSpan) -> Option<RawBlock> {
    let rows = direct_rows(table);
    if rows.is_empty() {
        return None;
    }

    // Fill a growable grid, duplicating spanned cells into every covered
    // slot. The true width cannot be read off any single row: a rowspan
    // from an earlier row occupies slots in the rows below, pushing their
    // own cells to the right. Each row grows as cells land; no cell is
    // ever dropped.
    let num_rows = rows.len();
    let mut grid: Vec<Vec<Option<String>>> = vec![Vec::new(); num_rows];
    let mut is_header_row = vec![false; num_rows];

    for (row_idx, (row, in_thead)) in rows.iter().enumerate() {
        let cells = direct_cells(row);
        is_header_row[row_idx] = *in_thead
            || (!cells.is_empty() && cells.iter().all(|cell| cell.value().name() == "th"));

        let mut col_idx = 0;
        for cell in cells {
            while col_idx < grid[row_idx].len() && grid[row_idx][col_idx].is_some() {
                col_idx += 1;
            }

            let (col_span, row_span) = cell_spans(&cell);
            let text = cell_text(&cell);
            for covered_row in row_idx..(row_idx + row_span).min(num_rows) {
                if grid[covered_row].len() < col_idx + col_span {
                    grid[covered_row].resize(col_idx + col_span, None);
                }
                for covered_col in col_idx..col_idx + col_span {
                    if grid[covered_row][covered_col].is_none() {
                        grid[covered_row][covered_col] = Some(text.clone());
                    }
                }
            }
            col_idx += col_span;
        }
    }

    let num_cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return None;
    }

    // Leading header rows form the header block; everything else is body.
    // Without any <th> rows, the first row serves as the header.
    let header_len = is_header_row.iter().take_while(|&&header| header).count();
    let header_len = if header_len == 0 { 1 } else { header_len };

    let to_cells = |row: &[Option<String>]| -> Vec<String> {
        let mut cells: Vec<String> = row.iter().map(|cell| cell.clone().unwrap_or_default()).collect();
        cells.resize(num_cols, String::new());
        cells
    };

    Some(RawBlock {
        header_rows: grid[..header_len].iter().map(|row| to_cells(row)).collect(),
        body_rows: grid[header_len..].iter().map(|row| to_cells(row)).collect(),
        span,
    })
}

/// Direct child rows of a table (inside `<thead>`/`<tbody>`/`<tfoot>` or
/// bare), skipping rows that belong to nested tables. The flag marks rows
/// that sit inside `<thead>`.
fn direct_rows<'a>(table: &ElementRef<'a>) -> Vec<(ElementRef<'a>, bool)> {
    let mut rows = Vec::new();
    for child in table.children() {
        let Some(element) = ElementRef::wrap(child) else {
            continue;
        };
        match element.value().name() {
            "tr" => rows.push((element, false)),
            "thead" | "tbody" | "tfoot" => {
                let in_thead = element.value().name() == "thead";
                for nested in element.children() {
                    if let Some(row) = ElementRef::wrap(nested) {
                        if row.value().name() == "tr" {
                            rows.push((row, in_thead));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    rows
}

/// Direct child cells (`<td>`/`<th>`) of a row.
fn direct_cells<'a>(row: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|element| matches!(element.value().name(), "td" | "th"))
        .collect()
}

/// `(colspan, rowspan)` of a cell; missing or unparsable attributes mean 1.
/// Values are capped at the HTML attribute limits (colspan 1000, rowspan
/// 65534) so a hostile attribute cannot size the grid.
fn cell_spans(cell: &ElementRef) -> (usize, usize) {
    let parse = |name: &str, cap: usize| {
        cell.value()
            .attr(name)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .clamp(1, cap)
    };
    (parse("colspan", 1000), parse("rowspan", 65534))
}

/// Whitespace-normalized text content of a cell.
fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_table_ancestor(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "table")
}

/// Byte/line spans of top-level `<table>...</table>` regions, by a
/// case-insensitive tag scan. Unbalanced markup falls back to the end of
/// the document.
fn table_spans(text: &str) -> Vec<SourceSpan> {
    let lower = text.to_ascii_lowercase();
    let line_starts: Vec<usize> = std::iter::once(0)
        .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
        .collect();
    let line_of = |byte: usize| match line_starts.binary_search(&byte) {
        Ok(idx) => idx + 1,
        Err(idx) => idx,
    };

    let make_span = |start_byte: usize, end_byte: usize| SourceSpan {
        start_byte,
        end_byte,
        start_line: line_of(start_byte),
        end_line: line_of(end_byte.saturating_sub(1)),
    };

    // Tag events in document order: true for an open tag, false for a close.
    let mut events: Vec<(usize, bool)> = Vec::new();
    for (idx, _) in lower.match_indices("<table") {
        let rest = &lower[idx + "<table".len()..];
        let boundary = rest.is_empty()
            || rest.starts_with('>')
            || rest.starts_with('/')
            || rest.starts_with(char::is_whitespace);
        if boundary {
            events.push((idx, true));
        }
    }
    events.extend(lower.match_indices("</table").map(|(idx, _)| (idx, false)));
    events.sort_unstable();

    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut open_byte = 0;

    for (idx, is_open) in events {
        if is_open {
            if depth == 0 {
                open_byte = idx;
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                let end = lower[idx..]
                    .find('>')
                    .map(|offset| idx + offset + 1)
                    .unwrap_or(text.len());
                spans.push(make_span(open_byte, end));
            }
        }
    }
    if depth > 0 {
        spans.push(make_span(open_byte, text.len()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_table() {
        let html = "<table><tr><th>Name</th><th>Age</th></tr>\
                    <tr><td>Alice</td><td>30</td></tr></table>";
        let blocks = scan(html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].header_rows, vec![vec!["Name", "Age"]]);
        assert_eq!(blocks[0].body_rows, vec![vec!["Alice", "30"]]);
    }

    #[test]
    fn test_scan_thead_tbody() {
        let html = "<table><thead><tr><td>A</td><td>B</td></tr></thead>\
                    <tbody><tr><td>1</td><td>2</td></tr></tbody></table>";
        let blocks = scan(html);

        assert_eq!(blocks[0].header_rows, vec![vec!["A", "B"]]);
        assert_eq!(blocks[0].body_rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_first_row_convention_without_th() {
        let html = "<table><tr><td>A</td><td>B</td></tr>\
                    <tr><td>1</td><td>2</td></tr></table>";
        let blocks = scan(html);

        assert_eq!(blocks[0].header_rows, vec![vec!["A", "B"]]);
        assert_eq!(blocks[0].body_rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_colspan_duplicates_into_covered_slots() {
        let html = "<table><tr><th colspan=\"2\">Region</th><th>Sales</th></tr>\
                    <tr><td>North</td><td>South</td><td>10</td></tr></table>";
        let blocks = scan(html);

        assert_eq!(blocks[0].header_rows, vec![vec!["Region", "Region", "Sales"]]);
    }

    #[test]
    fn test_rowspan_duplicates_down_rows() {
        let html = "<table><tr><th>A</th><th>B</th></tr>\
                    <tr><td rowspan=\"2\">x</td><td>1</td></tr>\
                    <tr><td>2</td></tr></table>";
        let blocks = scan(html);

        assert_eq!(
            blocks[0].body_rows,
            vec![vec!["x", "1"], vec!["x", "2"]]
        );
    }

    #[test]
    fn test_rowspan_carryover_widens_grid() {
        // The rowspan from row one occupies a slot in row two, so row two's
        // own cells shift right and the table is three columns wide.
        let html = "<table><tr><td rowspan=\"2\">a</td><td>b</td></tr>\
                    <tr><td>c</td><td>d</td></tr></table>";
        let blocks = scan(html);

        assert_eq!(blocks[0].header_rows, vec![vec!["a", "b", ""]]);
        assert_eq!(blocks[0].body_rows, vec![vec!["a", "c", "d"]]);
    }

    #[test]
    fn test_huge_colspan_attribute_is_capped() {
        let html = "<table><tr><th colspan=\"999999999\">A</th></tr>\
                    <tr><td>1</td></tr></table>";
        let blocks = scan(html);

        assert_eq!(blocks[0].header_rows[0].len(), 1000);
    }

    #[test]
    fn test_nested_table_not_descended() {
        let html = "<table><tr><th>A</th></tr>\
                    <tr><td><table><tr><td>inner</td></tr></table></td></tr></table>";
        let blocks = scan(html);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].body_rows.len(), 1);
    }

    #[test]
    fn test_empty_table_skipped() {
        assert!(scan("<table></table>").is_empty());
    }

    #[test]
    fn test_table_spans_track_lines() {
        let text = "before\n<table>\n<tr><td>x</td></tr>\n</table>\nafter";
        let spans = table_spans(text);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start_line, 2);
        assert_eq!(spans[0].end_line, 4);
        assert_eq!(&text[spans[0].start_byte..spans[0].end_byte].lines().next(), &Some("<table>"));
    }
}
