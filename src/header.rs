// src/header.rs
//! Header flattening: collapses multi-row header blocks (grouped or
//! super-column headers) into a single row of unique flat labels.

/// Flatten a header block into one label per column.
///
/// Per column, the non-empty labels are joined top-to-bottom with a single
/// space. A label equal to the one in the same column of the row immediately
/// above is skipped (vertical merge); empty cells are skipped outright.
/// Columns whose flattened label ends up empty get a positional placeholder
/// (`"Column N"`, 1-indexed), and duplicate labels across columns are
/// disambiguated with a ` (2)`, ` (3)`, ... suffix.
///
/// This operation never fails; the worst case degrades to positional
/// placeholders for every column.
pub fn flatten(block: &[Vec<String>], num_cols: usize) -> Vec<String> {
    let mut labels = Vec::with_capacity(num_cols);

    for col in 0..num_cols {
        let mut parts: Vec<&str> = Vec::new();
        let mut previous: Option<&str> = None;

        for row in block {
            let cell = row.get(col).map(|s| s.trim()).unwrap_or("");
            if !cell.is_empty() && previous != Some(cell) {
                parts.push(cell);
            }
            previous = Some(cell);
        }

        if parts.is_empty() {
            labels.push(format!("Column {}", col + 1));
        } else {
            labels.push(parts.join(" "));
        }
    }

    disambiguate(labels)
}

/// Make duplicate labels unique, left to right. The first occurrence keeps
/// its name; later ones get the lowest numeric suffix that is still free.
fn disambiguate(labels: Vec<String>) -> Vec<String> {
    use std::collections::HashSet;

    let mut seen: HashSet<String> = HashSet::with_capacity(labels.len());
    let mut unique = Vec::with_capacity(labels.len());

    for label in labels {
        if seen.insert(label.clone()) {
            unique.push(label);
            continue;
        }
        let mut suffix = 2;
        let mut candidate = format!("{label} ({suffix})");
        while !seen.insert(candidate.clone()) {
            suffix += 1;
            candidate = format!("{label} ({suffix})");
        }
        unique.push(candidate);
    }

    unique
}
