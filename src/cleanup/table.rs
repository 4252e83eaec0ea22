//! Table column deduplication for merged-cell artifacts.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR_ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|[\s\-:|]+\|$").unwrap());

/// Blank adjacent duplicate cells produced by merged-cell flattening.
///
/// When the extractor flattens a horizontally merged cell, the same content
/// appears in each spanned column. Only adjacent, non-empty duplicates are
/// blanked; `"| val | other | val |"` is left alone. Separator rows are
/// never modified.
pub fn dedup_table_columns(text: &str) -> String {
    if !text.contains('|') {
        return text.to_string();
    }

    text.split('\n')
        .map(dedup_row)
        .collect::<Vec<_>>()
        .join("\n")
}

fn dedup_row(line: &str) -> String {
    let stripped = line.trim();
    if !stripped.starts_with('|') || SEPARATOR_ROW.is_match(stripped) {
        return line.to_string();
    }

    // First and last elements are the empty edges around the outer pipes.
    let cells: Vec<&str> = stripped.split('|').collect();
    if cells.len() < 3 {
        return line.to_string();
    }

    let last = cells.len() - 1;
    let mut deduped: Vec<&str> = Vec::with_capacity(cells.len());
    deduped.push(cells[0]);
    for j in 1..last {
        let content = cells[j].trim();
        if j > 1 && !content.is_empty() && content == cells[j - 1].trim() {
            deduped.push(" ");
        } else {
            deduped.push(cells[j]);
        }
    }
    deduped.push(cells[last]);
    deduped.join("|")
}
