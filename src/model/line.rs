//! Line-level classification.
//!
//! Every transform that merges or drops lines asks this module first whether
//! a line opens a Markdown block construct. Block lines keep their boundaries.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ORDERED_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// Kind of a single text line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// `#` heading marker
    Heading,
    /// `- `, `* ` or `1. ` list marker
    ListItem,
    /// Pipe-delimited table row
    TableRow,
    /// `> ` block quote
    Quote,
    /// `---` horizontal rule
    Rule,
    /// Code fence
    CodeFence,
    /// HTML-style comment such as a figure placeholder
    Comment,
    /// Ordinary prose
    Plain,
    /// Empty or whitespace-only
    Blank,
}

impl LineKind {
    /// Classify a line. Total over any input; the empty string is `Blank`.
    pub fn classify(line: &str) -> Self {
        let stripped = line.trim_start();
        if stripped.trim_end().is_empty() {
            return LineKind::Blank;
        }

        if stripped.starts_with('#') {
            LineKind::Heading
        } else if stripped.starts_with("---") {
            LineKind::Rule
        } else if stripped.starts_with("- ")
            || stripped.starts_with("* ")
            || ORDERED_LIST.is_match(stripped)
        {
            LineKind::ListItem
        } else if stripped.starts_with("> ") {
            LineKind::Quote
        } else if stripped.starts_with("| ") {
            LineKind::TableRow
        } else if stripped.starts_with("```") {
            LineKind::CodeFence
        } else if stripped.starts_with("<!--") {
            LineKind::Comment
        } else {
            LineKind::Plain
        }
    }

    /// Whether this kind is a block element that must never be merged.
    pub fn is_block(self) -> bool {
        !matches!(self, LineKind::Plain | LineKind::Blank)
    }
}

/// Classify a line.
pub fn classify(line: &str) -> LineKind {
    LineKind::classify(line)
}

/// Check if a line is a Markdown block element that shouldn't be joined.
pub fn is_block_element(line: &str) -> bool {
    LineKind::classify(line).is_block()
}
