//! Document-wide whitespace normalization.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static INLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{4,}").unwrap());

/// Unify line endings and collapse runs of spaces/tabs to one space.
///
/// Table rows and code fences keep their internal spacing verbatim.
pub fn normalize_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.split('\n')
        .map(|line| {
            let stripped = line.trim();
            if stripped.starts_with('|') || stripped.starts_with("```") {
                line.to_string()
            } else {
                INLINE_RUN.replace_all(line, " ").into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse 3+ blank lines (4+ newlines) to exactly 2 blank lines.
pub fn collapse_blank_runs(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n\n").into_owned()
}

/// Apply whitespace normalization, blank-run collapse and final trimming.
///
/// Non-empty output ends with exactly one newline; a document with no
/// content stays empty.
pub fn normalize_document(text: &str) -> String {
    let text = normalize_whitespace(text);
    let text = collapse_blank_runs(&text);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}\n", trimmed)
    }
}

/// Normalize Unicode to NFC form.
pub fn normalize_unicode(text: &str) -> String {
    text.nfc().collect()
}
