//! Hyphenation repair across line breaks.

use regex::Regex;
use std::sync::LazyLock;

// Only a lowercase continuation is merged; "Self-\nAwareness" is a real compound.
static LINE_END_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-\n\s*([a-z])").unwrap());

/// Merge words split across lines by a typesetting hyphen.
///
/// `"para-\n  graph"` becomes `"paragraph"`. Has no knowledge of block
/// structure and may run on raw extractor text.
pub fn repair_hyphenation(text: &str) -> String {
    LINE_END_HYPHEN.replace_all(text, "${1}${2}").into_owned()
}
