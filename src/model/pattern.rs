//! Header/footer line signatures.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Placeholder substituted for every digit run in a signature.
pub const NUM_TOKEN: &str = "NUM";

/// A digit-normalized line signature for repeating page furniture.
///
/// "Page 1" and "Page 2" share the signature `Page NUM`. The normalization
/// only builds the comparison key; surviving content keeps its digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderFooterPattern(String);

impl HeaderFooterPattern {
    /// Build the signature of a line, or `None` for a blank line.
    pub fn from_line(line: &str) -> Option<Self> {
        let normalized = normalize_for_comparison(line);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Get the signature text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeaderFooterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HeaderFooterPattern {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a line for header/footer comparison.
pub fn normalize_for_comparison(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    DIGIT_RUN
        .replace_all(trimmed, NUM_TOKEN)
        .trim()
        .to_string()
}
