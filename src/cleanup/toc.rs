//! Table-of-contents dot leader cleanup.

use regex::Regex;
use std::sync::LazyLock;

// Four dots minimum: "Something... 3" is ordinary prose.
static TOC_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(.+?)[ \t]*\.{4,}[ \t]*(\d+)[ \t]*$").unwrap());

/// Rewrite dot-leader TOC lines into list items with a page reference.
///
/// `"Introduction .............. 5"` becomes `"- Introduction (p. 5)"`.
/// Matching is line-anchored and never spans a line break.
pub fn clean_toc(text: &str) -> String {
    TOC_LINE.replace_all(text, "- ${1} (p. ${2})").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_toc_line() {
        assert_eq!(
            clean_toc("Introduction .............. 5"),
            "- Introduction (p. 5)"
        );
    }

    #[test]
    fn test_numbered_toc_line() {
        assert_eq!(
            clean_toc("3.1 API Flow ......... 12"),
            "- 3.1 API Flow (p. 12)"
        );
    }

    #[test]
    fn test_preserves_normal_text() {
        let text = "This is a normal paragraph with no dots.";
        assert_eq!(clean_toc(text), text);
    }

    #[test]
    fn test_preserves_short_dots() {
        assert_eq!(clean_toc("Something... 3"), "Something... 3");
    }

    #[test]
    fn test_multiple_toc_lines() {
        let text = "Introduction .............. 5\n3.1 API Flow ......... 12\nNormal text.";
        assert_eq!(
            clean_toc(text),
            "- Introduction (p. 5)\n- 3.1 API Flow (p. 12)\nNormal text."
        );
    }

    #[test]
    fn test_does_not_span_lines() {
        let text = "Chapter One ........ 7\n\nBody text";
        assert_eq!(clean_toc(text), "- Chapter One (p. 7)\n\nBody text");
    }
}
