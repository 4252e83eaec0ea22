//! False blank line removal.
//!
//! Layout extraction often inserts a blank line wherever the vertical gap
//! exceeds a line height, even mid-sentence. Reflow treats blank lines as
//! hard paragraph boundaries, so those blanks have to go first.

use super::Terminators;
use crate::model::is_block_element;

/// Remove single blank lines between lines of the same paragraph, using the
/// default terminator set.
pub fn remove_false_blanks(text: &str) -> String {
    remove_false_blanks_with(text, &Terminators::default())
}

/// Remove single blank lines between lines of the same paragraph.
///
/// For a window `A, blank, C` the blank is dropped when neither `A` nor `C`
/// is a block element and `A` does not end with a terminator. Scanning
/// resumes at `C`, so runs of two or more blanks are left alone.
pub fn remove_false_blanks_with(text: &str, terminators: &Terminators) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 3 {
        return text.to_string();
    }

    let mut result: Vec<&str> = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if i + 2 < lines.len() && is_false_blank(lines[i], lines[i + 1], lines[i + 2], terminators)
        {
            result.push(lines[i]);
            i += 2;
        } else {
            result.push(lines[i]);
            i += 1;
        }
    }
    result.join("\n")
}

fn is_false_blank(before: &str, blank: &str, after: &str, terminators: &Terminators) -> bool {
    let before = before.trim();
    let after = after.trim();
    !before.is_empty()
        && blank.trim().is_empty()
        && !after.is_empty()
        && !is_block_element(before)
        && !is_block_element(after)
        && !terminators.ends_sentence(before)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_single_blank_between_content() {
        let text = "This line continues\n\non the next line";
        assert_eq!(
            remove_false_blanks(text),
            "This line continues\non the next line"
        );
    }

    #[test]
    fn test_preserves_blank_after_sentence_end() {
        let text = "End of sentence.\n\nNew paragraph";
        assert_eq!(remove_false_blanks(text), text);
    }

    #[test]
    fn test_preserves_blank_around_block_elements() {
        let cases = [
            "Some content\n\n# New Section",
            "- List item\n\nFollowing text",
            "Some text\n\n<!-- [image: figure on page 1] -->",
            "| a | b |\n\nAfter table",
        ];
        for text in cases {
            assert_eq!(remove_false_blanks(text), text, "changed: {:?}", text);
        }
    }

    #[test]
    fn test_preserves_multiple_consecutive_blanks() {
        let text = "First paragraph\n\n\nSecond paragraph";
        assert_eq!(remove_false_blanks(text), text);
    }

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(remove_false_blanks("Just one line"), "Just one line");
        assert_eq!(remove_false_blanks("a\n"), "a\n");
        assert_eq!(remove_false_blanks(""), "");
    }

    #[test]
    fn test_removes_multiple_false_blanks() {
        let text = "Line A\n\nLine B\n\nLine C";
        assert_eq!(remove_false_blanks(text), "Line A\nLine B\nLine C");
    }

    #[test]
    fn test_custom_terminators() {
        let text = "文です。\n\n次の段落";
        assert_eq!(remove_false_blanks(text), "文です。\n次の段落");
        assert_eq!(
            remove_false_blanks_with(text, &Terminators::extended()),
            text
        );
    }
}
