//! Paragraph reflow.
//!
//! Undoes hard line wraps by joining consecutive prose lines into one
//! paragraph line. Must run after hyphenation repair and false blank removal
//! so the terminators and block markers it inspects are the corrected ones.

use super::Terminators;
use crate::model::{classify, LineKind};

/// Join wrapped lines into paragraphs, using the default terminator set.
pub fn reflow(text: &str) -> String {
    reflow_with(text, &Terminators::default())
}

/// Join wrapped lines into paragraphs.
///
/// Single left-to-right pass:
/// - blank lines are kept as paragraph boundaries;
/// - block elements are kept verbatim;
/// - a line followed by a blank or a block element is kept verbatim;
/// - otherwise the line is appended to the previous output line when that
///   line is prose and does not end a sentence.
///
/// Joining is transitive, so a paragraph can be rebuilt from many lines.
pub fn reflow_with(text: &str, terminators: &Terminators) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut result: Vec<String> = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let stripped = line.trim_end();

        match classify(stripped) {
            LineKind::Blank => {
                result.push(String::new());
                continue;
            }
            kind if kind.is_block() => {
                result.push(stripped.to_string());
                continue;
            }
            _ => {}
        }

        if let Some(next) = lines.get(i + 1) {
            if classify(next) != LineKind::Plain {
                result.push(stripped.to_string());
                continue;
            }
        }

        match result.last_mut() {
            Some(prev) if can_continue(prev, terminators) => {
                prev.push(' ');
                prev.push_str(stripped);
            }
            _ => result.push(stripped.to_string()),
        }
    }

    result.join("\n")
}

fn can_continue(prev: &str, terminators: &Terminators) -> bool {
    !prev.is_empty() && !terminators.ends_sentence(prev) && classify(prev) == LineKind::Plain
}
