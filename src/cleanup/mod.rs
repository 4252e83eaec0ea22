//! Text cleanup stages for undoing layout artifacts.
//!
//! Every stage is a pure `&str -> String` function, total over any input
//! (including the empty string). The orchestrator in [`crate::pipeline`]
//! decides the order; the stages themselves know nothing of each other.
//!
//! | Stage | Function |
//! |-------|----------|
//! | Header/footer detection | [`detect_header_footer`] |
//! | Table column dedup | [`dedup_table_columns`] |
//! | Hyphenation repair | [`repair_hyphenation`] |
//! | TOC dot leaders | [`clean_toc`] |
//! | False blank removal | [`remove_false_blanks`] |
//! | Paragraph reflow | [`reflow`] |
//! | Whitespace | [`normalize_whitespace`], [`collapse_blank_runs`] |

mod blanks;
mod header_footer;
mod hyphenation;
mod reflow;
mod table;
mod terminators;
mod toc;
mod whitespace;

pub use blanks::{remove_false_blanks, remove_false_blanks_with};
pub use header_footer::{
    detect_header_footer, scan_window, HeaderFooterScan, DEFAULT_THRESHOLD, MIN_PAGES,
};
pub use hyphenation::repair_hyphenation;
pub use reflow::{reflow, reflow_with};
pub use table::dedup_table_columns;
pub use terminators::Terminators;
pub use toc::clean_toc;
pub use whitespace::{
    collapse_blank_runs, normalize_document, normalize_unicode, normalize_whitespace,
};

/// Strip leading whitespace from each line.
///
/// Extractors encode horizontal position as leading spaces, which would
/// otherwise come out as indented lines.
pub fn strip_leading_spaces(text: &str) -> String {
    text.split('\n')
        .map(str::trim_start)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_leading_spaces() {
        assert_eq!(
            strip_leading_spaces("    indented\n\t tab\nflush"),
            "indented\ntab\nflush"
        );
    }

    #[test]
    fn test_stages_total_on_empty_input() {
        assert_eq!(repair_hyphenation(""), "");
        assert_eq!(clean_toc(""), "");
        assert_eq!(remove_false_blanks(""), "");
        assert_eq!(reflow(""), "");
        assert_eq!(dedup_table_columns(""), "");
        assert_eq!(normalize_whitespace(""), "");
        assert_eq!(collapse_blank_runs(""), "");
        assert_eq!(strip_leading_spaces(""), "");
    }
}
