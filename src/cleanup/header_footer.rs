//! Repeating header/footer detection.
//!
//! Must see every page's unmodified text at once, before any per-page
//! cleanup: hyphenation repair or reflow could merge the very lines being
//! fingerprinted, and then "Page 1" / "Page 2" would no longer line up.

use std::collections::{BTreeSet, HashMap};

use crate::model::HeaderFooterPattern;

/// Default fraction of pages a line must repeat on.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Fewer pages than this and detection is skipped.
pub const MIN_PAGES: usize = 3;

const MIN_WINDOW: usize = 3;
const MAX_WINDOW: usize = 6;

/// Outcome of a header/footer scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFooterScan {
    /// Pages with every matching line removed, in input order
    pub pages: Vec<String>,

    /// Removed signatures, sorted
    pub patterns: Vec<HeaderFooterPattern>,

    /// Total number of lines removed across all pages
    pub lines_removed: usize,
}

/// Size of the top/bottom scan window for a page with `line_count` lines.
pub fn scan_window(line_count: usize) -> usize {
    (line_count / 5).clamp(MIN_WINDOW, MAX_WINDOW)
}

/// Find lines repeating near the top or bottom of pages and strip them.
///
/// A signature qualifies when it appears in the top window (or, tallied
/// separately, the bottom window) of at least `max(2, floor(pages *
/// threshold))` pages. Qualifying lines are removed wherever they occur on
/// every page, not only inside the window.
pub fn detect_header_footer<S: AsRef<str>>(pages: &[S], threshold: f64) -> HeaderFooterScan {
    let unchanged = || HeaderFooterScan {
        pages: pages.iter().map(|p| p.as_ref().to_string()).collect(),
        ..Default::default()
    };

    if pages.len() < MIN_PAGES {
        return unchanged();
    }

    let mut top_counts: HashMap<HeaderFooterPattern, usize> = HashMap::new();
    let mut bottom_counts: HashMap<HeaderFooterPattern, usize> = HashMap::new();

    for page in pages {
        let lines: Vec<&str> = page
            .as_ref()
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let window = scan_window(lines.len());

        let top = &lines[..window.min(lines.len())];
        let bottom = &lines[lines.len().saturating_sub(window)..];
        tally(&mut top_counts, top);
        tally(&mut bottom_counts, bottom);
    }

    let min_count = min_occurrences(pages.len(), threshold);
    let patterns: BTreeSet<HeaderFooterPattern> = top_counts
        .into_iter()
        .chain(bottom_counts)
        .filter(|(_, count)| *count >= min_count)
        .map(|(pattern, _)| pattern)
        .collect();

    if patterns.is_empty() {
        log::debug!("No repeating headers/footers across {} pages", pages.len());
        return unchanged();
    }

    log::debug!(
        "Header/footer patterns (min count {}): {:?}",
        min_count,
        patterns
    );

    let mut lines_removed = 0;
    let cleaned: Vec<String> = pages
        .iter()
        .map(|page| {
            let kept: Vec<&str> = page
                .as_ref()
                .split('\n')
                .filter(|line| {
                    let repeated = HeaderFooterPattern::from_line(line)
                        .is_some_and(|p| patterns.contains(&p));
                    if repeated {
                        lines_removed += 1;
                    }
                    !repeated
                })
                .collect();
            kept.join("\n")
        })
        .collect();

    HeaderFooterScan {
        pages: cleaned,
        patterns: patterns.into_iter().collect(),
        lines_removed,
    }
}

fn tally(counts: &mut HashMap<HeaderFooterPattern, usize>, lines: &[&str]) {
    for line in lines {
        if let Some(pattern) = HeaderFooterPattern::from_line(line) {
            *counts.entry(pattern).or_insert(0) += 1;
        }
    }
}

fn min_occurrences(page_count: usize, threshold: f64) -> usize {
    let scaled = (page_count as f64 * threshold).floor() as usize;
    scaled.max(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(scan: &HeaderFooterScan) -> Vec<&str> {
        scan.patterns.iter().map(|p| p.as_str()).collect()
    }

    // Digit-free filler so body lines never share a signature.
    fn word(n: usize) -> String {
        let first = (b'a' + (n / 26) as u8) as char;
        let second = (b'a' + (n % 26) as u8) as char;
        format!("{}{}", first, second)
    }

    #[test]
    fn test_removes_repeating_header() {
        let pages = [
            "Company Report\nContent on page 1",
            "Company Report\nContent on page 2",
            "Company Report\nContent on page 3",
            "Company Report\nContent on page 4",
        ];
        let scan = detect_header_footer(&pages, 0.6);
        assert!(patterns(&scan).contains(&"Company Report"));
        for page in &scan.pages {
            assert!(!page.contains("Company Report"));
        }
    }

    #[test]
    fn test_removes_page_numbers() {
        let pages = ["Content\nPage 1", "Content\nPage 2", "Content\nPage 3"];
        let scan = detect_header_footer(&pages, 0.6);
        assert!(patterns(&scan).contains(&"Page NUM"));
        assert!(scan.pages.iter().all(|p| !p.contains("Page")));
    }

    #[test]
    fn test_too_few_pages_skips() {
        let pages = ["Content page 1", "Content page 2"];
        let scan = detect_header_footer(&pages, DEFAULT_THRESHOLD);
        assert_eq!(scan.pages, vec!["Content page 1", "Content page 2"]);
        assert!(scan.patterns.is_empty());
        assert_eq!(scan.lines_removed, 0);
    }

    #[test]
    fn test_non_repeating_content_preserved() {
        let pages = [
            "Unique header alpha\nFirst page body text",
            "Unique header bravo\nSecond page body text",
            "Unique header charlie\nThird page body text",
        ];
        let scan = detect_header_footer(&pages, 0.6);
        assert!(scan.patterns.is_empty());
        assert_eq!(scan.pages, pages);
    }

    #[test]
    fn test_dynamic_window_detects_fourth_line_header() {
        let pages: Vec<String> = ["alpha", "bravo", "charlie", "delta", "echo"]
            .iter()
            .map(|name| {
                let body: String = (0..20)
                    .map(|n| format!("Body {} line {}\n", name, word(n)))
                    .collect();
                format!(
                    "Title Line\nSubtitle\nDoc ID: 123\nConfidential\n{}Content for page {}",
                    body, name
                )
            })
            .collect();
        let scan = detect_header_footer(&pages, 0.6);
        assert!(patterns(&scan).contains(&"Confidential"));
        assert!(patterns(&scan).contains(&"Doc ID: NUM"));
    }

    #[test]
    fn test_window_clamped_for_short_pages() {
        assert_eq!(scan_window(0), 3);
        assert_eq!(scan_window(14), 3);
        assert_eq!(scan_window(20), 4);
        assert_eq!(scan_window(100), 6);
    }

    #[test]
    fn test_occurrence_outside_window_also_removed() {
        let filler = |range: std::ops::Range<usize>| -> String {
            range.map(|n| format!("filler {}\n", word(n))).collect()
        };
        let pages = [
            format!("ACME Corp\n{}ACME Corp\n{}end", filler(0..15), filler(15..30)),
            "ACME Corp\nshort page".to_string(),
            "ACME Corp\nanother short page".to_string(),
        ];
        let scan = detect_header_footer(&pages, 0.6);
        assert!(patterns(&scan).contains(&"ACME Corp"));
        assert!(!scan.pages[0].contains("ACME Corp"));
        assert_eq!(scan.lines_removed, 4);
    }

    #[test]
    fn test_patterns_sorted() {
        let pages = [
            "Zeta header\nbody one\nAlpha footer 1",
            "Zeta header\nbody two\nAlpha footer 2",
            "Zeta header\nbody three\nAlpha footer 3",
        ];
        let scan = detect_header_footer(&pages, 0.6);
        let found = patterns(&scan);
        let mut sorted = found.clone();
        sorted.sort();
        assert_eq!(found, sorted);
        assert!(found.contains(&"Alpha footer NUM"));
        assert!(found.contains(&"Zeta header"));
    }

    #[test]
    fn test_min_occurrences() {
        assert_eq!(min_occurrences(3, 0.6), 2);
        assert_eq!(min_occurrences(10, 0.6), 6);
        assert_eq!(min_occurrences(4, 0.0), 2);
    }
}
