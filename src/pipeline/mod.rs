//! Reconstruction pipeline.
//!
//! Runs the cleanup stages over a batch of extracted pages in a fixed order:
//!
//! 1. Header/footer detection across all raw page texts, then across table text
//! 2. Per-page concatenation of figure markers, tables and raw text
//! 3. Per-page hyphenation repair, TOC cleanup, false-blank removal, reflow
//! 4. Page labels and `---` separators
//! 5. Document-wide whitespace normalization
//!
//! Stage 1 is the only step that looks at more than one page. Once it is
//! done, pages are independent and stage 3 may run in parallel.

mod options;
mod result;

pub use options::{CleanupPreset, PageSelection, PipelineOptions};
pub use result::ExtractionStats;

use rayon::prelude::*;

use crate::cleanup::{
    clean_toc, dedup_table_columns, detect_header_footer, normalize_document,
    normalize_unicode, reflow_with, remove_false_blanks_with, repair_hyphenation,
    strip_leading_spaces, HeaderFooterScan, MIN_PAGES,
};
use crate::model::{Document, HeaderFooterPattern, PageBlock, PageUnit};

/// Separator placed between page blocks.
pub const PAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Warning emitted when every page is a scanned image.
pub const ALL_SCANNED_WARNING: &str =
    "All pages appear to be scanned images. OCR is not supported.";

/// Text reconstruction pipeline.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

/// Per-page streams after splitting and header/footer removal.
struct PageStreams {
    number: u32,
    figures: String,
    tables: String,
    raw: String,
    figure_markers: u32,
    table_blocks: u32,
}

/// One page after stage 3, with the counters it contributes.
struct PageOutcome {
    block: PageBlock,
    stats: ExtractionStats,
}

impl Pipeline {
    /// Create a new pipeline with the given options.
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(PipelineOptions::from_preset(preset))
    }

    /// Get the pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Reconstruct a document from extracted pages.
    pub fn run(&self, pages: &[PageUnit]) -> Document {
        let mut stats = ExtractionStats::new();
        stats.page_count = pages.len() as u32;

        let mut streams: Vec<PageStreams> = pages
            .iter()
            .enumerate()
            .map(|(position, page)| self.split_streams(page, position, &mut stats))
            .collect();

        let mut warnings = Vec::new();
        if stats.page_count > 0 && stats.scanned_pages == stats.page_count {
            log::warn!("{}", ALL_SCANNED_WARNING);
            warnings.push(ALL_SCANNED_WARNING.to_string());
            return Document {
                warnings,
                page_count: stats.page_count,
                stats,
                ..Default::default()
            };
        }
        if stats.scanned_pages > 0 {
            let warning = format!(
                "{} scanned page(s) skipped (no extractable text)",
                stats.scanned_pages
            );
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        // Stage 1: header/footer detection sees every page, selected or not
        let mut removed: Vec<HeaderFooterPattern> = Vec::new();
        if self.options.remove_headers_footers {
            let raw: Vec<&str> = streams.iter().map(|s| s.raw.as_str()).collect();
            if raw.iter().filter(|t| !t.trim().is_empty()).count() >= MIN_PAGES {
                let scan = detect_header_footer(&raw, self.options.header_footer_threshold);
                Self::apply_scan(scan, &mut streams, |s| &mut s.raw, &mut removed, &mut stats);
            }

            let tables: Vec<&str> = streams.iter().map(|s| s.tables.as_str()).collect();
            if tables.iter().filter(|t| !t.trim().is_empty()).count() >= MIN_PAGES {
                let scan = detect_header_footer(&tables, self.options.header_footer_threshold);
                Self::apply_scan(scan, &mut streams, |s| &mut s.tables, &mut removed, &mut stats);
            }
        }

        let selected: Vec<&PageStreams> = streams
            .iter()
            .filter(|s| self.options.page_selection.includes(s.number))
            .collect();

        // Stages 2-3
        let parallel = self.options.parallel && selected.len() > 1;
        let outcomes: Vec<Option<PageOutcome>> = if parallel {
            selected.par_iter().map(|s| self.clean_page(s)).collect()
        } else {
            selected.iter().map(|s| self.clean_page(s)).collect()
        };

        let mut blocks = Vec::new();
        for outcome in outcomes.into_iter().flatten() {
            stats.merge(&outcome.stats);
            blocks.push(outcome.block);
        }

        // Stage 4
        let sections: Vec<String> = blocks
            .iter()
            .map(|block| {
                if self.options.page_labels {
                    format!("## Page {}\n\n{}", block.index, block.text)
                } else {
                    block.text.clone()
                }
            })
            .collect();
        let mut markdown = sections.join(PAGE_SEPARATOR);

        // Stage 5
        if self.options.normalize_unicode {
            markdown = normalize_unicode(&markdown);
        }
        if self.options.normalize_whitespace {
            markdown = normalize_document(&markdown);
        }

        log::debug!(
            "Reconstructed {} of {} pages ({} header/footer patterns)",
            stats.pages_emitted,
            stats.page_count,
            removed.len()
        );

        Document {
            markdown,
            warnings,
            removed_header_footer_patterns: removed,
            pages: blocks,
            page_count: stats.page_count,
            stats,
        }
    }

    /// Run stage 3 on a single page's text.
    pub fn clean_text(&self, text: &str) -> String {
        self.clean_stages(text).0
    }

    fn split_streams(
        &self,
        page: &PageUnit,
        position: usize,
        stats: &mut ExtractionStats,
    ) -> PageStreams {
        let number = page.number(position);
        if page.scanned {
            stats.scanned_pages += 1;
            return PageStreams {
                number,
                figures: String::new(),
                tables: String::new(),
                raw: String::new(),
                figure_markers: 0,
                table_blocks: 0,
            };
        }

        let raw = if self.options.strip_leading_spaces {
            strip_leading_spaces(&page.raw_text)
        } else {
            page.raw_text.clone()
        };

        let figures = if self.options.include_figures {
            page.figures_markdown()
        } else {
            String::new()
        };
        let figure_markers = figures.lines().count() as u32;

        let (tables, table_blocks) = if self.options.extract_tables {
            let tables = page.tables_markdown();
            let count = page
                .table_text
                .iter()
                .filter(|t| !t.trim().is_empty())
                .count() as u32;
            if self.options.dedup_tables {
                (dedup_table_columns(&tables), count)
            } else {
                (tables, count)
            }
        } else {
            (String::new(), 0)
        };

        PageStreams {
            number,
            figures,
            tables,
            raw,
            figure_markers,
            table_blocks,
        }
    }

    fn apply_scan(
        scan: HeaderFooterScan,
        streams: &mut [PageStreams],
        field: impl Fn(&mut PageStreams) -> &mut String,
        removed: &mut Vec<HeaderFooterPattern>,
        stats: &mut ExtractionStats,
    ) {
        if scan.patterns.is_empty() {
            return;
        }
        for (stream, text) in streams.iter_mut().zip(scan.pages) {
            *field(stream) = text;
        }
        for pattern in scan.patterns {
            if !removed.contains(&pattern) {
                removed.push(pattern);
            }
        }
        stats.header_footer_lines_removed += scan.lines_removed as u32;
    }

    fn clean_page(&self, streams: &PageStreams) -> Option<PageOutcome> {
        let parts: Vec<&str> = [&streams.figures, &streams.tables, &streams.raw]
            .into_iter()
            .map(String::as_str)
            .filter(|part| !part.trim().is_empty())
            .collect();
        if parts.is_empty() {
            return None;
        }

        let text = parts.join("\n\n");
        let (text, false_blanks_removed, lines_joined) = self.clean_stages(&text);

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(PageOutcome {
            block: PageBlock {
                index: streams.number,
                text: text.to_string(),
            },
            stats: ExtractionStats {
                pages_emitted: 1,
                table_blocks: streams.table_blocks,
                figure_markers: streams.figure_markers,
                false_blanks_removed,
                lines_joined,
                ..Default::default()
            },
        })
    }

    fn clean_stages(&self, text: &str) -> (String, u32, u32) {
        let mut result = text.to_string();
        let mut false_blanks_removed = 0;
        let mut lines_joined = 0;

        if self.options.fix_hyphenation {
            result = repair_hyphenation(&result);
        }

        if self.options.clean_toc {
            result = clean_toc(&result);
        }

        if self.options.remove_false_blanks {
            let before = line_count(&result);
            result = remove_false_blanks_with(&result, &self.options.terminators);
            false_blanks_removed = before.saturating_sub(line_count(&result));
        }

        if self.options.reflow {
            let before = line_count(&result);
            result = reflow_with(&result, &self.options.terminators);
            lines_joined = before.saturating_sub(line_count(&result));
        }

        (result, false_blanks_removed, lines_joined)
    }
}

fn line_count(text: &str) -> u32 {
    text.split('\n').count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<PageUnit> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| PageUnit::with_text(i as u32 + 1, *t))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let doc = Pipeline::default().run(&[]);
        assert_eq!(doc.markdown, "");
        assert!(doc.warnings.is_empty());
        assert!(doc.removed_header_footer_patterns.is_empty());
    }

    #[test]
    fn test_single_page_cleanup() {
        let doc = Pipeline::default().run(&pages(&[
            "  The experi-\n  ment was a success\n  for every-\n  one involved.",
        ]));
        assert_eq!(
            doc.markdown,
            "The experiment was a success for everyone involved.\n"
        );
        assert_eq!(doc.stats.pages_emitted, 1);
    }

    #[test]
    fn test_pages_joined_with_separator() {
        let doc = Pipeline::default().run(&pages(&["First page.", "Second page."]));
        assert_eq!(doc.markdown, "First page.\n\n---\n\nSecond page.\n");
    }

    #[test]
    fn test_page_labels() {
        let options = PipelineOptions::new().with_page_labels(true);
        let doc = Pipeline::new(options).run(&pages(&["One.", "Two."]));
        assert_eq!(
            doc.markdown,
            "## Page 1\n\nOne.\n\n---\n\n## Page 2\n\nTwo.\n"
        );
    }

    #[test]
    fn test_blank_pages_omitted() {
        let doc = Pipeline::default().run(&pages(&["One.", "   ", "Three."]));
        assert_eq!(doc.markdown, "One.\n\n---\n\nThree.\n");
        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[1].index, 3);
    }

    #[test]
    fn test_header_footer_removed_before_reflow() {
        let doc = Pipeline::default().run(&pages(&[
            "Annual Report\nAlpha body text.\nPage 1",
            "Annual Report\nBravo body text.\nPage 2",
            "Annual Report\nCharlie body text.\nPage 3",
        ]));
        assert_eq!(doc.removed_patterns(), vec!["Annual Report", "Page NUM"]);
        assert!(!doc.markdown.contains("Annual Report"));
        assert!(!doc.markdown.contains("Page"));
        assert_eq!(doc.stats.header_footer_lines_removed, 6);
    }

    #[test]
    fn test_detection_ignores_page_selection() {
        let options = PipelineOptions::new().with_pages(PageSelection::Pages(vec![2..=2]));
        let doc = Pipeline::new(options).run(&pages(&[
            "Annual Report\nAlpha.",
            "Annual Report\nBravo.",
            "Annual Report\nCharlie.",
        ]));
        assert_eq!(doc.markdown, "Bravo.\n");
        assert_eq!(doc.removed_patterns(), vec!["Annual Report"]);
    }

    #[test]
    fn test_tables_and_figures_spliced_in_order() {
        let mut page = PageUnit::with_text(1, "Body text.");
        page.add_table("| a | a | b |");
        page.add_figure_placeholder();

        let options = PipelineOptions::new().with_tables(true);
        let doc = Pipeline::new(options).run(&[page]);
        assert_eq!(
            doc.markdown,
            "<!-- [image: figure on page 1] -->\n\n| a | | b |\n\nBody text.\n"
        );
        assert_eq!(doc.stats.table_blocks, 1);
        assert_eq!(doc.stats.figure_markers, 1);
    }

    #[test]
    fn test_splice_counts_only_emitted_pages() {
        let input: Vec<PageUnit> = ["Alpha.", "Bravo."]
            .iter()
            .zip(1..)
            .map(|(text, i)| {
                let mut page = PageUnit::with_text(i, *text);
                page.add_table("| a | b |");
                page.add_figure_placeholder();
                page
            })
            .collect();

        let options = PipelineOptions::new()
            .with_tables(true)
            .with_pages(PageSelection::Pages(vec![2..=2]));
        let doc = Pipeline::new(options).run(&input);
        assert_eq!(doc.stats.pages_emitted, 1);
        assert_eq!(doc.stats.table_blocks, 1);
        assert_eq!(doc.stats.figure_markers, 1);
    }

    #[test]
    fn test_tables_skipped_without_flag() {
        let mut page = PageUnit::with_text(1, "Body text.");
        page.add_table("| a | b |");
        let doc = Pipeline::default().run(&[page]);
        assert_eq!(doc.markdown, "Body text.\n");
    }

    #[test]
    fn test_raw_mode_skips_cleanup() {
        let mut page = PageUnit::with_text(1, "  hyph-\n  enated");
        page.add_figure_placeholder();
        let doc = Pipeline::new(PipelineOptions::raw()).run(&[page]);
        assert_eq!(doc.markdown, "hyph-\n  enated");
    }

    #[test]
    fn test_scanned_pages_warning() {
        let input = vec![
            PageUnit::with_text(1, "Readable text."),
            PageUnit::scanned(2),
        ];
        let doc = Pipeline::default().run(&input);
        assert_eq!(doc.markdown, "Readable text.\n");
        assert_eq!(
            doc.warnings,
            vec!["1 scanned page(s) skipped (no extractable text)"]
        );
        assert!(!doc.is_all_scanned());
    }

    #[test]
    fn test_all_scanned() {
        let input = vec![PageUnit::scanned(1), PageUnit::scanned(2)];
        let doc = Pipeline::default().run(&input);
        assert!(doc.is_empty());
        assert!(doc.is_all_scanned());
        assert_eq!(doc.warnings, vec![ALL_SCANNED_WARNING]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let input: Vec<PageUnit> = (0..8u8)
            .map(|i| {
                let tag: String = std::iter::repeat((b'a' + i) as char).take(3).collect();
                PageUnit::with_text(
                    i as u32 + 1,
                    format!(
                        "Shared header\n{tag} body wraps\nacross {tag} lines\n\nwith a {tag} false\n\n{tag} blank.",
                        tag = tag
                    ),
                )
            })
            .collect();
        let parallel = Pipeline::new(PipelineOptions::new()).run(&input);
        let sequential = Pipeline::new(PipelineOptions::new().sequential()).run(&input);
        assert!(!parallel.markdown.is_empty());
        assert!(!parallel.markdown.contains("Shared header"));
        assert_eq!(parallel.markdown, sequential.markdown);
        assert_eq!(parallel.stats, sequential.stats);
    }

    #[test]
    fn test_clean_text() {
        let pipeline = Pipeline::default();
        assert_eq!(
            pipeline.clean_text("Contents .......... 4"),
            "- Contents (p. 4)"
        );
    }
}
