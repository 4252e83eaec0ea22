//! Pipeline options and configuration.

use crate::cleanup::{Terminators, DEFAULT_THRESHOLD};
use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC + whitespace normalization only
    Minimal,
    /// Standard cleanup: the full layout-undo pipeline
    #[default]
    Standard,
    /// Aggressive cleanup: Standard + NFC + lower header/footer threshold
    Aggressive,
}

/// Options for the reconstruction pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Left-trim every raw text line before anything else
    pub strip_leading_spaces: bool,

    /// Detect and remove repeating headers and footers
    pub remove_headers_footers: bool,

    /// Fraction of pages a header/footer must repeat on (0.0-1.0)
    pub header_footer_threshold: f64,

    /// Blank duplicated cells from merged-cell flattening
    pub dedup_tables: bool,

    /// Fix hyphenation at line breaks
    pub fix_hyphenation: bool,

    /// Rewrite dot-leader TOC lines into list items
    pub clean_toc: bool,

    /// Remove blank lines inserted by vertical spacing
    pub remove_false_blanks: bool,

    /// Join hard-wrapped lines into paragraphs
    pub reflow: bool,

    /// Collapse whitespace runs and excess blank lines
    pub normalize_whitespace: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Splice figure placeholder comments into page text
    pub include_figures: bool,

    /// Splice extracted tables into page text
    pub extract_tables: bool,

    /// Prefix each page with a `## Page N` heading
    pub page_labels: bool,

    /// Characters treated as sentence terminators
    pub terminators: Terminators,

    /// Pages to emit
    pub page_selection: PageSelection,

    /// Clean pages in parallel
    pub parallel: bool,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// No cleanup at all: pages are only concatenated and joined.
    pub fn raw() -> Self {
        Self {
            strip_leading_spaces: false,
            remove_headers_footers: false,
            header_footer_threshold: DEFAULT_THRESHOLD,
            dedup_tables: false,
            fix_hyphenation: false,
            clean_toc: false,
            remove_false_blanks: false,
            reflow: false,
            normalize_whitespace: false,
            normalize_unicode: false,
            include_figures: false,
            extract_tables: false,
            page_labels: false,
            terminators: Terminators::default(),
            page_selection: PageSelection::All,
            parallel: true,
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_whitespace: true,
            normalize_unicode: true,
            ..Self::raw()
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self::raw().with_clean(true)
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            normalize_unicode: true,
            header_footer_threshold: 0.5,
            ..Self::standard()
        }
    }

    /// Turn the full cleanup pipeline on or off, keeping output settings.
    pub fn with_clean(mut self, clean: bool) -> Self {
        self.strip_leading_spaces = clean;
        self.remove_headers_footers = clean;
        self.dedup_tables = clean;
        self.fix_hyphenation = clean;
        self.clean_toc = clean;
        self.remove_false_blanks = clean;
        self.reflow = clean;
        self.normalize_whitespace = clean;
        self.include_figures = clean;
        self
    }

    /// Set cleanup preset, keeping output settings.
    pub fn with_cleanup_preset(self, preset: CleanupPreset) -> Self {
        Self {
            extract_tables: self.extract_tables,
            page_labels: self.page_labels,
            page_selection: self.page_selection,
            parallel: self.parallel,
            ..Self::from_preset(preset)
        }
    }

    /// Set the header/footer threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.header_footer_threshold = threshold;
        self
    }

    /// Enable or disable table splicing.
    pub fn with_tables(mut self, extract: bool) -> Self {
        self.extract_tables = extract;
        self
    }

    /// Enable or disable `## Page N` labels.
    pub fn with_page_labels(mut self, labels: bool) -> Self {
        self.page_labels = labels;
        self
    }

    /// Set the sentence terminator set.
    pub fn with_terminators(mut self, terminators: Terminators) -> Self {
        self.terminators = terminators;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check option values.
    pub fn validate(&self) -> Result<()> {
        let t = self.header_footer_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(Error::InvalidOption(format!(
                "header/footer threshold must be between 0.0 and 1.0, got {}",
                t
            )));
        }
        Ok(())
    }

    /// Whether any per-page cleanup stage is enabled.
    pub fn cleans_pages(&self) -> bool {
        self.fix_hyphenation || self.clean_toc || self.remove_false_blanks || self.reflow
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Page selection for output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Emit all pages
    #[default]
    All,
    /// Emit a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Emit specific pages as sorted, non-overlapping inclusive ranges
    Pages(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start = parse_page(start)?;
                let end = parse_page(end)?;
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let range = match part.split_once('-') {
                Some((start, end)) => parse_page(start)?..=parse_page(end)?,
                None => {
                    let p = parse_page(part)?;
                    p..=p
                }
            };
            if range.start() > range.end() {
                return Err(Error::InvalidPageRange(part.to_string()));
            }
            ranges.push(range);
        }

        Ok(PageSelection::Pages(merge_ranges(ranges)))
    }
}

/// Sort ranges and fold overlapping or adjacent ones together.
fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_by_key(|r| *r.start());
    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn parse_page(s: &str) -> Result<u32> {
    s.trim()
        .parse()
        .map_err(|_| Error::InvalidPageRange(format!("invalid page number {:?}", s.trim())))
}
