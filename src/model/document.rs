//! Document-level types.

use super::HeaderFooterPattern;
use crate::pipeline::ExtractionStats;
use serde::{Deserialize, Serialize};

/// One cleaned page block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBlock {
    /// Page number (1-indexed)
    pub index: u32,

    /// Cleaned page text, without label or separator
    pub text: String,
}

/// A reconstructed document, ready for the assembler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Final Markdown with page separators
    pub markdown: String,

    /// Human-readable notes about degraded input
    pub warnings: Vec<String>,

    /// Header/footer signatures removed from every page
    pub removed_header_footer_patterns: Vec<HeaderFooterPattern>,

    /// Cleaned page blocks, in page order
    pub pages: Vec<PageBlock>,

    /// Number of pages handed to the pipeline
    pub page_count: u32,

    /// Pipeline statistics
    pub stats: ExtractionStats,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the document produced no content.
    pub fn is_empty(&self) -> bool {
        self.markdown.trim().is_empty()
    }

    /// Check if every page was a scanned image.
    pub fn is_all_scanned(&self) -> bool {
        self.page_count > 0 && self.stats.scanned_pages == self.page_count
    }

    /// Get a cleaned page block by number (1-indexed).
    pub fn get_page(&self, index: u32) -> Option<&PageBlock> {
        self.pages.iter().find(|p| p.index == index)
    }

    /// Removed patterns as plain strings.
    pub fn removed_patterns(&self) -> Vec<&str> {
        self.removed_header_footer_patterns
            .iter()
            .map(HeaderFooterPattern::as_str)
            .collect()
    }
}
