//! Statistics collected while reconstructing a document.

use serde::{Deserialize, Serialize};

/// Statistics collected during reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Total number of pages handed to the pipeline
    pub page_count: u32,

    /// Pages that produced an output block
    pub pages_emitted: u32,

    /// Pages skipped because they were scanned images
    pub scanned_pages: u32,

    /// Table blocks spliced into page text
    pub table_blocks: u32,

    /// Figure markers spliced into page text
    pub figure_markers: u32,

    /// Lines dropped as repeating headers/footers
    pub header_footer_lines_removed: u32,

    /// Blank lines dropped as layout artifacts
    pub false_blanks_removed: u32,

    /// Lines merged into a preceding line by reflow
    pub lines_joined: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge per-page counters into this one.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.pages_emitted += other.pages_emitted;
        self.scanned_pages += other.scanned_pages;
        self.table_blocks += other.table_blocks;
        self.figure_markers += other.figure_markers;
        self.header_footer_lines_removed += other.header_footer_lines_removed;
        self.false_blanks_removed += other.false_blanks_removed;
        self.lines_joined += other.lines_joined;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_stats_merge() {
        let mut stats1 = ExtractionStats::new();
        stats1.pages_emitted = 5;
        stats1.lines_joined = 2;

        let stats2 = ExtractionStats {
            pages_emitted: 3,
            lines_joined: 1,
            false_blanks_removed: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.pages_emitted, 8);
        assert_eq!(stats1.lines_joined, 3);
        assert_eq!(stats1.false_blanks_removed, 4);
    }
}
