//! Page-level types.

use serde::{Deserialize, Serialize};

/// One page's extracted content before cleanup.
///
/// Produced once per page by the upstream extractor and never merged
/// across pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageUnit {
    /// Page number (1-indexed, 0 = use position in the document)
    #[serde(default)]
    pub index: u32,

    /// Raw page text in reading order
    #[serde(default)]
    pub raw_text: String,

    /// Pre-rendered pipe-delimited table blocks
    #[serde(default)]
    pub table_text: Vec<String>,

    /// Placeholder comments for detected figures
    #[serde(default)]
    pub figure_markers: Vec<String>,

    /// The page held only an image and no extractable text
    #[serde(default)]
    pub scanned: bool,
}

impl PageUnit {
    /// Create an empty page with the given number.
    pub fn new(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    /// Create a page that only carries raw text.
    pub fn with_text(index: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            raw_text: text.into(),
            ..Default::default()
        }
    }

    /// Create a scanned page with no extractable text.
    pub fn scanned(index: u32) -> Self {
        Self {
            index,
            scanned: true,
            ..Default::default()
        }
    }

    /// Add a pre-rendered table block.
    pub fn add_table(&mut self, table: impl Into<String>) {
        self.table_text.push(table.into());
    }

    /// Add a standard figure placeholder for this page.
    pub fn add_figure_placeholder(&mut self) {
        let marker = figure_placeholder(self.index);
        self.figure_markers.push(marker);
    }

    /// Resolve the 1-indexed page number, falling back to the position.
    pub fn number(&self, position: usize) -> u32 {
        if self.index > 0 {
            self.index
        } else {
            position as u32 + 1
        }
    }

    /// Non-blank table blocks joined by a blank line.
    pub fn tables_markdown(&self) -> String {
        self.table_text
            .iter()
            .filter(|t| !t.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Non-blank figure markers, one per line.
    pub fn figures_markdown(&self) -> String {
        self.figure_markers
            .iter()
            .filter(|m| !m.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Placeholder comment used for a figure detected on a page.
pub fn figure_placeholder(page: u32) -> String {
    format!("<!-- [image: figure on page {}] -->", page)
}
