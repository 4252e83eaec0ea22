//! # pagemend
//!
//! Text reconstruction for PDF extraction output.
//!
//! PDF text extractors hand back text in visual layout order: hard-wrapped
//! lines, hyphens split across line breaks, page headers and footers on
//! every page, dot-leader tables of contents and tables with duplicated
//! merged cells. This library turns per-page extractor output back into
//! readable Markdown with logical paragraphs.
//!
//! ## Quick Start
//!
//! ```
//! use pagemend::{reconstruct, PageUnit};
//!
//! let pages = vec![
//!     PageUnit::with_text(1, "The experi-\nment was a\nsuccess."),
//!     PageUnit::with_text(2, "Next page."),
//! ];
//! let doc = reconstruct(&pages);
//! assert_eq!(doc.markdown, "The experiment was a success.\n\n---\n\nNext page.\n");
//! ```
//!
//! ## Features
//!
//! - **Header/footer removal**: Repeating page furniture detected across pages
//! - **Paragraph reflow**: Hard-wrapped lines joined back into paragraphs
//! - **Hyphenation repair**: Words split across line breaks rejoined
//! - **Table and TOC cleanup**: Merged-cell duplicates and dot leaders removed
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod assemble;
pub mod cleanup;
pub mod error;
pub mod model;
pub mod pipeline;

// Re-export commonly used types
pub use assemble::{assemble, load_pages, load_pages_from_str, AssembleOptions, MetadataStyle};
pub use cleanup::Terminators;
pub use error::{Error, Result};
pub use model::{Document, HeaderFooterPattern, LineKind, PageBlock, PageUnit};
pub use pipeline::{CleanupPreset, ExtractionStats, PageSelection, Pipeline, PipelineOptions};

use std::path::Path;

/// Reconstruct a document from extracted pages with standard cleanup.
///
/// # Example
///
/// ```
/// use pagemend::{reconstruct, PageUnit};
///
/// let doc = reconstruct(&[PageUnit::with_text(1, "Hello\nworld.")]);
/// assert_eq!(doc.markdown, "Hello world.\n");
/// ```
pub fn reconstruct(pages: &[PageUnit]) -> Document {
    Pipeline::default().run(pages)
}

/// Reconstruct a document with custom options.
///
/// # Example
///
/// ```
/// use pagemend::{reconstruct_with_options, PageUnit, PipelineOptions};
///
/// let options = PipelineOptions::new().with_page_labels(true);
/// let doc = reconstruct_with_options(&[PageUnit::with_text(1, "Text.")], &options).unwrap();
/// assert_eq!(doc.markdown, "## Page 1\n\nText.\n");
/// ```
pub fn reconstruct_with_options(
    pages: &[PageUnit],
    options: &PipelineOptions,
) -> Result<Document> {
    options.validate()?;
    Ok(Pipeline::new(options.clone()).run(pages))
}

/// Load a page dump file and reconstruct it.
///
/// # Example
///
/// ```no_run
/// use pagemend::{reconstruct_file, PipelineOptions};
///
/// let doc = reconstruct_file("report.json", &PipelineOptions::default()).unwrap();
/// println!("{}", doc.markdown);
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P, options: &PipelineOptions) -> Result<Document> {
    let pages = load_pages(path)?;
    reconstruct_with_options(&pages, options)
}

/// Convert a page dump file to Markdown with a metadata header.
///
/// # Example
///
/// ```no_run
/// use pagemend::to_markdown;
///
/// let markdown = to_markdown("report.json").unwrap();
/// std::fs::write("report.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Pagemend::new().open(path)?.to_markdown()
}

/// Builder for reconstructing and assembling documents.
///
/// # Example
///
/// ```no_run
/// use pagemend::{CleanupPreset, Pagemend};
///
/// let markdown = Pagemend::new()
///     .with_cleanup(CleanupPreset::Aggressive)
///     .with_page_labels()
///     .with_frontmatter()
///     .open("report.json")?
///     .to_markdown()?;
/// # Ok::<(), pagemend::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pagemend {
    pipeline_options: PipelineOptions,
    assemble_options: AssembleOptions,
}

impl Pagemend {
    /// Create a new builder with standard cleanup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn cleanup off entirely; pages are only joined.
    pub fn raw(mut self) -> Self {
        self.pipeline_options = self.pipeline_options.with_clean(false);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.pipeline_options = self.pipeline_options.with_cleanup_preset(preset);
        self
    }

    /// Splice extracted tables into the output.
    pub fn with_tables(mut self) -> Self {
        self.pipeline_options = self.pipeline_options.with_tables(true);
        self
    }

    /// Prefix each page with a `## Page N` heading.
    pub fn with_page_labels(mut self) -> Self {
        self.pipeline_options = self.pipeline_options.with_page_labels(true);
        self
    }

    /// Set the header/footer threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.pipeline_options = self.pipeline_options.with_threshold(threshold);
        self
    }

    /// Set the sentence terminator set.
    pub fn with_terminators(mut self, terminators: Terminators) -> Self {
        self.pipeline_options = self.pipeline_options.with_terminators(terminators);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pipeline_options = self.pipeline_options.with_pages(pages);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.pipeline_options = self.pipeline_options.sequential();
        self
    }

    /// Use YAML frontmatter for the metadata header.
    pub fn with_frontmatter(mut self) -> Self {
        self.assemble_options = self.assemble_options.with_frontmatter(true);
        self
    }

    /// Truncate the assembled output.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.assemble_options = self.assemble_options.with_max_chars(max_chars);
        self
    }

    /// Use a fixed timestamp in the metadata header.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.assemble_options = self.assemble_options.with_timestamp(timestamp);
        self
    }

    /// Load a page dump file and reconstruct it.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<PagemendResult> {
        let path = path.as_ref();
        let pages = load_pages(path)?;
        let source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.run(&pages, source_name)
    }

    /// Reconstruct in-memory pages.
    pub fn run(
        self,
        pages: &[PageUnit],
        source_name: impl Into<String>,
    ) -> Result<PagemendResult> {
        let document = reconstruct_with_options(pages, &self.pipeline_options)?;
        Ok(PagemendResult {
            document,
            source_name: source_name.into(),
            assemble_options: self.assemble_options,
        })
    }
}

/// Result of reconstructing a document.
#[derive(Debug, Clone)]
pub struct PagemendResult {
    /// The reconstructed document
    pub document: Document,
    /// Source name written into the metadata header
    pub source_name: String,
    assemble_options: AssembleOptions,
}

impl PagemendResult {
    /// Assemble the final Markdown with metadata header.
    pub fn to_markdown(&self) -> Result<String> {
        assemble(&self.document, &self.source_name, &self.assemble_options)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Get the cleaned Markdown body without header or truncation.
    pub fn markdown(&self) -> &str {
        &self.document.markdown
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
