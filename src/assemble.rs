//! Output assembly around a reconstructed document.
//!
//! Loads extractor page dumps and wraps pipeline output with a metadata
//! header, the removed-pattern note and optional truncation.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Document, HeaderFooterPattern, PageUnit};

/// Converter name and version written into metadata headers.
pub const CONVERTER: &str = concat!("pagemend v", env!("CARGO_PKG_VERSION"));

/// Metadata header format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataStyle {
    /// Single-line HTML comment
    #[default]
    Comment,
    /// YAML frontmatter block
    Frontmatter,
}

/// Options for assembling the final Markdown output.
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Metadata header format
    pub style: MetadataStyle,

    /// Truncate output to this many characters
    pub max_chars: Option<usize>,

    /// Fixed conversion timestamp (defaults to now)
    pub timestamp: Option<String>,
}

impl AssembleOptions {
    /// Create new assemble options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use YAML frontmatter instead of a comment header.
    pub fn with_frontmatter(mut self, frontmatter: bool) -> Self {
        self.style = if frontmatter {
            MetadataStyle::Frontmatter
        } else {
            MetadataStyle::Comment
        };
        self
    }

    /// Set the character limit.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Set a fixed timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Current UTC time in `YYYY-MM-DDTHH:MM:SSZ` form.
pub fn timestamp_now() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Comment listing the header/footer patterns that were stripped.
pub fn removed_patterns_note(patterns: &[HeaderFooterPattern]) -> String {
    let joined = patterns
        .iter()
        .map(HeaderFooterPattern::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("<!-- Removed repeating headers/footers: {} -->", joined)
}

/// Build the metadata header for a converted source.
pub fn metadata_header(source_name: &str, timestamp: &str, style: MetadataStyle) -> String {
    match style {
        MetadataStyle::Comment => format!(
            "<!-- source: {} | converted: {} | converter: {} -->",
            source_name, timestamp, CONVERTER
        ),
        MetadataStyle::Frontmatter => format!(
            "---\nsource: {}\nconverted: {}\nconverter: {}\n---",
            source_name, timestamp, CONVERTER
        ),
    }
}

/// Cut `markdown` to `max_chars` characters and append a truncation marker.
///
/// Text at or under the limit is returned unchanged.
pub fn truncate(markdown: &str, max_chars: usize) -> String {
    match markdown.char_indices().nth(max_chars) {
        Some((cut, _)) => format!(
            "{}\n\n[... truncated at {} characters]",
            &markdown[..cut],
            max_chars
        ),
        None => markdown.to_string(),
    }
}

/// Compose the final Markdown for a document.
///
/// Fails when every page was a scanned image, since there is nothing to
/// emit.
pub fn assemble(
    document: &Document,
    source_name: &str,
    options: &AssembleOptions,
) -> Result<String> {
    if document.is_all_scanned() {
        return Err(Error::AllPagesScanned(document.page_count));
    }

    let timestamp = options.timestamp.clone().unwrap_or_else(timestamp_now);
    let mut output = metadata_header(source_name, &timestamp, options.style);
    output.push_str("\n\n");

    if !document.removed_header_footer_patterns.is_empty() {
        output.push_str(&removed_patterns_note(&document.removed_header_footer_patterns));
        output.push_str("\n\n");
    }
    output.push_str(&document.markdown);

    Ok(match options.max_chars {
        Some(max_chars) => truncate(&output, max_chars),
        None => output,
    })
}

/// Load an extractor page dump from a `.json` file.
pub fn load_pages<P: AsRef<Path>>(path: P) -> Result<Vec<PageUnit>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if !is_json {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_else(|| path.display().to_string());
        return Err(Error::UnsupportedFormat(ext));
    }

    let data = fs::read_to_string(path)?;
    load_pages_from_str(&data)
}

/// Parse an extractor page dump (a JSON array of pages).
pub fn load_pages_from_str(json: &str) -> Result<Vec<PageUnit>> {
    let pages: Vec<PageUnit> = serde_json::from_str(json)?;
    log::debug!("Loaded {} pages", pages.len());
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "2024-01-02T03:04:05Z";

    #[test]
    fn test_metadata_comment() {
        let header = metadata_header("report.json", TS, MetadataStyle::Comment);
        assert_eq!(
            header,
            format!(
                "<!-- source: report.json | converted: {} | converter: {} -->",
                TS, CONVERTER
            )
        );
    }

    #[test]
    fn test_metadata_frontmatter() {
        let header = metadata_header("report.json", TS, MetadataStyle::Frontmatter);
        assert!(header.starts_with("---\nsource: report.json\n"));
        assert!(header.contains("converted: 2024-01-02T03:04:05Z\n"));
        assert!(header.ends_with("\n---"));
    }

    #[test]
    fn test_removed_patterns_note() {
        let patterns = vec![
            HeaderFooterPattern::from_line("ACME Corp").unwrap(),
            HeaderFooterPattern::from_line("Page 4").unwrap(),
        ];
        assert_eq!(
            removed_patterns_note(&patterns),
            "<!-- Removed repeating headers/footers: ACME Corp, Page NUM -->"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
        assert_eq!(
            truncate("abcdefgh", 3),
            "abc\n\n[... truncated at 3 characters]"
        );
    }

    #[test]
    fn test_truncate_char_boundary() {
        assert_eq!(
            truncate("héllo wörld", 2),
            "hé\n\n[... truncated at 2 characters]"
        );
    }

    #[test]
    fn test_assemble_order() {
        let document = Document {
            markdown: "Body.\n".to_string(),
            removed_header_footer_patterns: vec![HeaderFooterPattern::from_line("Page 1").unwrap()],
            page_count: 3,
            ..Default::default()
        };
        let options = AssembleOptions::new().with_timestamp(TS);
        let output = assemble(&document, "doc.json", &options).unwrap();

        let header = metadata_header("doc.json", TS, MetadataStyle::Comment);
        assert_eq!(
            output,
            format!(
                "{}\n\n<!-- Removed repeating headers/footers: Page NUM -->\n\nBody.\n",
                header
            )
        );
    }

    #[test]
    fn test_assemble_all_scanned() {
        let mut document = Document::new();
        document.page_count = 2;
        document.stats.scanned_pages = 2;
        let result = assemble(&document, "scan.json", &AssembleOptions::new());
        assert!(matches!(result, Err(Error::AllPagesScanned(2))));
    }

    #[test]
    fn test_assemble_truncates_whole_output() {
        let document = Document {
            markdown: "x".repeat(500),
            page_count: 1,
            ..Default::default()
        };
        let options = AssembleOptions::new().with_timestamp(TS).with_max_chars(50);
        let output = assemble(&document, "doc.json", &options).unwrap();
        assert!(output.ends_with("\n\n[... truncated at 50 characters]"));
        assert!(output.starts_with("<!-- source: doc.json"));
    }

    #[test]
    fn test_load_pages_from_str() {
        let pages = load_pages_from_str(
            r#"[{"index": 1, "raw_text": "Hello"}, {"index": 2, "scanned": true}]"#,
        )
        .unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].raw_text, "Hello");
        assert!(pages[1].scanned);
    }

    #[test]
    fn test_load_pages_rejects_other_formats() {
        let result = load_pages("document.pdf");
        assert!(matches!(result, Err(Error::UnsupportedFormat(ref e)) if e == ".pdf"));
    }

    #[test]
    fn test_load_pages_invalid_json() {
        assert!(matches!(
            load_pages_from_str("{not json"),
            Err(Error::Json(_))
        ));
    }
}
