//! Error types for pagemend library.
//!
//! The cleanup stages themselves never fail; these errors only arise at the
//! edges, when loading an extractor dump or validating options.

use std::io;
use thiserror::Error;

/// Result type alias for pagemend operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the reconstruction pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The page dump could not be deserialized.
    #[error("Invalid page dump: {0}")]
    Json(#[from] serde_json::Error),

    /// The input file is not a page dump this crate understands.
    #[error("Unsupported file type: {0}. Only .json page dumps are supported.")]
    UnsupportedFormat(String),

    /// Every page of the document was a scanned image.
    #[error("All {0} pages appear to be scanned images. OCR is not supported.")]
    AllPagesScanned(u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// An option value is out of its accepted range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}
