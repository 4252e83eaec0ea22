//! Data model for the reconstruction pipeline.
//!
//! Pages come in from the extractor as [`PageUnit`]s and leave as a
//! [`Document`]. Lines are classified on demand and never cached.

mod document;
mod line;
mod page;
mod pattern;

pub use document::{Document, PageBlock};
pub use line::{classify, is_block_element, LineKind};
pub use page::{figure_placeholder, PageUnit};
pub use pattern::{normalize_for_comparison, HeaderFooterPattern, NUM_TOKEN};
