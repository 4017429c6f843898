//! Document converter abstraction
//!
//! Each binary format (PDF, Word, spreadsheets) implements the Converter
//! trait so the extractor can try them in order without knowing the format.

use std::path::Path;

use crate::error::ExtractError;

/// Converter trait - implemented by each document format
pub(crate) trait Converter: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether this converter handles the (lower-cased) extension
    fn supports(&self, extension: &str) -> bool;

    /// Convert the file at `path` to plain text
    fn convert(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Box type for dynamic dispatch
pub(crate) type BoxedConverter = Box<dyn Converter>;
