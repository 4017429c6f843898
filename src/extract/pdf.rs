use std::fs;
use std::path::Path;

use super::{Converter, clean_text};
use crate::error::ExtractError;

/// PDF text layer via pdf-extract. Scanned PDFs yield no text.
#[derive(Debug, Default)]
pub(crate) struct PdfConverter;

impl Converter for PdfConverter {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn supports(&self, extension: &str) -> bool {
        extension == "pdf"
    }

    fn convert(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path)?;
        tracing::debug!("PDF file size: {} bytes", bytes.len());

        let text =
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Convert {
                format: "pdf",
                message: e.to_string(),
            })?;

        Ok(clean_text(&text))
    }
}
