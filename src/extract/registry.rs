//! Converter registry
//!
//! Order matters: the extractor tries converters front to back.

use std::sync::LazyLock;

use super::docx::DocxConverter;
use super::pdf::PdfConverter;
use super::spreadsheet::SpreadsheetConverter;
use super::BoxedConverter;

/// All registered converters
static CONVERTERS: LazyLock<Vec<BoxedConverter>> = LazyLock::new(|| {
    vec![
        Box::new(PdfConverter),
        Box::new(DocxConverter),
        Box::new(SpreadsheetConverter),
    ]
});

pub(crate) fn converters() -> &'static [BoxedConverter] {
    &CONVERTERS
}

/// Names of converters that handle `extension`
#[cfg(test)]
fn supporting(extension: &str) -> Vec<&'static str> {
    converters()
        .iter()
        .filter(|c| c.supports(extension))
        .map(|c| c.name())
        .collect()
}
