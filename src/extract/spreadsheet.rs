use std::path::Path;

use calamine::{Reader, open_workbook_auto};

use super::{Converter, clean_text};
use crate::error::ExtractError;

const SPREADSHEET_EXTS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Excel and OpenDocument spreadsheets via calamine, one block per sheet
#[derive(Debug, Default)]
pub(crate) struct SpreadsheetConverter;

impl Converter for SpreadsheetConverter {
    fn name(&self) -> &'static str {
        "spreadsheet"
    }

    fn supports(&self, extension: &str) -> bool {
        SPREADSHEET_EXTS.contains(&extension)
    }

    fn convert(&self, path: &Path) -> Result<String, ExtractError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| ExtractError::Convert {
            format: "spreadsheet",
            message: e.to_string(),
        })?;

        let mut text = String::new();
        let sheet_names = workbook.sheet_names();
        for sheet_name in &sheet_names {
            let Ok(range) = workbook.worksheet_range(sheet_name) else {
                tracing::debug!("Skipping unreadable sheet {sheet_name}");
                continue;
            };
            text.push_str(&format!("=== Sheet: {sheet_name} ===\n"));
            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|cell| cell.to_string())
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                if !cells.is_empty() {
                    text.push_str(&cells.join(" | "));
                    text.push('\n');
                }
            }
        }

        Ok(clean_text(&text))
    }
}
