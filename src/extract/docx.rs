use std::fs;
use std::path::Path;

use docx_rs::{
    DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild,
};

use super::{Converter, clean_text};
use crate::error::ExtractError;

/// Word documents via docx-rs: paragraphs, hyperlinks and table cells
#[derive(Debug, Default)]
pub(crate) struct DocxConverter;

impl Converter for DocxConverter {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn supports(&self, extension: &str) -> bool {
        extension == "docx"
    }

    fn convert(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = fs::read(path)?;
        let doc = docx_rs::read_docx(&bytes).map_err(|e| ExtractError::Convert {
            format: "docx",
            message: e.to_string(),
        })?;

        let mut text = String::new();
        for child in &doc.document.children {
            push_document_child(child, &mut text);
        }
        Ok(clean_text(&text))
    }
}

fn push_runs(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    if let RunChild::Text(text) = run_child {
                        out.push_str(&text.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_runs(&link.children, out),
            _ => {}
        }
    }
}

fn push_document_child(child: &DocumentChild, out: &mut String) {
    match child {
        DocumentChild::Paragraph(para) => {
            push_runs(&para.children, out);
            out.push('\n');
        }
        DocumentChild::Table(table) => {
            for row in &table.rows {
                let TableChild::TableRow(tr) = row;
                let mut cells = Vec::new();
                for cell in &tr.cells {
                    let TableRowChild::TableCell(tc) = cell;
                    let mut cell_text = String::new();
                    for content in &tc.children {
                        if let TableCellContent::Paragraph(para) = content {
                            push_runs(&para.children, &mut cell_text);
                        }
                    }
                    cells.push(cell_text);
                }
                out.push_str(&cells.join(" | "));
                out.push('\n');
            }
        }
        _ => {}
    }
}
