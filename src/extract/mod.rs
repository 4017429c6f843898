//! Content extraction
//!
//! Text-like files are read directly with a tolerant UTF-8 decoder; every
//! other extension goes through the converter registry. Failures never
//! escape: they degrade to an empty string.

pub(crate) mod converter;
pub(crate) mod docx;
pub(crate) mod pdf;
pub(crate) mod registry;
pub(crate) mod spreadsheet;

use std::ffi::OsStr;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{AppError, ExtractError};

pub(crate) use converter::{BoxedConverter, Converter};
pub(crate) use registry::converters;

/// Serializes panic hook swaps across threads
static HOOK_LOCK: Mutex<()> = Mutex::new(());

/// Extensions read as plain text without conversion
const TEXT_LIKE_EXTS: &[&str] = &[
    "txt", "md", "csv", "json", "yaml", "yml", "xml", "html", "htm", "css",
];

/// A file to be named
#[derive(Debug, Clone)]
pub(crate) struct SourceFile {
    pub(crate) path: PathBuf,
    /// Lower-cased, without the leading dot; empty when there is no suffix
    pub(crate) extension: String,
}

impl SourceFile {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        if !path.exists() {
            return Err(AppError::FileNotFound { path });
        }
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .unwrap_or_default();
        Ok(Self { path, extension })
    }

    pub(crate) fn is_text_like(&self) -> bool {
        TEXT_LIKE_EXTS.contains(&self.extension.as_str())
    }
}

/// Anything that can turn a file into prompt text
pub(crate) trait ContentExtractor {
    /// Extracted text; empty means "no usable content"
    fn extract(&self, file: &SourceFile) -> String;
}

/// Default extractor: direct read for text, converter registry for the rest
#[derive(Debug, Default)]
pub(crate) struct DocumentExtractor;

impl ContentExtractor for DocumentExtractor {
    fn extract(&self, file: &SourceFile) -> String {
        if file.is_text_like() {
            return read_text_file(&file.path);
        }
        convert_with(converters(), file)
    }
}

/// Try each converter that claims the extension; first non-blank text wins
pub(crate) fn convert_with(converters: &[BoxedConverter], file: &SourceFile) -> String {
    let mut attempted = false;
    for converter in converters.iter().filter(|c| c.supports(&file.extension)) {
        attempted = true;
        match convert_guarded(converter.as_ref(), &file.path) {
            Ok(text) if !text.trim().is_empty() => {
                tracing::debug!(
                    "Extracted {} chars from {} via {}",
                    text.chars().count(),
                    file.path.display(),
                    converter.name()
                );
                return text;
            }
            Ok(_) => {
                tracing::debug!("{} produced no text for {}", converter.name(), file.path.display());
            }
            Err(e) => {
                tracing::debug!("{} failed for {}: {}", converter.name(), file.path.display(), e);
            }
        }
    }
    if !attempted {
        tracing::debug!(
            "No converter supports extension {:?} ({})",
            file.extension,
            file.path.display()
        );
    }
    String::new()
}

/// Run one converter, turning a parser panic into [`ExtractError::Panicked`].
///
/// The default hook is swapped for one that logs at debug level so a
/// recovered panic stays off stderr in quiet mode.
fn convert_guarded(converter: &dyn Converter, path: &Path) -> Result<String, ExtractError> {
    let _guard = HOOK_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info: &panic::PanicHookInfo<'_>| {
        tracing::debug!("Converter panicked: {info}");
    }));
    let result = panic::catch_unwind(AssertUnwindSafe(|| converter.convert(path)));
    panic::set_hook(previous);

    result.unwrap_or_else(|_| {
        Err(ExtractError::Panicked {
            format: converter.name(),
        })
    })
}

/// Decode UTF-8, dropping undecodable bytes instead of replacing them
pub(crate) fn decode_utf8_dropping(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

fn try_read_text(path: &Path) -> Result<String, ExtractError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::debug!("Strict text read failed for {}: {}", path.display(), e);
            let bytes = fs::read(path)?;
            Ok(decode_utf8_dropping(&bytes))
        }
    }
}

/// Best-effort text read; empty on failure
pub(crate) fn read_text_file(path: &Path) -> String {
    try_read_text(path).unwrap_or_else(|e| {
        tracing::debug!("Text read failed for {}: {}", path.display(), e);
        String::new()
    })
}

/// Trim each line and drop blank ones
pub(crate) fn clean_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    struct FakeConverter {
        name: &'static str,
        exts: &'static [&'static str],
        result: Result<&'static str, &'static str>,
    }

    impl Converter for FakeConverter {
        fn name(&self) -> &'static str {
            self.name
        }

        fn supports(&self, extension: &str) -> bool {
            self.exts.contains(&extension)
        }

        fn convert(&self, _path: &Path) -> Result<String, ExtractError> {
            self.result
                .map(str::to_string)
                .map_err(|m| ExtractError::Convert {
                    format: self.name,
                    message: m.to_string(),
                })
        }
    }

    struct PanickingConverter;

    impl Converter for PanickingConverter {
        fn name(&self) -> &'static str {
            "panicky"
        }

        fn supports(&self, _extension: &str) -> bool {
            true
        }

        fn convert(&self, _path: &Path) -> Result<String, ExtractError> {
            panic!("malformed table in document");
        }
    }

    fn fake(
        name: &'static str,
        exts: &'static [&'static str],
        result: Result<&'static str, &'static str>,
    ) -> FakeConverter {
        FakeConverter {
            name,
            exts,
            result,
        }
    }

    fn source(ext: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(format!("doc.{ext}")),
            extension: ext.to_string(),
        }
    }

    #[test]
    fn source_file_extension_is_lowercased() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Report.PDF");
        fs::write(&path, b"x").unwrap();
        let file = SourceFile::open(&path).unwrap();
        assert_eq!(file.extension, "pdf");
    }

    #[test]
    fn source_file_without_suffix_has_empty_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README");
        fs::write(&path, b"x").unwrap();
        assert_eq!(SourceFile::open(&path).unwrap().extension, "");
    }

    #[test]
    fn source_file_missing_is_error() {
        let err = SourceFile::open("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, AppError::FileNotFound { .. }));
    }

    #[test]
    fn text_like_extensions() {
        for ext in ["txt", "md", "csv", "json", "yaml", "yml", "xml", "html", "htm", "css"] {
            assert!(source(ext).is_text_like(), "{ext}");
        }
        assert!(!source("pdf").is_text_like());
        assert!(!source("").is_text_like());
    }

    #[test]
    fn reads_text_file() {
        let mut file = NamedTempFile::with_suffix(".md").unwrap();
        write!(file, "# Title\nbody").unwrap();
        let src = SourceFile::open(file.path()).unwrap();
        assert_eq!(DocumentExtractor.extract(&src), "# Title\nbody");
    }

    #[test]
    fn invalid_utf8_bytes_are_dropped() {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        file.write_all(b"caf\xff\xfee ok").unwrap();
        let src = SourceFile::open(file.path()).unwrap();
        assert_eq!(DocumentExtractor.extract(&src), "cafe ok");
    }

    #[test]
    fn decode_drops_only_invalid_sequences() {
        assert_eq!(decode_utf8_dropping("héllo".as_bytes()), "héllo");
        assert_eq!(decode_utf8_dropping(b"\x80a\xc3"), "a");
        assert_eq!(decode_utf8_dropping(b""), "");
    }

    #[test]
    fn unreadable_text_file_is_empty() {
        assert_eq!(read_text_file(Path::new("/no/such/file.txt")), "");
    }

    #[test]
    fn first_non_blank_converter_wins() {
        let blank = fake("blank", &["pdf"], Ok("   "));
        let failing = fake("failing", &["pdf"], Err("boom"));
        let good = fake("good", &["pdf"], Ok("text"));
        let never = fake("never", &["pdf"], Ok("later"));
        let list: Vec<BoxedConverter> = vec![
            Box::new(blank),
            Box::new(failing),
            Box::new(good),
            Box::new(never),
        ];
        assert_eq!(convert_with(&list, &source("pdf")), "text");
    }

    #[test]
    fn unsupported_extension_is_empty() {
        let list: Vec<BoxedConverter> = vec![Box::new(fake("pdf", &["pdf"], Ok("text")))];
        assert_eq!(convert_with(&list, &source("exe")), "");
        assert_eq!(convert_with(&list, &source("")), "");
    }

    #[test]
    fn all_converters_failing_is_empty() {
        let list: Vec<BoxedConverter> = vec![
            Box::new(fake("a", &["docx"], Err("bad zip"))),
            Box::new(fake("b", &["docx"], Ok(""))),
        ];
        assert_eq!(convert_with(&list, &source("docx")), "");
    }

    #[test]
    fn panicking_converter_is_absorbed_and_next_one_runs() {
        let list: Vec<BoxedConverter> = vec![
            Box::new(PanickingConverter),
            Box::new(fake("good", &["docx"], Ok("recovered"))),
        ];
        assert_eq!(convert_with(&list, &source("docx")), "recovered");
    }

    #[test]
    fn panicking_converter_alone_yields_empty_text() {
        let list: Vec<BoxedConverter> = vec![Box::new(PanickingConverter)];
        assert_eq!(convert_with(&list, &source("xlsx")), "");
    }

    #[test]
    fn guarded_convert_maps_panic_to_error() {
        let err = convert_guarded(&PanickingConverter, Path::new("doc.docx")).unwrap_err();
        assert!(matches!(err, ExtractError::Panicked { format: "panicky" }));
    }

    #[test]
    fn skips_converters_that_do_not_support_extension() {
        let other = fake("other", &["xlsx"], Ok("wrong"));
        let list: Vec<BoxedConverter> = vec![Box::new(other)];
        assert_eq!(convert_with(&list, &source("pdf")), "");
    }

    #[test]
    fn corrupt_binary_document_is_empty() {
        let mut file = NamedTempFile::with_suffix(".pdf").unwrap();
        file.write_all(b"not really a pdf").unwrap();
        let src = SourceFile::open(file.path()).unwrap();
        assert_eq!(DocumentExtractor.extract(&src), "");
    }

    #[test]
    fn binary_documents_go_through_registry() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

        let pdf = SourceFile::open(fixtures.join("budget.pdf")).unwrap();
        assert!(DocumentExtractor.extract(&pdf).contains("Quarterly budget review"));

        let xlsx = SourceFile::open(fixtures.join("ledger.xlsx")).unwrap();
        let text = DocumentExtractor.extract(&xlsx);
        assert!(text.starts_with("=== Sheet: Invoices ==="), "{text}");
        assert!(text.contains("Reviewed by finance"), "{text}");
    }

    #[test]
    fn clean_text_trims_and_drops_blank_lines() {
        let messy = "  Line 1  \n\n  Line 2  \n  \n  Line 3  ";
        assert_eq!(clean_text(messy), "Line 1\nLine 2\nLine 3");
    }
}
