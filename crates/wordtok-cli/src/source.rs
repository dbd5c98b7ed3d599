//! Text sources for the tokenizer
//!
//! A source turns one input file into one string of raw text. Plain files are
//! read as UTF-8; PDF files need the `pdf` feature.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Anything that can supply the raw text of one document
pub trait TextSource {
    /// Extract the full text of the document
    fn extract_text(&self) -> Result<String>;
}

/// UTF-8 text file
#[derive(Debug, Clone)]
pub struct PlainTextFile {
    path: PathBuf,
}

impl PlainTextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TextSource for PlainTextFile {
    fn extract_text(&self) -> Result<String> {
        std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read text file: {:?}", self.path))
    }
}

/// PDF document
///
/// Page texts are concatenated in page order with no separator. Pages without
/// extractable text contribute nothing.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone)]
pub struct PdfFile {
    path: PathBuf,
}

#[cfg(feature = "pdf")]
impl PdfFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(feature = "pdf")]
impl TextSource for PdfFile {
    fn extract_text(&self) -> Result<String> {
        let document = lopdf::Document::load(&self.path)
            .with_context(|| format!("Failed to open PDF: {:?}", self.path))?;

        let mut text = String::new();
        for page_number in document.get_pages().into_keys() {
            match document.extract_text(&[page_number]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(err) => tracing::warn!(page_number, %err, "skipping page without text"),
            }
        }
        Ok(text)
    }
}

/// Pick a source for `path` based on its extension
pub fn open(path: &Path) -> Result<Box<dyn TextSource>> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        open_pdf(path)
    } else {
        Ok(Box::new(PlainTextFile::new(path)))
    }
}

#[cfg(feature = "pdf")]
fn open_pdf(path: &Path) -> Result<Box<dyn TextSource>> {
    Ok(Box::new(PdfFile::new(path)))
}

#[cfg(not(feature = "pdf"))]
fn open_pdf(path: &Path) -> Result<Box<dyn TextSource>> {
    anyhow::bail!(
        "{:?} is a PDF; rebuild with `--features pdf` to read PDF files",
        path
    )
}

/// Read the text of `path` through the matching source
pub fn read_text(path: &Path) -> Result<String> {
    let text = open(path)?.extract_text()?;
    tracing::info!(path = ?path, chars = text.chars().count(), "extracted text");
    Ok(text)
}
