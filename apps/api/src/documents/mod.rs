//! Resume document extraction. Turns an uploaded file into plain resume text.
//!
//! Supported: PDF (via `pdf-extract`), DOCX (paragraphs and tables, see
//! [`docx`]) and UTF-8 plain text.

pub(crate) mod docx;

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Could not determine document type for '{0}'; upload a .pdf, .docx or .txt file")]
    UnknownType(String),

    #[error("Failed to parse DOCX: {0}")]
    Docx(String),

    #[error("Failed to parse PDF: {0}")]
    Pdf(String),

    #[error("Text document is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("No text could be extracted from the document")]
    Empty,
}

/// Detects the document kind from the filename extension, falling back to
/// magic bytes when the name is missing or unrecognised.
pub fn detect_kind(filename: Option<&str>, content: &[u8]) -> Option<DocumentKind> {
    filename
        .and_then(kind_from_extension)
        .or_else(|| kind_from_content(content))
}

fn kind_from_extension(filename: &str) -> Option<DocumentKind> {
    let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some(DocumentKind::Pdf),
        "docx" => Some(DocumentKind::Docx),
        "txt" => Some(DocumentKind::Text),
        _ => None,
    }
}

fn kind_from_content(content: &[u8]) -> Option<DocumentKind> {
    if content.starts_with(b"%PDF") {
        Some(DocumentKind::Pdf)
    } else if content.starts_with(b"PK") {
        // OOXML is a zip container
        Some(DocumentKind::Docx)
    } else if std::str::from_utf8(content).is_ok() {
        Some(DocumentKind::Text)
    } else {
        None
    }
}

/// Extracts and cleans the text of a document. CPU-bound for PDF and DOCX;
/// run it on a blocking thread from async code.
pub fn extract_text(kind: DocumentKind, content: &[u8]) -> Result<String, DocumentError> {
    let text = match kind {
        DocumentKind::Pdf => {
            let raw = pdf_extract::extract_text_from_mem(content)
                .map_err(|e| DocumentError::Pdf(e.to_string()))?;
            clean_pdf_text(&raw)
        }
        DocumentKind::Text => normalize_whitespace(std::str::from_utf8(content)?),
        DocumentKind::Docx => normalize_whitespace(&docx::extract_docx_text(content)?),
    };

    if text.is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(text)
}

/// Pages are separated by form feeds in extracted PDF text. Within a page,
/// blank lines and bare page numbers are dropped.
fn clean_pdf_text(raw: &str) -> String {
    let pages: Vec<String> = raw
        .split('\u{c}')
        .map(|page| {
            page.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .filter(|line| !line.chars().all(|c| c.is_ascii_digit()))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|page| !page.is_empty())
        .collect();

    normalize_whitespace(&pages.join("\n\n"))
}

/// Collapses runs of spaces and more than one blank line.
fn normalize_whitespace(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let text = SPACE_RUNS.replace_all(&text, " ");
    let text = NEWLINE_RUNS.replace_all(&text, "\n\n");
    text.trim().to_string()
}
