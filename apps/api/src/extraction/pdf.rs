//! PDF decoding backends.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;

use crate::extraction::{DecodeError, FailureKind};

/// A loaded PDF whose pages can be decoded independently.
pub trait PdfPages {
    fn page_count(&self) -> usize;

    /// Text of a single page, 1-indexed.
    fn page_text(&self, page: usize) -> Result<String, DecodeError>;
}

/// Loads a PDF from memory. Implement this to swap the PDF backend.
pub trait PdfDecoder: Send + Sync {
    fn load(&self, bytes: &[u8]) -> Result<Box<dyn PdfPages>, DecodeError>;

    /// Whole-document extraction used when every page's text layer came back
    /// blank. `None` when the backend has no second strategy.
    fn whole_document_text(&self, _bytes: &[u8]) -> Option<String> {
        None
    }

    fn fallback_name(&self) -> &'static str {
        "none"
    }
}

/// lopdf page-by-page extraction, with pdf-extract as the whole-document
/// fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfDecoder;

struct LopdfPages {
    doc: Document,
    page_numbers: Vec<u32>,
}

impl PdfDecoder for LopdfDecoder {
    fn load(&self, bytes: &[u8]) -> Result<Box<dyn PdfPages>, DecodeError> {
        let mut doc = match panic::catch_unwind(|| Document::load_mem(bytes)) {
            Ok(Ok(doc)) => doc,
            Ok(Err(e)) => {
                let message = e.to_string();
                return Err(DecodeError::new(
                    classify_load_error(&message),
                    format!("Failed to load PDF: {message}"),
                ));
            }
            Err(_) => return Err(DecodeError::corrupt("PDF parser panicked while loading")),
        };

        // Owner-password-only files (print/copy restrictions) have an empty
        // user password and open without prompting.
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                DecodeError::new(
                    FailureKind::PasswordProtected,
                    format!("Password required for encrypted PDF: {e}"),
                )
            })?;
        }

        let page_numbers = doc.get_pages().into_keys().collect();
        Ok(Box::new(LopdfPages { doc, page_numbers }))
    }

    fn whole_document_text(&self, bytes: &[u8]) -> Option<String> {
        // pdf-extract is known to panic on some malformed font tables.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => Some(text),
            Ok(Err(_)) | Err(_) => None,
        }
    }

    fn fallback_name(&self) -> &'static str {
        "pdf-extract"
    }
}

impl PdfPages for LopdfPages {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, page: usize) -> Result<String, DecodeError> {
        let number = page
            .checked_sub(1)
            .and_then(|i| self.page_numbers.get(i))
            .copied()
            .ok_or_else(|| DecodeError::new(FailureKind::Other, format!("Page not found: {page}")))?;

        match panic::catch_unwind(AssertUnwindSafe(|| self.doc.extract_text(&[number]))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(DecodeError::new(
                FailureKind::Other,
                format!("Failed to extract text: {e}"),
            )),
            Err(_) => Err(DecodeError::new(
                FailureKind::Other,
                format!("Text decoder panicked on page {page}"),
            )),
        }
    }
}

/// Maps a load error to a failure kind. lopdf reports encryption problems
/// only through the error text.
fn classify_load_error(message: &str) -> FailureKind {
    let lower = message.to_lowercase();
    if lower.contains("encrypt") || lower.contains("decrypt") || lower.contains("password") {
        FailureKind::PasswordProtected
    } else {
        FailureKind::Corrupt
    }
}
