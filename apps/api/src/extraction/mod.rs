//! Text Extractor — turns an uploaded PDF or DOCX into a plain-text transcript.
//!
//! The actual decoding is delegated to the decoders in `pdf` and `docx`; this
//! module only gates on file type, dispatches, and maps failures into
//! `ExtractionError`.

pub mod docx;
pub mod pdf;

use serde::Serialize;
use thiserror::Error;

use crate::models::document::{ExtractedText, RawDocument};
use crate::observer::{PipelineEvent, PipelineObserver};

pub use docx::{DocxDecoder, ZipDocxDecoder};
pub use pdf::{LopdfDecoder, PdfDecoder, PdfPages};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Detects the kind from the declared MIME type or the file name suffix,
    /// case-insensitively. Either signal is sufficient.
    pub fn detect(doc: &RawDocument) -> Option<Self> {
        let mime = doc
            .mime_type
            .as_deref()
            .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase());
        let name = doc.file_name.to_ascii_lowercase();

        if mime.as_deref() == Some(PDF_MIME) || name.ends_with(".pdf") {
            Some(DocumentKind::Pdf)
        } else if mime.as_deref() == Some(DOCX_MIME) || name.ends_with(".docx") {
            Some(DocumentKind::Docx)
        } else {
            None
        }
    }
}

/// Why a decode step failed. Drives the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The decoder itself could not run (panicked, worker lost).
    DecoderUnavailable,
    PasswordProtected,
    Corrupt,
    Other,
}

/// Error reported by a decoder backend.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DecodeError {
    pub kind: FailureKind,
    pub message: String,
}

impl DecodeError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Corrupt, message)
    }
}

#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: '{file_name}' ({})", .mime_type.as_deref().unwrap_or("no content type"))]
    UnsupportedFormat {
        file_name: String,
        mime_type: Option<String>,
    },

    #[error("Extraction failed ({kind:?}): {reason}")]
    ExtractionFailed { kind: FailureKind, reason: String },
}

impl ExtractionError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        ExtractionError::ExtractionFailed {
            kind: FailureKind::DecoderUnavailable,
            reason: reason.into(),
        }
    }

    /// Localized message shown to the end user, who is then invited to fill
    /// in the profile form by hand.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractionError::UnsupportedFormat { .. } => {
                "Filtypen understøttes ikke. Upload venligst dit CV som PDF eller DOCX, eller udfyld profilen manuelt."
            }
            ExtractionError::ExtractionFailed { kind, .. } => match kind {
                FailureKind::DecoderUnavailable => {
                    "Dokumentlæseren er midlertidigt utilgængelig. Prøv igen om lidt, eller udfyld profilen manuelt."
                }
                FailureKind::PasswordProtected => {
                    "Filen er beskyttet med adgangskode. Fjern beskyttelsen og prøv igen, eller udfyld profilen manuelt."
                }
                FailureKind::Corrupt => {
                    "Filen ser ud til at være beskadiget og kunne ikke læses. Prøv en anden fil, eller udfyld profilen manuelt."
                }
                FailureKind::Other => {
                    "Vi kunne ikke læse teksten i dit CV. Prøv venligst en anden fil, eller udfyld profilen manuelt."
                }
            },
        }
    }
}

impl From<DecodeError> for ExtractionError {
    fn from(e: DecodeError) -> Self {
        ExtractionError::ExtractionFailed {
            kind: e.kind,
            reason: e.message,
        }
    }
}

/// Dispatches documents to the PDF or DOCX decoder.
pub struct TextExtractor {
    pdf: Box<dyn PdfDecoder>,
    docx: Box<dyn DocxDecoder>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new(Box::new(LopdfDecoder), Box::new(ZipDocxDecoder))
    }
}

impl TextExtractor {
    pub fn new(pdf: Box<dyn PdfDecoder>, docx: Box<dyn DocxDecoder>) -> Self {
        Self { pdf, docx }
    }

    pub fn extract_text(
        &self,
        doc: &RawDocument,
        observer: &dyn PipelineObserver,
    ) -> Result<ExtractedText, ExtractionError> {
        let kind = DocumentKind::detect(doc).ok_or_else(|| ExtractionError::UnsupportedFormat {
            file_name: doc.file_name.clone(),
            mime_type: doc.mime_type.clone(),
        })?;

        observer.record(PipelineEvent::ExtractionStarted {
            kind,
            file_name: doc.file_name.clone(),
            size: doc.size,
        });

        let extracted = match kind {
            DocumentKind::Pdf => self.extract_pdf(doc, observer)?,
            DocumentKind::Docx => ExtractedText {
                text: self.docx.decode(&doc.bytes)?,
                page_count: None,
            },
        };

        observer.record(PipelineEvent::ExtractionFinished {
            pages: extracted.page_count,
            chars: extracted.text.chars().count(),
        });
        Ok(extracted)
    }

    /// Decodes pages one at a time. Only a failure to load the document is
    /// fatal; a page that fails is reported and skipped.
    fn extract_pdf(
        &self,
        doc: &RawDocument,
        observer: &dyn PipelineObserver,
    ) -> Result<ExtractedText, ExtractionError> {
        let pages = self.pdf.load(&doc.bytes)?;
        let page_count = pages.page_count();

        let mut text = String::new();
        for page in 1..=page_count {
            match pages.page_text(page) {
                Ok(page_text) => {
                    observer.record(PipelineEvent::PageDecoded {
                        page,
                        chars: page_text.chars().count(),
                    });
                    if !text.is_empty() && !page_text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(&page_text);
                }
                Err(e) => observer.record(PipelineEvent::PageFailed {
                    page,
                    reason: e.to_string(),
                }),
            }
        }

        if text.trim().is_empty() && page_count > 0 {
            if let Some(fallback) = self.pdf.whole_document_text(&doc.bytes) {
                if !fallback.trim().is_empty() {
                    observer.record(PipelineEvent::FallbackUsed {
                        decoder: self.pdf.fallback_name(),
                        chars: fallback.chars().count(),
                    });
                    text = fallback;
                }
            }
        }

        Ok(ExtractedText {
            text,
            page_count: Some(page_count),
        })
    }
}
