use bytes::Bytes;
use serde::Serialize;

/// An uploaded file as received from the client. Lives only for the
/// duration of one extraction and is never persisted.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub bytes: Bytes,
    pub mime_type: Option<String>,
    pub file_name: String,
    pub size: usize,
}

impl RawDocument {
    pub fn new(bytes: impl Into<Bytes>, mime_type: Option<String>, file_name: impl Into<String>) -> Self {
        let bytes = bytes.into();
        let size = bytes.len();
        Self {
            bytes,
            mime_type,
            file_name: file_name.into(),
            size,
        }
    }
}

/// Plain-text transcript of a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    /// Number of pages for paginated formats (PDF); `None` for DOCX.
    pub page_count: Option<usize>,
}
