//! Demo mode: a fixed sample profile instead of real extraction, for
//! environments without real uploads. Every demo response is flagged and
//! carries a notice so sample data is never mistaken for the user's own.

use tracing::warn;

use crate::extraction::{DocumentKind, ExtractionError};
use crate::models::document::RawDocument;
use crate::models::profile::{RawCandidateFields, SectionCandidate};
use crate::observer::PipelineObserver;
use crate::profile::PipelineOutput;
use crate::validation::validate;

pub const DEMO_NOTICE: &str =
    "Demotilstand: felterne er udfyldt med eksempeldata og ikke med indholdet af dit CV.";

/// Applies the same file-type gate as real extraction, then returns the
/// sample profile without running any decoder.
pub fn demo_output(
    doc: &RawDocument,
    observer: &dyn PipelineObserver,
) -> Result<PipelineOutput, ExtractionError> {
    if DocumentKind::detect(doc).is_none() {
        return Err(ExtractionError::UnsupportedFormat {
            file_name: doc.file_name.clone(),
            mime_type: doc.mime_type.clone(),
        });
    }

    warn!(
        "DEMO_MODE is on: returning sample profile instead of extracting '{}'",
        doc.file_name
    );

    Ok(PipelineOutput {
        page_count: None,
        fragment: validate(&sample_candidates(), observer),
    })
}

fn sample_candidates() -> RawCandidateFields {
    RawCandidateFields {
        name: Some("Anna Eksempel".to_string()),
        email: Some("anna.eksempel@example.dk".to_string()),
        phone: Some("+45 12 34 56 78".to_string()),
        address: Some("Eksempelvej 1, 2100 København Ø".to_string()),
        skills: Some(SectionCandidate::PlainText(
            "Projektledelse, kommunikation, Microsoft Office".to_string(),
        )),
        education: Some(SectionCandidate::PlainText(
            "Cand.merc., Copenhagen Business School".to_string(),
        )),
        experience: Some(SectionCandidate::PlainText(
            "Projektkoordinator, Eksempel A/S, 2020-2024".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;

    #[test]
    fn test_demo_output_is_fully_valid() {
        let doc = RawDocument::new(&b"not really a pdf"[..], None, "cv.pdf");
        let output = demo_output(&doc, &RecordingObserver::default()).unwrap();
        assert_eq!(output.fragment.extracted_fields.len(), 7);
        assert_eq!(output.fragment.name.as_deref(), Some("Anna Eksempel"));
    }

    #[test]
    fn test_demo_output_still_gates_file_type() {
        let doc = RawDocument::new(&b"hello"[..], Some("image/png".to_string()), "cv.png");
        let err = demo_output(&doc, &RecordingObserver::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat { .. }));
    }
}
