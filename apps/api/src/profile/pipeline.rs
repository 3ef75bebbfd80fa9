use serde::Serialize;

use crate::extraction::{ExtractionError, TextExtractor};
use crate::models::document::RawDocument;
use crate::models::profile::{
    RawCandidateFields, SectionCandidate, SectionLabel, ValidatedProfileFragment,
};
use crate::observer::PipelineObserver;
use crate::segmentation::contact::extract_contact;
use crate::segmentation::{Sections, Segmenter};
use crate::validation::{validate, NOT_FOUND_PHRASE};

/// Result of running an uploaded document through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub page_count: Option<usize>,
    pub fragment: ValidatedProfileFragment,
}

/// Extract → segment → contact heuristics → validate.
///
/// Holds no per-request state, so one instance is shared across requests.
#[derive(Default)]
pub struct ProfilePipeline {
    extractor: TextExtractor,
    segmenter: Segmenter,
}

impl ProfilePipeline {
    pub fn new(extractor: TextExtractor, segmenter: Segmenter) -> Self {
        Self {
            extractor,
            segmenter,
        }
    }

    /// Blocking: decoding is CPU-bound, call from `spawn_blocking`.
    pub fn run(
        &self,
        doc: &RawDocument,
        observer: &dyn PipelineObserver,
    ) -> Result<PipelineOutput, ExtractionError> {
        let extracted = self.extractor.extract_text(doc, observer)?;
        Ok(PipelineOutput {
            page_count: extracted.page_count,
            fragment: self.run_text(&extracted.text, observer),
        })
    }

    /// Runs the stages after extraction on text the user pasted directly.
    pub fn run_text(
        &self,
        text: &str,
        observer: &dyn PipelineObserver,
    ) -> ValidatedProfileFragment {
        let sections = self.segmenter.segment(text, observer);
        let raw = candidates_from(text, &sections);
        validate(&raw, observer)
    }
}

fn candidates_from(text: &str, sections: &Sections) -> RawCandidateFields {
    let section = |label: SectionLabel| {
        let body = sections
            .get(label)
            .map(str::to_string)
            .unwrap_or_else(|| not_found_placeholder(label));
        Some(SectionCandidate::PlainText(body))
    };

    RawCandidateFields {
        skills: section(SectionLabel::Skills),
        education: section(SectionLabel::Education),
        experience: section(SectionLabel::Experience),
        ..RawCandidateFields::from_contact(extract_contact(text, sections))
    }
}

/// Placeholder for a section with no recognized heading. The validator
/// rejects it, so the field stays empty for the user to fill in.
fn not_found_placeholder(label: SectionLabel) -> String {
    let noun = match label {
        SectionLabel::Experience => "erfaring",
        SectionLabel::Education => "uddannelse",
        SectionLabel::Skills => "skills",
        SectionLabel::Contact => "kontaktoplysninger",
    };
    format!("{NOT_FOUND_PHRASE} {noun} i dit CV. Venligst udfyld denne sektion manuelt.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::docx::tests::build_docx;
    use crate::extraction::{FailureKind, DOCX_MIME};
    use crate::models::profile::ProfileField;
    use crate::observer::{PipelineEvent, RecordingObserver};

    const RESUME: &str = "Sofie Larsen
Kontakt
sofie.larsen@example.dk
+45 20 30 40 50
Nørregade 12, 1165 København K
Erhvervserfaring
Backend-udvikler hos Netcompany, 2019-2024
Uddannelse
Cand.polyt. i softwareteknologi, DTU
Kompetencer
Rust, Tokio, PostgreSQL, Kubernetes";

    #[test]
    fn test_run_text_fills_every_field() {
        let fragment = ProfilePipeline::default().run_text(RESUME, &RecordingObserver::default());
        assert_eq!(fragment.name.as_deref(), Some("Sofie Larsen"));
        assert_eq!(fragment.email.as_deref(), Some("sofie.larsen@example.dk"));
        assert_eq!(fragment.phone.as_deref(), Some("+4520304050"));
        assert_eq!(fragment.address.as_deref(), Some("Nørregade 12, 1165 København K"));
        assert_eq!(
            fragment.experience.as_deref(),
            Some("Backend-udvikler hos Netcompany, 2019-2024")
        );
        assert_eq!(
            fragment.education.as_deref(),
            Some("Cand.polyt. i softwareteknologi, DTU")
        );
        assert_eq!(
            fragment.skills.as_deref(),
            Some("Rust, Tokio, PostgreSQL, Kubernetes")
        );
        assert_eq!(fragment.extracted_fields.len(), 7);
    }

    #[test]
    fn test_missing_sections_are_left_for_the_user() {
        let fragment = ProfilePipeline::default()
            .run_text("Jens Hansen\njens@example.dk", &RecordingObserver::default());
        assert!(fragment.skills.is_none());
        assert!(fragment.education.is_none());
        assert!(fragment.experience.is_none());
        assert_eq!(
            fragment.extracted_fields,
            vec![ProfileField::Name, ProfileField::Email]
        );
    }

    #[test]
    fn test_placeholder_is_rejected_by_validator() {
        let observer = RecordingObserver::default();
        ProfilePipeline::default().run_text("Jens Hansen", &observer);
        assert!(observer.events().contains(&PipelineEvent::FieldRejected {
            field: ProfileField::Skills,
            reason: "not-found placeholder",
        }));
    }

    #[test]
    fn test_placeholder_text() {
        assert_eq!(
            not_found_placeholder(SectionLabel::Skills),
            "Kunne ikke identificere skills i dit CV. Venligst udfyld denne sektion manuelt."
        );
    }

    #[test]
    fn test_run_on_docx_upload() {
        let bytes = build_docx(&[
            "Mads Kristensen",
            "mads@example.dk",
            "Kompetencer",
            "Rust, Go og distribuerede systemer",
        ]);
        let doc = RawDocument::new(bytes, Some(DOCX_MIME.to_string()), "cv.docx");
        let output = ProfilePipeline::default()
            .run(&doc, &RecordingObserver::default())
            .unwrap();
        assert_eq!(output.page_count, None);
        assert_eq!(output.fragment.name.as_deref(), Some("Mads Kristensen"));
        assert_eq!(
            output.fragment.skills.as_deref(),
            Some("Rust, Go og distribuerede systemer")
        );
    }

    #[test]
    fn test_run_propagates_extraction_errors() {
        let doc = RawDocument::new(&b"%PDF-1.7 truncated"[..], None, "cv.pdf");
        let err = ProfilePipeline::default()
            .run(&doc, &RecordingObserver::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ExtractionFailed {
                kind: FailureKind::Corrupt,
                ..
            }
        ));
    }

    #[test]
    fn test_run_rejects_unsupported_format() {
        let doc = RawDocument::new(&b"plain text"[..], Some("text/plain".to_string()), "cv.txt");
        let err = ProfilePipeline::default()
            .run(&doc, &RecordingObserver::default())
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat { .. }));
    }
}
