//! Pipeline diagnostics.
//!
//! Every pipeline stage takes a `&dyn PipelineObserver` instead of logging
//! directly. Production wires in `TracingObserver`; tests record events and
//! assert on them.

use tracing::{debug, info, warn};

use crate::extraction::DocumentKind;
use crate::models::profile::{ProfileField, SectionLabel};

#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    ExtractionStarted {
        kind: DocumentKind,
        file_name: String,
        size: usize,
    },
    PageDecoded {
        page: usize,
        chars: usize,
    },
    PageFailed {
        page: usize,
        reason: String,
    },
    FallbackUsed {
        decoder: &'static str,
        chars: usize,
    },
    ExtractionFinished {
        pages: Option<usize>,
        chars: usize,
    },
    SectionLocated {
        label: SectionLabel,
        heading: String,
        start: usize,
        end: usize,
    },
    SectionMissing {
        label: SectionLabel,
    },
    FieldAccepted {
        field: ProfileField,
    },
    FieldRejected {
        field: ProfileField,
        reason: &'static str,
    },
}

pub trait PipelineObserver: Send + Sync {
    fn record(&self, event: PipelineEvent);
}

/// Forwards pipeline events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn record(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::ExtractionStarted {
                kind,
                file_name,
                size,
            } => info!("Extracting {kind:?} text from '{file_name}' ({size} bytes)"),
            PipelineEvent::PageDecoded { page, chars } => {
                debug!("Decoded page {page} ({chars} chars)")
            }
            PipelineEvent::PageFailed { page, reason } => {
                warn!("Skipping page {page}: {reason}")
            }
            PipelineEvent::FallbackUsed { decoder, chars } => {
                info!("Page text layer was empty; {decoder} fallback produced {chars} chars")
            }
            PipelineEvent::ExtractionFinished { pages, chars } => match pages {
                Some(pages) => info!("Extraction finished: {pages} pages, {chars} chars"),
                None => info!("Extraction finished: {chars} chars"),
            },
            PipelineEvent::SectionLocated {
                label,
                heading,
                start,
                end,
            } => debug!(
                "Section {} anchored on '{heading}' at {start}..{end}",
                label.as_str()
            ),
            PipelineEvent::SectionMissing { label } => {
                debug!("No heading found for section {}", label.as_str())
            }
            PipelineEvent::FieldAccepted { field } => debug!("Accepted field {}", field.as_str()),
            PipelineEvent::FieldRejected { field, reason } => {
                debug!("Rejected field {}: {reason}", field.as_str())
            }
        }
    }
}

/// Collects events in memory so tests can inspect what a stage reported.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: std::sync::Mutex<Vec<PipelineEvent>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl PipelineObserver for RecordingObserver {
    fn record(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
