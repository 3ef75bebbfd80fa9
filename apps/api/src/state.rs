use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::observer::{PipelineObserver, TracingObserver};
use crate::profile::ProfilePipeline;
use crate::segmentation::Segmenter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Stateless; shared with blocking extraction workers.
    pub pipeline: Arc<ProfilePipeline>,
    /// Receives pipeline diagnostics. Default: TracingObserver.
    pub observer: Arc<dyn PipelineObserver>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let pipeline = ProfilePipeline::new(
            TextExtractor::default(),
            Segmenter::new(config.section_anchor),
        );
        Self {
            config,
            pipeline: Arc::new(pipeline),
            observer: Arc::new(TracingObserver),
        }
    }
}
