// Profile intake: composes extraction, segmentation, and validation into the
// flow behind the upload and paste endpoints.
// Document decoding is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod demo;
pub mod handlers;
pub mod pipeline;

pub use pipeline::{PipelineOutput, ProfilePipeline};
