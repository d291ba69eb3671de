//! Shared state for the underwriting API.

use std::sync::Arc;

use crate::pipeline::UnderwritingPipeline;

/// Shared application state.
///
/// Holds the pipeline every handler delegates to. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<UnderwritingPipeline>,
}

impl AppState {
    /// Creates application state around a pipeline.
    pub fn new(pipeline: UnderwritingPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Returns the underwriting pipeline.
    pub fn pipeline(&self) -> &UnderwritingPipeline {
        &self.pipeline
    }
}
