use crate::analysis::pipeline::AnalysisPipeline;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    /// Analysis entry point. Carries the extraction handle explicitly; swap the
    /// extractor by constructing the pipeline with a different backend.
    pub pipeline: AnalysisPipeline,
    pub config: Config,
}
