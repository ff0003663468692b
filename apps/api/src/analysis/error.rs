//! Error types for keyword gap analysis

use thiserror::Error;

use crate::analysis::extractor::ExtractionError;

/// Failures raised by the analysis core. Nothing in the core swallows these;
/// they propagate to the request boundary and no partial summary is produced.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Validation(String),

    #[error("Keyword extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Score computation failed: {0}")]
    Computation(String),
}
