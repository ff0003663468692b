//! Keyword extraction seam: pluggable, trait-based access to the extraction service.
//!
//! Default: `LlmKeywordExtractor` (Claude via `LlmClient`).
//! `AppState` holds an `Arc<dyn KeywordExtractor>`, so tests and alternative
//! backends swap in without touching the pipeline or handlers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::keyword::RawKeywordRecord;
use crate::analysis::prompts::{
    JD_EXTRACT_PROMPT_TEMPLATE, JD_EXTRACT_SYSTEM, RESUME_EXTRACT_PROMPT_TEMPLATE,
    RESUME_EXTRACT_SYSTEM,
};
use crate::llm_client::prompts::{json_system, render};
use crate::llm_client::{LlmClient, LlmError};

/// Raw output of one extraction call. Alternate field shapes produced by a
/// backend must be translated into this shape by that backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub keywords: Vec<RawKeywordRecord>,
    #[serde(default)]
    pub canonical_map: BTreeMap<String, String>,
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("LLM call failed: {0}")]
    Llm(LlmError),

    #[error("malformed extraction output: {0}")]
    Malformed(String),

    #[error("extraction task failed: {0}")]
    TaskFailed(String),
}

impl From<LlmError> for ExtractionError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => ExtractionError::Malformed(e.to_string()),
            LlmError::EmptyContent => ExtractionError::Malformed("empty model output".to_string()),
            other => ExtractionError::Llm(other),
        }
    }
}

/// The extraction service contract. Each call is independent and side-effect
/// free, so callers may run several concurrently.
#[async_trait]
pub trait KeywordExtractor: Send + Sync {
    async fn extract_jd_keywords(&self, text: &str) -> Result<ExtractedDocument, ExtractionError>;

    async fn extract_resume_keywords(&self, text: &str)
        -> Result<ExtractedDocument, ExtractionError>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Extraction through Claude. No retries beyond the client's own backoff.
pub struct LlmKeywordExtractor(pub LlmClient);

#[async_trait]
impl KeywordExtractor for LlmKeywordExtractor {
    async fn extract_jd_keywords(&self, text: &str) -> Result<ExtractedDocument, ExtractionError> {
        let prompt = render(JD_EXTRACT_PROMPT_TEMPLATE, &[("jd_text", text)]);
        let system = json_system(JD_EXTRACT_SYSTEM);
        Ok(self.0.call_json::<ExtractedDocument>(&prompt, &system).await?)
    }

    async fn extract_resume_keywords(
        &self,
        text: &str,
    ) -> Result<ExtractedDocument, ExtractionError> {
        let prompt = render(RESUME_EXTRACT_PROMPT_TEMPLATE, &[("resume_text", text)]);
        let system = json_system(RESUME_EXTRACT_SYSTEM);
        Ok(self.0.call_json::<ExtractedDocument>(&prompt, &system).await?)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}
