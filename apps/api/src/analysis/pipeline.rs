//! Analysis pipeline: extraction fan-out → join → build profiles → gap → score → summary.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;
use tracing::{debug, info, Instrument};

use crate::analysis::builder::{build_jd_profile, build_resume_profile, JdSection};
use crate::analysis::error::AnalysisError;
use crate::analysis::extractor::{ExtractedDocument, ExtractionError, KeywordExtractor};
use crate::analysis::keyword::JdCategory;
use crate::analysis::scoring::ScoringWeights;
use crate::analysis::summary::{summarize, GapSummary, MissingKeywordFilter, PassThrough};

/// One job description section, tagged by the caller with its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdInput {
    pub category: JdCategory,
    pub text: String,
}

enum Extracted {
    Resume(ExtractedDocument),
    Jd(usize, ExtractedDocument),
}

/// Request-scoped analysis. Holds only shared, immutable handles; each call
/// builds its own profiles and shares nothing with concurrent calls.
#[derive(Clone)]
pub struct AnalysisPipeline {
    extractor: Arc<dyn KeywordExtractor>,
    filter: Arc<dyn MissingKeywordFilter>,
    weights: ScoringWeights,
}

impl AnalysisPipeline {
    pub fn new(extractor: Arc<dyn KeywordExtractor>) -> Self {
        Self {
            extractor,
            filter: Arc::new(PassThrough),
            weights: ScoringWeights::default(),
        }
    }

    pub fn extractor_backend(&self) -> &'static str {
        self.extractor.backend()
    }

    /// Runs one full analysis. Any failure aborts the request: outstanding
    /// extraction calls are cancelled and no partial summary is returned.
    pub async fn analyze(
        &self,
        resume_text: &str,
        jd_inputs: &[JdInput],
    ) -> Result<GapSummary, AnalysisError> {
        let (resume_doc, jd_docs) = self.extract_all(resume_text, jd_inputs).await?;

        let sections = jd_inputs
            .iter()
            .zip(jd_docs)
            .map(|(input, document)| JdSection {
                category: Some(input.category),
                document,
            })
            .collect();

        let jd = build_jd_profile(sections)?;
        let resume = build_resume_profile(resume_doc, &jd.canonical_map)?;
        debug!(
            role_title = ?jd.role_title,
            company = ?jd.company,
            jd_keywords = jd.keywords.len(),
            resume_keywords = resume.keyword_count(),
            aliases_applied = resume.normalization_map_applied.len(),
            "profiles built"
        );

        let summary = summarize(&jd, &resume, &self.weights, self.filter.as_ref())?;
        info!(
            match_score = summary.match_score,
            matched = summary.keyword_matches.len(),
            missing = summary.missing_keywords.len(),
            "analysis complete"
        );
        Ok(summary)
    }

    /// Runs the resume extraction and every JD section extraction concurrently
    /// and waits for all of them. Results come back in input order.
    async fn extract_all(
        &self,
        resume_text: &str,
        jd_inputs: &[JdInput],
    ) -> Result<(ExtractedDocument, Vec<ExtractedDocument>), AnalysisError> {
        let mut tasks = JoinSet::new();

        let extractor = Arc::clone(&self.extractor);
        let text = resume_text.to_string();
        tasks.spawn(
            async move {
                extractor
                    .extract_resume_keywords(&text)
                    .await
                    .map(Extracted::Resume)
            }
            .in_current_span(),
        );

        for (index, input) in jd_inputs.iter().enumerate() {
            let extractor = Arc::clone(&self.extractor);
            let text = input.text.clone();
            tasks.spawn(
                async move {
                    extractor
                        .extract_jd_keywords(&text)
                        .await
                        .map(|doc| Extracted::Jd(index, doc))
                }
                .in_current_span(),
            );
        }

        let mut resume_doc = None;
        let mut jd_docs: Vec<Option<ExtractedDocument>> = vec![None; jd_inputs.len()];

        // Returning early drops the JoinSet, which aborts the remaining calls.
        while let Some(joined) = tasks.join_next().await {
            let extracted = joined.map_err(|e| ExtractionError::TaskFailed(e.to_string()))??;
            match extracted {
                Extracted::Resume(doc) => resume_doc = Some(doc),
                Extracted::Jd(index, doc) => {
                    debug!(section = index, keywords = doc.keywords.len(), "JD section extracted");
                    jd_docs[index] = Some(doc);
                }
            }
        }

        let resume_doc = resume_doc.ok_or_else(|| {
            ExtractionError::TaskFailed("resume extraction produced no result".to_string())
        })?;
        let jd_docs = jd_docs
            .into_iter()
            .enumerate()
            .map(|(index, doc)| {
                doc.ok_or_else(|| {
                    ExtractionError::TaskFailed(format!("JD section {index} produced no result"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((resume_doc, jd_docs))
    }
}
