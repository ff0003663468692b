//! Gap Summary Assembler: combines gap analysis and scoring into the response entity.

use serde::{Deserialize, Serialize};

use crate::analysis::builder::{JdProfile, ResumeProfile};
use crate::analysis::error::AnalysisError;
use crate::analysis::gap::{compute_gap, GapAnalysis, KeywordMatch};
use crate::analysis::keyword::{JdCategory, JdKeyword};
use crate::analysis::scoring::{compute_breakdown, MatchScoreBreakdown, ScoringWeights};

/// Final result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapSummary {
    /// 0..=100
    pub match_score: u8,
    pub keyword_matches: Vec<KeywordMatch>,
    pub missing_keywords: Vec<JdKeyword>,
    pub validated_missing_keywords: Vec<JdKeyword>,
    pub notes: String,
    pub score_breakdown: MatchScoreBreakdown,
}

/// Second pass over the missing keywords, e.g. to drop terms a reviewer already
/// knows the candidate has.
pub trait MissingKeywordFilter: Send + Sync {
    fn filter(&self, missing: &[JdKeyword]) -> Vec<JdKeyword>;
}

/// Identity filter. Used unless another validation pass is wired in.
pub struct PassThrough;

impl MissingKeywordFilter for PassThrough {
    fn filter(&self, missing: &[JdKeyword]) -> Vec<JdKeyword> {
        missing.to_vec()
    }
}

/// Runs gap analysis and scoring over two built profiles.
pub fn summarize(
    jd: &JdProfile,
    resume: &ResumeProfile,
    weights: &ScoringWeights,
    filter: &dyn MissingKeywordFilter,
) -> Result<GapSummary, AnalysisError> {
    let gap = compute_gap(&jd.keywords, resume);
    let breakdown = compute_breakdown(
        &jd.required_keywords_set,
        &jd.preferred_keywords_set,
        &resume.validated_keywords_set,
        weights,
    )?;
    assemble(gap, breakdown, resume.keyword_count(), filter)
}

/// Builds the summary, checking that the score agrees with the match list.
pub fn assemble(
    gap: GapAnalysis,
    breakdown: MatchScoreBreakdown,
    resume_keyword_count: usize,
    filter: &dyn MissingKeywordFilter,
) -> Result<GapSummary, AnalysisError> {
    let matched_in = |category: JdCategory| {
        gap.matches
            .iter()
            .filter(|m| m.keyword_pair.1.category == category)
            .count()
    };
    if matched_in(JdCategory::Required) != breakdown.required_matched
        || matched_in(JdCategory::Preferred) != breakdown.preferred_matched
    {
        return Err(AnalysisError::Computation(format!(
            "score breakdown ({} required, {} preferred matched) disagrees with {} keyword matches",
            breakdown.required_matched,
            breakdown.preferred_matched,
            gap.matches.len()
        )));
    }

    let validated_missing_keywords = filter.filter(&gap.missing);
    let notes = format!(
        "Found {resume_keyword_count} resume keywords. Missing {} JD keywords.",
        gap.missing.len()
    );

    Ok(GapSummary {
        match_score: breakdown.match_score,
        keyword_matches: gap.matches,
        missing_keywords: gap.missing,
        validated_missing_keywords,
        notes,
        score_breakdown: breakdown,
    })
}
