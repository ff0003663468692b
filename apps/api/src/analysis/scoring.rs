use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::error::AnalysisError;
use crate::analysis::normalize::fold_key;

/// Axis weights for the match score. Must be finite, non-negative, and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub required: f64,
    pub preferred: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            required: 0.7,
            preferred: 0.3,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        let valid = |w: f64| w.is_finite() && w >= 0.0;
        if !valid(self.required) || !valid(self.preferred) {
            return Err(AnalysisError::Computation(format!(
                "weights must be finite and non-negative, got {self:?}"
            )));
        }
        if ((self.required + self.preferred) - 1.0).abs() > 1e-9 {
            return Err(AnalysisError::Computation(format!(
                "weights must sum to 1.0, got {}",
                self.required + self.preferred
            )));
        }
        Ok(())
    }
}

/// How the match score was derived. `match_score` is never set independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScoreBreakdown {
    pub required_total: usize,
    pub required_matched: usize,
    pub preferred_total: usize,
    pub preferred_matched: usize,
    pub required_score: f64,
    pub preferred_score: f64,
    /// (required_score + preferred_score) * 100, rounded to one decimal.
    pub percentage: f64,
    pub match_score: u8,
}

/// Weighted-coverage score over the JD's required and preferred keyword sets.
///
/// Each axis contributes `matched / total * weight`. An axis with no keywords
/// contributes its full weight, so a JD that lists no preferred skills does not
/// cap the score at 70.
pub fn compute_breakdown(
    jd_required: &[String],
    jd_preferred: &[String],
    resume_set: &HashSet<String>,
    weights: &ScoringWeights,
) -> Result<MatchScoreBreakdown, AnalysisError> {
    weights.validate()?;

    let count_matched = |keywords: &[String]| {
        keywords
            .iter()
            .filter(|k| resume_set.contains(&fold_key(k)))
            .count()
    };

    let required_matched = count_matched(jd_required);
    let preferred_matched = count_matched(jd_preferred);

    let required_score = axis_score(required_matched, jd_required.len(), weights.required);
    let preferred_score = axis_score(preferred_matched, jd_preferred.len(), weights.preferred);

    let percentage = round_one_decimal((required_score + preferred_score) * 100.0);

    Ok(MatchScoreBreakdown {
        required_total: jd_required.len(),
        required_matched,
        preferred_total: jd_preferred.len(),
        preferred_matched,
        required_score,
        preferred_score,
        percentage,
        match_score: to_match_score(percentage),
    })
}

/// Match score with the default 0.7 / 0.3 weights.
#[allow(dead_code)]
pub fn compute_score(
    jd_required: &[String],
    jd_preferred: &[String],
    resume_set: &HashSet<String>,
) -> Result<u8, AnalysisError> {
    compute_breakdown(jd_required, jd_preferred, resume_set, &ScoringWeights::default())
        .map(|b| b.match_score)
}

fn axis_score(matched: usize, total: usize, weight: f64) -> f64 {
    if total == 0 {
        weight
    } else {
        matched as f64 / total as f64 * weight
    }
}

/// Half-up at one decimal. Absorbs float noise such as 34.99999999.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Integer coercion of the one-decimal percentage: half-to-even, clamped to 0..=100.
fn to_match_score(percentage: f64) -> u8 {
    if !percentage.is_finite() {
        return 0;
    }
    percentage.round_ties_even().clamp(0.0, 100.0) as u8
}
