use serde::{Deserialize, Serialize};

use crate::analysis::builder::ResumeProfile;
use crate::analysis::keyword::{JdKeyword, ResumeKeyword};
use crate::analysis::normalize::fold_key;

/// How well the resume evidences a matched JD keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Found in experience/project entries, or no section data was available.
    Strong,
    /// Listed in the skills section only.
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword_pair: (ResumeKeyword, JdKeyword),
    pub match_type: MatchType,
}

/// Result of comparing the JD's scored keywords against the resume.
/// Every required/preferred JD keyword lands in exactly one of the two lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapAnalysis {
    pub matches: Vec<KeywordMatch>,
    pub missing: Vec<JdKeyword>,
}

/// Classifies each required/preferred JD keyword as matched or missing.
///
/// Responsibility and context keywords are skipped. Lookups go through the
/// resume profile's prebuilt index, so the cost is linear in keyword count.
pub fn compute_gap(jd_keywords: &[JdKeyword], resume: &ResumeProfile) -> GapAnalysis {
    let mut gap = GapAnalysis::default();

    for jd_keyword in jd_keywords.iter().filter(|k| k.category.is_scored()) {
        match resume.get(&jd_keyword.keyword_text) {
            Some(resume_keyword) => gap.matches.push(KeywordMatch {
                keyword_pair: (resume_keyword.clone(), jd_keyword.clone()),
                match_type: classify(resume, &jd_keyword.keyword_text),
            }),
            None => gap.missing.push(jd_keyword.clone()),
        }
    }

    gap
}

fn classify(resume: &ResumeProfile, text: &str) -> MatchType {
    let key = fold_key(text);
    if resume.expproj_keywords_set.contains(&key) {
        MatchType::Strong
    } else if resume.skills_set.contains(&key) {
        MatchType::Partial
    } else {
        MatchType::Strong
    }
}
