//! Keyword Set Builder: turns raw extraction records into validated, deduplicated
//! JD and resume profiles.
//!
//! JD streams are deduplicated with `PriorityByCategory` so the strongest framing
//! of a term wins across sections; resume streams use `FirstSeen`.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::dedup::{dedupe, DedupPolicy};
use crate::analysis::error::AnalysisError;
use crate::analysis::extractor::ExtractedDocument;
use crate::analysis::keyword::{JdCategory, JdKeyword, RawKeywordRecord, ResumeKeyword, ResumeSection};
use crate::analysis::normalize::{fold_key, normalize};

/// Aliases every analysis starts from. JD extraction may add more.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("cicd", "ci/cd"),
    ("ci cd", "ci/cd"),
    ("k8s", "kubernetes"),
    ("postgres", "postgresql"),
    ("golang", "go"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("nodejs", "node.js"),
    ("sklearn", "scikit-learn"),
];

// ────────────────────────────────────────────────────────────────────────────
// Canonical term map
// ────────────────────────────────────────────────────────────────────────────

/// Alias → canonical term map. Keys and values are stored folded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalMap(BTreeMap<String, String>);

impl CanonicalMap {
    pub fn with_defaults() -> Self {
        let mut map = Self::default();
        map.extend(DEFAULT_ALIASES.iter().map(|(a, c)| (a.to_string(), c.to_string())));
        map
    }

    /// Adds aliases, skipping blank entries and self-mappings.
    pub fn extend<I>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (alias, canonical) in aliases {
            let alias = fold_key(&alias);
            let canonical = fold_key(&canonical);
            if alias.is_empty() || canonical.is_empty() || alias == canonical {
                continue;
            }
            self.0.insert(alias, canonical);
        }
    }

    /// Canonical form of an already-folded keyword, if it is a known alias.
    /// Chained aliases (`ci cd -> cicd -> ci/cd`) are followed to the end; a
    /// cycle resolves to its smallest member.
    pub fn resolve(&self, folded: &str) -> Option<String> {
        let mut path = vec![folded];
        let mut current = folded;
        while let Some(next) = self.0.get(current) {
            let next = next.as_str();
            if let Some(start) = path.iter().position(|seen| *seen == next) {
                current = path[start..].iter().copied().min().unwrap_or(current);
                break;
            }
            path.push(next);
            current = next;
        }
        (current != folded).then(|| current.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profiles
// ────────────────────────────────────────────────────────────────────────────

/// Extraction output for one JD input section, with the category the caller
/// tagged the section with (if any). A section tag overrides record categories.
#[derive(Debug, Clone)]
pub struct JdSection {
    pub category: Option<JdCategory>,
    pub document: ExtractedDocument,
}

/// Everything extracted from a job description for one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct JdProfile {
    pub role_title: Option<String>,
    pub company: Option<String>,
    pub keywords: Vec<JdKeyword>,
    pub required_keywords_set: Vec<String>,
    pub preferred_keywords_set: Vec<String>,
    pub canonical_map: CanonicalMap,
}

/// Everything extracted from a resume for one analysis request.
#[derive(Debug, Clone)]
pub struct ResumeProfile {
    pub keywords: Vec<ResumeKeyword>,
    pub validated_keywords_set: HashSet<String>,
    /// Terms the resume lists in its Skills section.
    pub skills_set: HashSet<String>,
    /// Terms evidenced in Experience or Project entries.
    pub expproj_keywords_set: HashSet<String>,
    pub normalization_map_applied: BTreeMap<String, String>,
    index: HashMap<String, usize>,
}

impl ResumeProfile {
    /// Case-insensitive O(1) lookup of a keyword.
    pub fn get(&self, text: &str) -> Option<&ResumeKeyword> {
        self.index.get(&fold_key(text)).map(|&i| &self.keywords[i])
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

/// Builds the JD profile from every extracted section.
///
/// The canonical map is the default alias table plus whatever aliases the
/// extractor reported for any section; it is applied to every JD keyword and
/// later handed to `build_resume_profile`.
pub fn build_jd_profile(sections: Vec<JdSection>) -> Result<JdProfile, AnalysisError> {
    let mut canonical_map = CanonicalMap::with_defaults();
    for section in &sections {
        canonical_map.extend(section.document.canonical_map.clone());
    }

    let mut role_title = None;
    let mut company = None;
    let mut keywords = Vec::new();

    for section in sections {
        let document = section.document;
        if role_title.is_none() {
            role_title = non_empty(document.role_title.as_deref());
        }
        if company.is_none() {
            company = non_empty(document.company.as_deref());
        }

        for (index, record) in document.keywords.into_iter().enumerate() {
            let category = match section.category {
                Some(tag) => tag,
                None => parse_category(index, record.category.as_deref())?,
            };
            let (text, evidence, importance) = validate_record(index, &record)?;
            keywords.push(JdKeyword {
                keyword_text: canonicalize(&text, &canonical_map).0,
                category,
                evidence,
                importance,
            });
        }
    }

    let keywords = dedupe(keywords, DedupPolicy::PriorityByCategory);
    let texts_for = |category: JdCategory| -> Vec<String> {
        keywords
            .iter()
            .filter(|k| k.category == category)
            .map(|k| k.keyword_text.clone())
            .collect()
    };
    let required_keywords_set = texts_for(JdCategory::Required);
    let preferred_keywords_set = texts_for(JdCategory::Preferred);

    Ok(JdProfile {
        role_title,
        company,
        keywords,
        required_keywords_set,
        preferred_keywords_set,
        canonical_map,
    })
}

/// Builds the resume profile. Record categories are ignored; section labels,
/// when present, feed the skills/experience sets used for match classification.
pub fn build_resume_profile(
    document: ExtractedDocument,
    canonical_map: &CanonicalMap,
) -> Result<ResumeProfile, AnalysisError> {
    let mut skills_set = HashSet::new();
    let mut expproj_keywords_set = HashSet::new();
    let mut normalization_map_applied = BTreeMap::new();
    let mut keywords = Vec::with_capacity(document.keywords.len());

    for (index, record) in document.keywords.into_iter().enumerate() {
        let (text, evidence, _) = validate_record(index, &record)?;
        let (text, alias) = canonicalize(&text, canonical_map);
        if let Some(alias) = alias {
            normalization_map_applied.insert(alias, text.clone());
        }

        let section = record.section.as_deref().and_then(ResumeSection::from_label);
        match section {
            Some(ResumeSection::Skills) => {
                skills_set.insert(text.clone());
            }
            Some(ResumeSection::Experience | ResumeSection::Project) => {
                expproj_keywords_set.insert(text.clone());
            }
            None => {}
        }

        keywords.push(ResumeKeyword {
            keyword_text: text,
            evidence,
            section,
        });
    }

    let keywords = dedupe(keywords, DedupPolicy::FirstSeen);
    let index: HashMap<String, usize> = keywords
        .iter()
        .enumerate()
        .map(|(i, k)| (k.keyword_text.clone(), i))
        .collect();
    let validated_keywords_set = index.keys().cloned().collect();

    Ok(ResumeProfile {
        keywords,
        validated_keywords_set,
        skills_set,
        expproj_keywords_set,
        normalization_map_applied,
        index,
    })
}

/// Normalizes text and evidence and checks the importance range.
fn validate_record(
    index: usize,
    record: &RawKeywordRecord,
) -> Result<(String, Option<String>, Option<u8>), AnalysisError> {
    let text = normalize(&record.keyword_text);
    if text.is_empty() {
        return Err(AnalysisError::Validation(format!(
            "keyword record {index} has an empty keyword_text"
        )));
    }

    let importance = match record.importance {
        None => None,
        Some(v @ 1..=5) => Some(v as u8),
        Some(v) => {
            return Err(AnalysisError::Validation(format!(
                "keyword '{text}' has importance {v}, expected 1-5"
            )))
        }
    };

    Ok((text, non_empty(record.evidence.as_deref()), importance))
}

fn parse_category(index: usize, tag: Option<&str>) -> Result<JdCategory, AnalysisError> {
    match tag.map(str::trim).filter(|t| !t.is_empty()) {
        None => Ok(JdCategory::Context),
        Some(tag) => JdCategory::from_tag(tag).ok_or_else(|| {
            AnalysisError::Validation(format!(
                "keyword record {index} has unrecognized category '{tag}'"
            ))
        }),
    }
}

/// Folds the text and maps it through the alias table.
/// Returns the canonical text and, if a rewrite happened, the alias it replaced.
fn canonicalize(text: &str, canonical_map: &CanonicalMap) -> (String, Option<String>) {
    let folded = fold_key(text);
    match canonical_map.resolve(&folded) {
        Some(canonical) => (canonical, Some(folded)),
        None => (folded, None),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(normalize).filter(|s| !s.is_empty())
}
