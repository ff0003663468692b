//! Keyword entities shared by the builder, gap analyzer, and summary.

use serde::{Deserialize, Serialize};

use crate::analysis::dedup::Dedupable;

/// Category of a JD keyword. `Context` is the catch-all member for anything that is
/// neither a requirement nor a responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JdCategory {
    Required,
    Preferred,
    Responsibility,
    #[serde(alias = "other")]
    Context,
}

impl JdCategory {
    /// Collision rank used by priority deduplication. Higher wins.
    pub fn rank(self) -> u8 {
        match self {
            JdCategory::Context => 0,
            JdCategory::Preferred => 1,
            JdCategory::Responsibility => 2,
            JdCategory::Required => 3,
        }
    }

    /// Only required and preferred keywords take part in gap and score computation.
    pub fn is_scored(self) -> bool {
        matches!(self, JdCategory::Required | JdCategory::Preferred)
    }

    /// Parses a category tag. `"other"` is accepted as a synonym for `context`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "required" => Some(JdCategory::Required),
            "preferred" => Some(JdCategory::Preferred),
            "responsibility" => Some(JdCategory::Responsibility),
            "context" | "other" => Some(JdCategory::Context),
            _ => None,
        }
    }
}

/// Resume section a keyword was found in, when the extractor reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSection {
    Skills,
    Experience,
    Project,
}

impl ResumeSection {
    /// Lenient parse: section is enrichment data, so unknown labels map to `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "skills" | "skill" | "technical skills" => Some(ResumeSection::Skills),
            "experience" | "work experience" => Some(ResumeSection::Experience),
            "project" | "projects" => Some(ResumeSection::Project),
            _ => None,
        }
    }
}

/// One keyword record as returned by the extraction service, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawKeywordRecord {
    #[serde(default)]
    pub keyword_text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub evidence: Option<String>,
    #[serde(default)]
    pub importance: Option<i64>,
    #[serde(default)]
    pub section: Option<String>,
}

#[cfg(test)]
impl RawKeywordRecord {
    pub fn new(keyword_text: impl Into<String>) -> Self {
        Self {
            keyword_text: keyword_text.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// A validated keyword extracted from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JdKeyword {
    pub keyword_text: String,
    pub category: JdCategory,
    pub evidence: Option<String>,
    /// 1 (low) to 5 (high). Carried for display; scoring ignores it.
    pub importance: Option<u8>,
}

/// A validated keyword extracted from a resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeKeyword {
    pub keyword_text: String,
    pub evidence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<ResumeSection>,
}

impl Dedupable for JdKeyword {
    fn text(&self) -> &str {
        &self.keyword_text
    }

    fn set_text(&mut self, text: String) {
        self.keyword_text = text;
    }

    fn rank(&self) -> u8 {
        self.category.rank()
    }
}

impl Dedupable for ResumeKeyword {
    fn text(&self) -> &str {
        &self.keyword_text
    }

    fn set_text(&mut self, text: String) {
        self.keyword_text = text;
    }
}
