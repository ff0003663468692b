// Prompt constants for keyword extraction.
// System prompts are combined with `llm_client::prompts::JSON_ONLY_INSTRUCTION` at call time.

/// System prompt for JD keyword extraction. Recall matters more than precision here:
/// a keyword missed on the JD side can never show up as a gap.
pub const JD_EXTRACT_SYSTEM: &str = "You are a job description analyst. \
    Extract every concrete technical keyword from the job description text you are given: \
    programming languages, frameworks, libraries, tools, cloud platforms, databases, \
    methodologies such as ci/cd or tdd, protocols, and named technologies. \
    Never extract soft skills, degrees or education requirements, work authorization terms, \
    company names, generic verbs, operating systems, or broad fields such as 'machine learning' \
    when a specific tool is named instead.";

/// JD extraction prompt. Replace `{jd_text}` before sending.
pub const JD_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract technical keywords from this job description text.

Return a JSON object with this EXACT schema (no extra fields):
{
  "role_title": "Backend Engineer",
  "company": "Acme",
  "keywords": [
    {
      "keyword_text": "python",
      "category": "required",
      "evidence": "Required: 3+ years Python",
      "importance": 5
    }
  ],
  "canonical_map": {"k8s": "kubernetes"}
}

Rules:
- keyword_text: lowercase, the standard name of the technology ("postgresql", "scikit-learn", "c++")
- category: one of "required", "preferred", "responsibility", "context"
- evidence: the exact sentence or phrase the keyword came from
- importance: optional integer 1-5, only for required or preferred keywords
- canonical_map: abbreviations or alternate spellings found in the text, mapped to keyword_text
- role_title and company: null when not stated

Job description text:
{jd_text}"#;

/// System prompt for resume keyword extraction. Conservative: only terms the
/// resume clearly claims.
pub const RESUME_EXTRACT_SYSTEM: &str = "You are a resume analyst. \
    Extract only concrete technical keywords the candidate clearly claims: \
    programming languages, frameworks, libraries, tools, cloud services, databases, \
    and named technologies. Include every item of a skills list. \
    Never extract soft skills, job titles, company or school names, degrees, generic verbs, \
    operating systems, or broad fields.";

/// Resume extraction prompt. Replace `{resume_text}` before sending.
pub const RESUME_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract technical keywords from this resume.

Return a JSON object with this EXACT schema (no extra fields):
{
  "keywords": [
    {
      "keyword_text": "fastapi",
      "evidence": "Developed REST APIs using FastAPI and PostgreSQL",
      "section": "experience"
    }
  ]
}

Rules:
- keyword_text: lowercase, the standard name of the technology
- evidence: the exact line the keyword came from
- section: where it appears, one of "skills", "experience", "project"
- emit a separate entry for each section a keyword appears in

Resume:
{resume_text}"#;
