// Resume / JD keyword gap analysis.
// Core (normalize → dedup → builder → gap → scoring → summary) is synchronous and pure.
// Extraction goes through the `KeywordExtractor` seam; only `LlmKeywordExtractor` calls the LLM.

pub mod builder;
pub mod dedup;
pub mod error;
pub mod extractor;
pub mod gap;
pub mod handlers;
pub mod keyword;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod scoring;
pub mod summary;
