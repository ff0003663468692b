//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::pipeline::JdInput;
use crate::analysis::summary::GapSummary;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub jd_inputs: Vec<JdInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub gap_summary: GapSummary,
}

impl AnalyzeRequest {
    fn validate(&self, min_resume_chars: usize) -> Result<(), AppError> {
        let resume_chars = self.resume_text.trim().chars().count();
        if resume_chars < min_resume_chars {
            return Err(AppError::Validation(format!(
                "resume_text must be at least {min_resume_chars} characters, got {resume_chars}"
            )));
        }
        if self.jd_inputs.is_empty() {
            return Err(AppError::Validation(
                "jd_inputs must contain at least one section".to_string(),
            ));
        }
        if let Some(index) = self.jd_inputs.iter().position(|i| i.text.trim().is_empty()) {
            return Err(AppError::Validation(format!(
                "jd_inputs[{index}].text cannot be empty"
            )));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze (alias: POST /run)
///
/// Extracts keywords from the resume and every JD section, then returns the
/// gap summary. All-or-nothing: any failure yields an error response.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    request.validate(state.config.min_resume_chars)?;

    let analysis_id = Uuid::new_v4();
    let span = info_span!(
        "analysis",
        %analysis_id,
        backend = state.pipeline.extractor_backend(),
        jd_sections = request.jd_inputs.len()
    );

    let gap_summary = async {
        info!("analysis started");
        state
            .pipeline
            .analyze(&request.resume_text, &request.jd_inputs)
            .await
    }
    .instrument(span)
    .await?;

    Ok(Json(AnalyzeResponse { gap_summary }))
}
