//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::{evaluate, evaluate_profile, Evaluation};
use crate::errors::AppError;
use crate::models::ResumeProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
    /// Generated tip lines, merged into the ranked tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateProfileRequest {
    pub profile: ResumeProfile,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluate
///
/// Scores free-form resume text, optionally against a job description. Tip lines
/// from the prose parser can ride along and are ranked with the computed ones.
/// Empty resume text is not an error: it scores low and says why.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<Evaluation>, AppError> {
    let config = state.config.analysis;
    let evaluation = tokio::task::spawn_blocking(move || {
        let mut evaluation =
            evaluate(&request.resume_text, request.job_description.as_deref(), &config);
        evaluation.gaps.merge_generated_tips(&request.tips);
        evaluation
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in evaluate: {e}")))?;

    Ok(Json(evaluation))
}

/// POST /api/v1/evaluate/profile
///
/// Scores a structured profile through its combined text.
pub async fn handle_evaluate_profile(
    State(state): State<AppState>,
    Json(request): Json<EvaluateProfileRequest>,
) -> Result<Json<Evaluation>, AppError> {
    let config = state.config.analysis;
    let evaluation = tokio::task::spawn_blocking(move || {
        evaluate_profile(&request.profile, request.job_description.as_deref(), &config).map(
            |mut evaluation| {
                evaluation.gaps.merge_generated_tips(&request.tips);
                evaluation
            },
        )
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in evaluate_profile: {e}"))
    })??;

    Ok(Json(evaluation))
}
