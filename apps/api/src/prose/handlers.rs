//! Axum route handlers for the Prose API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::prose::parser::{parse_generated_output, parse_tips, GeneratedOutput};
use crate::prose::ProseSections;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseProseRequest {
    pub raw_text: String,
    /// Separate tips response, when the generator was asked for tips.
    #[serde(default)]
    pub tips_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ParseProseResponse {
    pub output: GeneratedOutput,
    /// The same text keyed by section, ready to pass as `prose` to a render call.
    pub sections: ProseSections,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/prose/parse
///
/// Splits raw generator output into summary, resume, and cover letter sections
/// with markdown stripped.
pub async fn handle_parse_prose(
    Json(request): Json<ParseProseRequest>,
) -> Result<Json<ParseProseResponse>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    let output = parse_generated_output(&request.raw_text);
    let tips = request
        .tips_text
        .as_deref()
        .map(parse_tips)
        .unwrap_or_default();
    let sections = output.clone().into_sections(tips);

    Ok(Json(ParseProseResponse { output, sections }))
}
