//! Axum route handlers for the Render API.

use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::analysis::evaluate_profile;
use crate::errors::AppError;
use crate::layout::{
    render, render_bio, render_cover_letter, to_pdf, DocumentKind, RenderedDocument, TemplateSpec,
};
use crate::models::ResumeProfile;
use crate::prose::{fetch_with_timeout, ProseOutcome, ProseSection, ProseSections};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub profile: ResumeProfile,
    /// Template name. Falls back to the configured default.
    #[serde(default)]
    pub template: Option<String>,
    /// Prose supplied by the caller. When absent, the configured prose source is asked.
    #[serde(default)]
    pub prose: Option<ProseSections>,
    /// Adds a strength-score footer to the resume.
    #[serde(default)]
    pub include_score: bool,
    #[serde(default)]
    pub job_description: Option<String>,
}

enum Rendered {
    Json(RenderedDocument),
    Pdf { filename: String, pages: usize, bytes: Vec<u8> },
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        match self {
            Rendered::Json(document) => Json(document).into_response(),
            Rendered::Pdf {
                filename,
                pages,
                bytes,
            } => (
                [
                    (header::CONTENT_TYPE, "application/pdf".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                    (header::HeaderName::from_static("x-page-count"), pages.to_string()),
                ],
                Bytes::from(bytes),
            )
                .into_response(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/render/resume?format=json|pdf
///
/// Lays the profile out in the chosen template. A failed prose source does not fail
/// the render: the summary falls back to the profile's own and the gap is reported
/// in `warnings` and `absent_sections`.
pub async fn handle_render_resume(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    request.profile.validate()?;
    let template = resolve_template(&state, request.template.as_deref())?;
    let outcome = gather_prose(&state, &request.profile, request.prose.clone()).await;

    let analysis = state.config.analysis;
    let RenderRequest {
        profile,
        include_score,
        job_description,
        ..
    } = request;
    let prose_error = outcome.error.clone();
    let sections = outcome.sections;

    run_render(query.format, move || {
        let score = if include_score {
            Some(evaluate_profile(&profile, job_description.as_deref(), &analysis)?.score)
        } else {
            None
        };
        let mut document = render(&profile, &sections, template, score.as_ref())?;
        if let Some(e) = prose_error {
            document
                .warnings
                .push(format!("generated prose unavailable: {e}"));
        }
        Ok(document)
    })
    .await
}

/// POST /api/v1/render/cover-letter?format=json|pdf
///
/// Renders the cover letter as its own document. Without cover letter text this is
/// a content error, or a dependency error when the prose source failed.
pub async fn handle_render_cover_letter(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    request.profile.validate()?;
    let template = resolve_template(&state, request.template.as_deref())?;
    let mut outcome = gather_prose(&state, &request.profile, request.prose.clone()).await;
    let body = outcome.require(ProseSection::CoverLetter)?;

    let profile = request.profile;
    run_render(query.format, move || render_cover_letter(&profile, &body, template)).await
}

/// POST /api/v1/render/bio?format=json|pdf
///
/// Renders the LinkedIn bio as its own document. Over-long bios still render and
/// carry a warning.
pub async fn handle_render_bio(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    request.profile.validate()?;
    let template = resolve_template(&state, request.template.as_deref())?;
    let mut outcome = gather_prose(&state, &request.profile, request.prose.clone()).await;
    let bio = outcome.require(ProseSection::LinkedinBio)?;

    let profile = request.profile;
    run_render(query.format, move || render_bio(&profile, &bio, template)).await
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn resolve_template(state: &AppState, requested: Option<&str>) -> Result<TemplateSpec, AppError> {
    match requested.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name
            .parse::<TemplateSpec>()
            .map_err(|message| AppError::input("template", message)),
        None => Ok(state.config.default_template),
    }
}

/// Caller-supplied prose wins. Otherwise the prose source is asked, bounded by the
/// configured timeout.
async fn gather_prose(
    state: &AppState,
    profile: &ResumeProfile,
    supplied: Option<ProseSections>,
) -> ProseOutcome {
    match supplied {
        Some(sections) => ProseOutcome::from_sections(sections),
        None => {
            let timeout = Duration::from_millis(state.config.prose_timeout_ms);
            fetch_with_timeout(state.prose.as_ref(), profile, timeout).await
        }
    }
}

/// Builds the document, and its PDF when asked for, on the blocking pool.
async fn run_render<F>(format: OutputFormat, build: F) -> Result<Response, AppError>
where
    F: FnOnce() -> Result<RenderedDocument, AppError> + Send + 'static,
{
    let rendered = tokio::task::spawn_blocking(move || -> Result<Rendered, AppError> {
        let document = build()?;
        match format {
            OutputFormat::Json => Ok(Rendered::Json(document)),
            OutputFormat::Pdf => {
                let bytes = to_pdf(&document)?;
                info!(
                    kind = ?document.kind,
                    pages = document.page_count(),
                    bytes = bytes.len(),
                    "Serialized PDF"
                );
                Ok(Rendered::Pdf {
                    filename: file_name(&document),
                    pages: document.page_count(),
                    bytes,
                })
            }
        }
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    Ok(rendered.into_response())
}

/// `jane-doe-cover-letter.pdf`. Non-ASCII characters are dropped.
fn file_name(document: &RenderedDocument) -> String {
    let author: String = document
        .author
        .chars()
        .filter_map(|c| {
            if c.is_ascii_alphanumeric() {
                Some(c.to_ascii_lowercase())
            } else if c.is_ascii() {
                Some('-')
            } else {
                None
            }
        })
        .collect();
    let mut parts: Vec<&str> = author.split('-').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        parts.push("document");
    }
    let kind = match document.kind {
        DocumentKind::Resume => "resume",
        DocumentKind::CoverLetter => "cover-letter",
        DocumentKind::Bio => "bio",
    };
    format!("{}-{kind}.pdf", parts.join("-"))
}
