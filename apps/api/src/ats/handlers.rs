//! Axum route handlers for the ATS API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ats::advisory::AdvisoryBlender;
use crate::ats::engine::{
    build_suggestions, AtsEngine, Evaluation, LOW_INFORMATION_MESSAGE, LOW_INFORMATION_SCORE,
    LOW_INFORMATION_SUGGESTIONS,
};
use crate::ats::job_source::{
    resolve_job_text, ContainerText, ResolvedJobText, DEFAULT_SELECTORS, MIN_PLAUSIBLE_CHARS,
};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AtsCheckRequest {
    pub resume: Option<String>,
    pub job: Option<String>,
}

impl AtsCheckRequest {
    /// Both texts must be present and non-empty.
    fn texts(&self) -> Result<(&str, &str), AppError> {
        match (self.resume.as_deref(), self.job.as_deref()) {
            (Some(resume), Some(job)) if !resume.is_empty() && !job.is_empty() => Ok((resume, job)),
            _ => Err(AppError::Validation(
                "Resume and job description are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtsCheckResponse {
    pub score: u32,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResolveJobTextRequest {
    #[serde(default)]
    pub containers: Vec<ContainerText>,
    #[serde(default)]
    pub page_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic scoring followed by the advisory blend. Infallible: the only
/// caller-visible failure is input validation, which happens before this.
pub async fn run_ats_check(
    engine: &AtsEngine,
    advisory: &AdvisoryBlender,
    resume: &str,
    job: &str,
) -> AtsCheckResponse {
    match engine.evaluate(resume, job) {
        Evaluation::LowInformation => AtsCheckResponse {
            score: LOW_INFORMATION_SCORE,
            missing_skills: vec![LOW_INFORMATION_MESSAGE.to_string()],
            suggestions: LOW_INFORMATION_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        },
        Evaluation::Scored {
            result,
            normalized_resume,
            cleaned_job,
        } => {
            let blended = advisory
                .blend(result.score, &normalized_resume, &cleaned_job)
                .await;
            let suggestions = build_suggestions(&result.missing);
            AtsCheckResponse {
                score: blended.score,
                missing_skills: result.missing.into_vec(),
                suggestions,
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /ats-check
/// POST /api/v1/ats/check
///
/// Scores a resume against a job description.
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Json(request): Json<AtsCheckRequest>,
) -> Result<Json<AtsCheckResponse>, AppError> {
    let (resume, job) = request.texts()?;
    let response = run_ats_check(&state.engine, &state.advisory, resume, job).await;
    Ok(Json(response))
}

/// POST /api/v1/job-text/resolve
///
/// Picks the job description out of texts captured from a posting page.
pub async fn handle_resolve_job_text(
    Json(request): Json<ResolveJobTextRequest>,
) -> Result<Json<ResolvedJobText>, AppError> {
    resolve_job_text(&request.containers, &request.page_text)
        .map(Json)
        .ok_or_else(|| {
            AppError::Validation("Could not read job description from this page".to_string())
        })
}

/// GET /api/v1/job-text/selectors
pub async fn handle_job_text_selectors() -> Json<Value> {
    Json(json!({
        "selectors": DEFAULT_SELECTORS,
        "min_chars": MIN_PLAUSIBLE_CHARS,
    }))
}
