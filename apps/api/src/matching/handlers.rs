//! Axum route handlers for the matching API.

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::matching::agent::{FailureKind, Report, UserProfile};
use crate::matching::recommender::LearningResource;
use crate::matching::resume::{allowed_file, extract_text};
use crate::state::AppState;

const RESUME_GOAL: &str = "general career path";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `null` and a missing field are both treated as "no skills".
#[derive(Debug, Deserialize)]
pub struct FindJobsRequest {
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct LearningResourcesRequest {
    #[serde(default)]
    pub skill: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LearningResourcesResponse {
    pub status: &'static str,
    pub resources: Vec<LearningResource>,
    pub report: String,
}

#[derive(Debug, Serialize)]
pub struct ReloadCatalogResponse {
    pub status: &'static str,
    pub jobs: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/find_jobs
///
/// Runs the full matching workflow for an explicit skill list.
pub async fn handle_find_jobs(
    State(state): State<AppState>,
    payload: Result<Json<FindJobsRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let profile = UserProfile {
        skills: request.skills.unwrap_or_default(),
        goal: None,
    };

    let report = state
        .agent
        .run_workflow(&profile, &*state.catalog)
        .await;

    Ok(report_response(report))
}

/// POST /api/analyze_skills
///
/// Accepts a multipart `resume` upload, extracts its skills, and runs the
/// same workflow as `find_jobs`.
pub async fn handle_analyze_skills(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() == Some("resume") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(multipart_error)?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No resume file provided.".to_string()))?;

    if filename.is_empty() {
        return Err(AppError::Validation("No file selected.".to_string()));
    }
    if !allowed_file(&filename) {
        return Err(AppError::Validation("File type not allowed.".to_string()));
    }

    let text = extract_text(&filename, data).await?;
    let skills = state.vocabulary.extract(&text);
    info!("Extracted {} skills from resume '{}'", skills.len(), filename);

    if skills.is_empty() {
        return Err(AppError::Validation(
            "No recognizable skills were found in the resume.".to_string(),
        ));
    }

    let profile = UserProfile {
        skills,
        goal: Some(RESUME_GOAL.to_string()),
    };

    let report = state
        .agent
        .run_workflow(&profile, &*state.catalog)
        .await;

    Ok(report_response(report))
}

/// POST /api/learning_resources
///
/// Lists the generic resources for one named skill. Does not run the
/// matching workflow.
pub async fn handle_learning_resources(
    State(state): State<AppState>,
    payload: Result<Json<LearningResourcesRequest>, JsonRejection>,
) -> Result<Json<LearningResourcesResponse>, AppError> {
    let Json(request) = payload?;
    let skill = request.skill.as_deref().unwrap_or_default().trim();
    if skill.is_empty() {
        return Err(AppError::Validation(
            "Please provide a skill to search for.".to_string(),
        ));
    }

    let resources = state.recommender.resources_for(skill).await?;

    Ok(Json(LearningResourcesResponse {
        status: "Success",
        resources,
        report: String::new(),
    }))
}

/// POST /api/catalog/reload
///
/// Re-reads the catalog file. A failed reload keeps the current catalog.
pub async fn handle_reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<ReloadCatalogResponse>, AppError> {
    info!(
        "Catalog reload requested for {}",
        state.catalog.path().display()
    );
    let jobs = state.catalog.reload().await?;
    Ok(Json(ReloadCatalogResponse {
        status: "Success",
        jobs,
    }))
}

/// Oversized uploads surface as 413; anything else is a malformed body.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("The resume file is too large.".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// Maps a workflow report onto an HTTP response: user errors are 400,
/// unexpected faults 500, everything else 200.
fn report_response(report: Report) -> Response {
    let status = match report.failure {
        Some(FailureKind::UserInput) => StatusCode::BAD_REQUEST,
        Some(FailureKind::Unexpected) => StatusCode::INTERNAL_SERVER_ERROR,
        None => StatusCode::OK,
    };

    if report.failure.is_some() {
        let message = report.report.unwrap_or_default();
        return crate::errors::error_response(status, message);
    }

    (status, Json(report)).into_response()
}
