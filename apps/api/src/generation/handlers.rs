//! Axum route handlers for the Generation API.

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::analysis::analyze_job_description;
use crate::generation::generator::{generate_tailored_resume, GenerationOptions};
use crate::generation::labels::extract_job_labels;
use crate::generation::story::{generate_story_content, StoryOptions};
use crate::models::{HistoryEntry, JobAnalysis, StoryContent, TailoredResume};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub profile_name: String,
    pub job_description: String,
    #[serde(default)]
    pub extra_knowledge: Option<String>,
    #[serde(default)]
    pub experience_bullet_counts: HashMap<usize, u8>,
    /// Overrides the advisory label guessed from the job description.
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume: TailoredResume,
    /// `None` when the history write failed; the resume is still returned.
    pub history_id: Option<Uuid>,
    pub job_title: String,
    pub company: String,
}

#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    pub profile_name: String,
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub include_why: bool,
    #[serde(default)]
    pub include_cover_letter: bool,
    #[serde(default)]
    pub extra_knowledge: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/analyze
///
/// Runs step 1 alone, for previewing what the model extracts.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    let analysis =
        analyze_job_description(state.generator.as_ref(), &request.job_description).await?;
    Ok(Json(analysis))
}

/// POST /api/v1/resumes/generate
///
/// Full pipeline, then a history append labelled with the caller's title and
/// company or, failing that, the advisory guesses.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    let options = GenerationOptions {
        extra_knowledge: request.extra_knowledge,
        experience_bullet_counts: request.experience_bullet_counts,
    };
    options.validate()?;
    let profile = state.profiles.load(&request.profile_name).await?;

    let resume = generate_tailored_resume(
        state.generator.as_ref(),
        &profile,
        &request.job_description,
        &options,
    )
    .await?;

    let guessed = extract_job_labels(&request.job_description);
    let job_title = non_blank(request.job_title).unwrap_or(guessed.job_title);
    let company = non_blank(request.company).unwrap_or(guessed.company);

    let entry = HistoryEntry::new(
        resume.clone(),
        request.job_description,
        Some(job_title),
        Some(company),
    );
    let (job_title, company, id) = (entry.job_title.clone(), entry.company.clone(), entry.id);

    let history_id = match state.history.append(entry).await {
        Ok(()) => {
            info!("Saved generation '{job_title}' ({company}) to history");
            Some(id)
        }
        Err(e) => {
            error!("Generated resume was not saved to history: {e}");
            None
        }
    };

    Ok(Json(GenerateResponse {
        resume,
        history_id,
        job_title,
        company,
    }))
}

/// POST /api/v1/resumes/story
pub async fn handle_story(
    State(state): State<AppState>,
    Json(request): Json<StoryRequest>,
) -> Result<Json<StoryContent>, AppError> {
    let options = StoryOptions {
        include_why: request.include_why,
        include_cover_letter: request.include_cover_letter,
        extra_knowledge: request.extra_knowledge,
    };
    let profile = state.profiles.load(&request.profile_name).await?;
    let story = generate_story_content(
        state.generator.as_ref(),
        &profile,
        &request.job_description,
        &options,
    )
    .await?;
    Ok(Json(story))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
