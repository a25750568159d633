//! Axum route handlers for the Skills API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::skills::experience::ExperienceAnalysis;
use crate::skills::extractor::{ExtractedSkill, SkillSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<ExtractedSkill>,
    pub summary: SkillSummary,
}

/// POST /skills/extract
///
/// Lists the known skills found in a resume (or job description) with their
/// category and inferred experience level.
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    payload: Result<Json<ExtractSkillsRequest>, JsonRejection>,
) -> Result<Json<ExtractSkillsResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let skills = state.skills.extract_skills(&request.text);
    let summary = state.skills.summarize(&skills);
    tracing::debug!(total = summary.total_skills, "Skills extracted");

    Ok(Json(ExtractSkillsResponse { skills, summary }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeExperienceRequest {
    #[serde(default)]
    pub text: String,
    /// Skills the role asks for; empty means every month counts as relevant.
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// POST /skills/experience
///
/// Breaks a resume's work history into roles and projects, with totals,
/// relevant months, career gaps, trajectory and a seniority estimate.
pub async fn handle_analyze_experience(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeExperienceRequest>, JsonRejection>,
) -> Result<Json<ExperienceAnalysis>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let analysis = state
        .experience
        .analyze(&request.text, &request.required_skills);
    tracing::debug!(
        roles = analysis.work_experiences.len(),
        total_months = analysis.total_experience_months,
        "Experience analysed"
    );

    Ok(Json(analysis))
}
