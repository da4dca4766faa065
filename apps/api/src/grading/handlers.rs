//! Axum route handlers for the Grading API. No auth, no LLM.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::grading::engine::{compute_grade, GradingReport};
use crate::grading::extract::{detect_career, extract_skills};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    pub career: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: Vec<String>,
    pub career: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CareersResponse {
    pub careers: Vec<String>,
}

/// GET /api/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<CareersResponse> {
    Json(CareersResponse {
        careers: state.careers.names().map(str::to_string).collect(),
    })
}

/// POST /api/grade
///
/// Unknown careers and empty skill lists grade as 0% / F rather than failing.
pub async fn handle_grade(
    State(state): State<AppState>,
    Json(request): Json<GradeRequest>,
) -> Json<GradingReport> {
    Json(compute_grade(&state.careers, &request.skills, &request.career))
}

/// POST /api/skills/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    Ok(Json(ExtractResponse {
        skills: extract_skills(&request.text, &state.careers),
        career: detect_career(&request.text, &state.careers),
    }))
}
