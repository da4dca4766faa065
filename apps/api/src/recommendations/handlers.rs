//! Axum route handler for AI recommendations.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::grading::engine::{compute_grade, GradingReport};
use crate::recommendations::Recommendations;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub career: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Model output merged with the deterministic grading report.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub recommendations: Recommendations,
    pub grading: GradingReport,
}

/// POST /api/generate-recommendations
pub async fn handle_generate_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    if request.career.trim().is_empty() || request.skills.is_empty() {
        return Err(AppError::Validation(
            "Career and skills are required".to_string(),
        ));
    }

    let recommender = state
        .recommender
        .as_ref()
        .ok_or_else(|| AppError::LlmUnavailable("OpenAI API key not configured".to_string()))?;

    let grading = compute_grade(&state.careers, &request.skills, &request.career);
    let recommendations = recommender
        .recommend(&request.career, &request.skills)
        .await?;

    info!(
        "Generated recommendations for '{}' via {} (grade {:?}, {}%)",
        request.career,
        recommender.backend(),
        grading.overall_grade,
        grading.overall_percent
    );

    Ok(Json(RecommendationResponse {
        recommendations,
        grading,
    }))
}
