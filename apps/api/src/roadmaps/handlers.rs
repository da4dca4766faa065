use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::grading::engine::compute_grade;
use crate::models::roadmap::Roadmap;
use crate::roadmaps::store::{
    delete_roadmap, find_roadmap, list_roadmaps, save_roadmap, DeleteOutcome, NewRoadmap,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveRoadmapRequest {
    #[serde(default)]
    pub career: String,
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub recommendations: Option<Value>,
}

#[derive(Serialize)]
pub struct SaveRoadmapResponse {
    pub message: String,
    pub roadmap: Roadmap,
}

#[derive(Serialize)]
pub struct RoadmapListResponse {
    pub roadmaps: Vec<Roadmap>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/roadmaps
pub async fn handle_save_roadmap(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<SaveRoadmapRequest>,
) -> Result<Json<SaveRoadmapResponse>, AppError> {
    let skills = match req.skills {
        Some(skills) if !req.career.trim().is_empty() => skills,
        _ => {
            return Err(AppError::Validation(
                "Career and skills are required".to_string(),
            ))
        }
    };

    let grading = compute_grade(&state.careers, &skills, &req.career);
    let roadmap = save_roadmap(
        &state.roadmaps,
        &user.user_id,
        NewRoadmap {
            career: req.career,
            skills,
            recommendations: req.recommendations,
            grading,
        },
    )
    .await?;

    info!(
        "User {} ({}) saved roadmap {}",
        user.user_id, user.email, roadmap.id
    );

    Ok(Json(SaveRoadmapResponse {
        message: "Roadmap saved successfully".to_string(),
        roadmap,
    }))
}

/// GET /api/roadmaps
pub async fn handle_list_roadmaps(
    State(state): State<AppState>,
    user: AuthUser,
) -> Json<RoadmapListResponse> {
    let roadmaps = list_roadmaps(&state.roadmaps, &user.user_id).await;
    Json(RoadmapListResponse {
        total: roadmaps.len(),
        roadmaps,
    })
}

/// GET /api/roadmaps/:id
pub async fn handle_get_roadmap(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Roadmap>, AppError> {
    find_roadmap(&state.roadmaps, &user.user_id, &id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Roadmap not found".to_string()))
}

/// DELETE /api/roadmaps/:id
///
/// Unknown ids are a no-op; only a user with no roadmap list at all gets a 404.
pub async fn handle_delete_roadmap(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    match delete_roadmap(&state.roadmaps, &user.user_id, &id).await? {
        DeleteOutcome::NoRoadmaps => Err(AppError::NotFound("No roadmaps found".to_string())),
        outcome => {
            if outcome == DeleteOutcome::Removed {
                info!("User {} deleted roadmap {id}", user.user_id);
            }
            Ok(Json(MessageResponse {
                message: "Roadmap deleted successfully".to_string(),
            }))
        }
    }
}
