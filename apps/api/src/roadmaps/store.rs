//! Roadmap persistence over the `roadmaps.json` store (user id → list).

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::grading::engine::GradingReport;
use crate::models::roadmap::Roadmap;
use crate::storage::JsonFileStore;

pub type RoadmapStore = JsonFileStore<Vec<Roadmap>>;

/// Outcome of a delete, distinguishing "user never saved anything".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    NotPresent,
    NoRoadmaps,
}

pub struct NewRoadmap {
    pub career: String,
    pub skills: Vec<String>,
    pub recommendations: Option<Value>,
    pub grading: GradingReport,
}

/// Appends a roadmap to the user's list and returns it.
pub async fn save_roadmap(
    store: &RoadmapStore,
    user_id: &str,
    new: NewRoadmap,
) -> Result<Roadmap, AppError> {
    let now = Utc::now();
    let roadmap = Roadmap {
        id: Uuid::new_v4().to_string(),
        career: new.career,
        skills: new.skills,
        recommendations: new.recommendations,
        grading: Some(new.grading),
        created_at: now,
        updated_at: now,
    };

    let user_id = user_id.to_string();
    let stored = roadmap.clone();
    store
        .update(move |all| {
            all.entry(user_id).or_default().push(stored);
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(roadmap)
}

pub async fn list_roadmaps(store: &RoadmapStore, user_id: &str) -> Vec<Roadmap> {
    store.load().await.remove(user_id).unwrap_or_default()
}

pub async fn find_roadmap(store: &RoadmapStore, user_id: &str, id: &str) -> Option<Roadmap> {
    list_roadmaps(store, user_id)
        .await
        .into_iter()
        .find(|r| r.id == id)
}

/// Removes the roadmap with `id` from the user's list.
pub async fn delete_roadmap(
    store: &RoadmapStore,
    user_id: &str,
    id: &str,
) -> Result<DeleteOutcome, AppError> {
    let user_id = user_id.to_string();
    let id = id.to_string();
    store
        .update(move |all| {
            let Some(list) = all.get_mut(&user_id) else {
                return Ok(DeleteOutcome::NoRoadmaps);
            };
            let before = list.len();
            list.retain(|r| r.id != id);
            Ok(if list.len() < before {
                DeleteOutcome::Removed
            } else {
                DeleteOutcome::NotPresent
            })
        })
        .await
}
