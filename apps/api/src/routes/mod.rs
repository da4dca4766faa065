pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::grading::handlers as grading;
use crate::recommendations::handlers as recommendations;
use crate::roadmaps::handlers as roadmaps;
use crate::state::AppState;

/// Endpoint table, also printed at startup.
pub const ENDPOINTS: &[&str] = &[
    "POST   /api/auth/signup",
    "POST   /api/auth/login",
    "GET    /api/roadmaps (requires auth)",
    "POST   /api/roadmaps (requires auth)",
    "GET    /api/roadmaps/:id (requires auth)",
    "DELETE /api/roadmaps/:id (requires auth)",
    "POST   /api/generate-recommendations",
    "POST   /api/grade",
    "POST   /api/skills/extract",
    "GET    /api/careers",
    "GET    /api/health",
];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Accounts
        .route("/api/auth/signup", post(auth::handle_signup))
        .route("/api/auth/login", post(auth::handle_login))
        // Roadmaps
        .route(
            "/api/roadmaps",
            get(roadmaps::handle_list_roadmaps).post(roadmaps::handle_save_roadmap),
        )
        .route(
            "/api/roadmaps/:id",
            get(roadmaps::handle_get_roadmap).delete(roadmaps::handle_delete_roadmap),
        )
        // Grading
        .route("/api/careers", get(grading::handle_list_careers))
        .route("/api/grade", post(grading::handle_grade))
        .route("/api/skills/extract", post(grading::handle_extract))
        // Recommendations
        .route(
            "/api/generate-recommendations",
            post(recommendations::handle_generate_recommendations),
        )
        .with_state(state)
}
