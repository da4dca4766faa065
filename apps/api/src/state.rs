use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::JwtKeys;
use crate::grading::careers::CareerCatalog;
use crate::models::roadmap::Roadmap;
use crate::models::user::UserRecord;
use crate::recommendations::Recommender;
use crate::storage::JsonFileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Accounts keyed by email.
    pub users: Arc<JsonFileStore<UserRecord>>,
    /// Saved roadmaps keyed by user id.
    pub roadmaps: Arc<JsonFileStore<Vec<Roadmap>>>,
    /// Career table, built once at startup and never reloaded.
    pub careers: Arc<CareerCatalog>,
    pub jwt: Arc<JwtKeys>,
    /// `None` when no OpenAI key is configured.
    pub recommender: Option<Arc<dyn Recommender>>,
}

impl FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.jwt)
    }
}
