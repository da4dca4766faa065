mod auth;
mod config;
mod errors;
mod grading;
mod llm_client;
mod models;
mod recommendations;
mod roadmaps;
mod routes;
mod state;
mod storage;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtKeys;
use crate::config::Config;
use crate::grading::careers::CareerCatalog;
use crate::llm_client::LlmClient;
use crate::models::roadmap::Roadmap;
use crate::models::user::UserRecord;
use crate::recommendations::{LlmRecommender, Recommender};
use crate::routes::{build_router, ENDPOINTS};
use crate::state::AppState;
use crate::storage::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Roadmap API v{}", env!("CARGO_PKG_VERSION"));

    if config.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set; using the development default");
    }

    // Career table: loaded once, never reloaded
    let careers = match &config.careers_file {
        Some(path) => CareerCatalog::from_json_file(path)?,
        None => CareerCatalog::builtin(),
    };
    if careers.is_empty() {
        warn!("Career catalog is empty; every grade will be F");
    }
    info!("Career catalog loaded ({} careers)", careers.len());

    // Initialize data files
    let users: Arc<JsonFileStore<UserRecord>> = Arc::new(JsonFileStore::new(config.users_file()));
    let roadmaps: Arc<JsonFileStore<Vec<Roadmap>>> =
        Arc::new(JsonFileStore::new(config.roadmaps_file()));
    users.init().await.context("Failed to initialize users file")?;
    roadmaps.init().await.context("Failed to initialize roadmaps file")?;
    info!(
        "Data files: {}, {}",
        users.path().display(),
        roadmaps.path().display()
    );

    // Initialize recommender (absent without an API key)
    let recommender: Option<Arc<dyn Recommender>> = match &config.openai_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), config.openai_model.clone())?;
            info!("LLM client initialized (model: {})", llm.model());
            Some(Arc::new(LlmRecommender(llm)))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; recommendations are disabled");
            None
        }
    };

    let state = AppState {
        users,
        roadmaps,
        careers: Arc::new(careers),
        jwt: Arc::new(JwtKeys::from_secret(&config.jwt_secret)),
        recommender,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Port {} is unavailable; try changing PORT", config.port))?;

    info!("Listening on {addr}");
    for endpoint in ENDPOINTS {
        info!("  {endpoint}");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
