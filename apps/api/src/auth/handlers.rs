//! Axum route handlers for signup and login.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::{PublicUser, UserRecord};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
    pub message: String,
}

/// POST /api/auth/signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    validate_signup(&req)?;

    let password_hash = hash_password(&req.password).await?;
    let email = req.email.clone();
    let record = state
        .users
        .update(move |users| {
            if users.contains_key(&email) {
                return Err(AppError::Validation("User already exists".to_string()));
            }
            let record = UserRecord {
                user_id: Uuid::new_v4().to_string(),
                email: email.clone(),
                password_hash,
                created_at: Utc::now(),
            };
            users.insert(email, record.clone());
            Ok(record)
        })
        .await?;

    info!("Created account {}", record.user_id);

    let token = state.jwt.issue(&record.user_id, &record.email)?;
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&record),
        message: "Account created successfully".to_string(),
    }))
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());
    let record = state
        .users
        .load()
        .await
        .remove(&req.email)
        .ok_or_else(invalid)?;
    if !verify_password(&req.password, &record.password_hash).await {
        return Err(invalid());
    }

    let token = state.jwt.issue(&record.user_id, &record.email)?;
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&record),
        message: "Login successful".to_string(),
    }))
}

fn validate_signup(req: &SignupRequest) -> Result<(), AppError> {
    if req.email.is_empty() || req.password.is_empty() || req.confirm_password.is_empty() {
        return Err(AppError::Validation(
            "Email, password, and confirmation are required".to_string(),
        ));
    }
    if req.password != req.confirm_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
