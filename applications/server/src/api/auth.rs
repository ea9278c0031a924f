/// Registration, login and token refresh
use crate::{
    api::JsonBody,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use club_core::{storage::StorageContext, CreateUser, Role, User};
use serde::{Deserialize, Serialize};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /api/users/register
pub async fn register(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServerError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    // Validate before paying for the hash
    let create = CreateUser {
        username: req.username,
        email: req.email,
        password_hash: String::new(),
        role: Role::User,
    }
    .validate()?;

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let user = app_state
        .db
        .create_user(CreateUser {
            password_hash,
            ..create
        })
        .await?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// POST /api/users/login
pub async fn login(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = app_state
        .db
        .find_user_by_email(&req.email)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    let password_hash = app_state
        .db
        .get_password_hash(&user.id)
        .await?
        .ok_or_else(|| ServerError::Internal(format!("No password hash for user {}", user.id)))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let tokens = app_state.auth_service.issue_tokens(&user)?;

    tracing::info!(user_id = %user.id, "Member logged in");

    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        user,
    }))
}

/// POST /api/auth/refresh
///
/// The user is re-read so role changes and deletions take effect.
pub async fn refresh(
    State(app_state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let user = app_state
        .db
        .get_user(&user_id)
        .await?
        .ok_or_else(|| ServerError::Auth("Account no longer exists".to_string()))?;

    let access_token = app_state
        .auth_service
        .create_access_token(&user.id, user.role)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}
