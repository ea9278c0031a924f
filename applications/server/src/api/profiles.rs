/// Profile API routes
use crate::{
    api::JsonBody,
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use club_core::{
    storage::StorageContext,
    types::{Profile, ProfileSettings, UpdateProfileSettings, UserId},
};

/// GET /api/profiles/:id
pub async fn get_profile(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Profile>> {
    let id = UserId::parse(&id)?;
    let profile = app_state
        .db
        .get_profile(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;
    Ok(Json(profile))
}

/// PUT /api/profiles/settings
/// Update the caller's own profile customization
pub async fn update_settings(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<UpdateProfileSettings>,
) -> Result<Json<ProfileSettings>> {
    let settings = app_state
        .db
        .update_profile_settings(user.user_id(), req)
        .await?;
    Ok(Json(settings))
}
