/// User administration and activity API routes
use crate::{
    api::albums::MessageResponse,
    error::{Result, ServerError},
    middleware::AdminUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use club_core::{
    storage::StorageContext,
    types::{User, UserActivity, UserId},
};

/// GET /api/users
/// List all accounts
pub async fn list_users(
    State(app_state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<User>>> {
    let users = app_state.db.get_all_users().await?;
    Ok(Json(users))
}

/// DELETE /api/users/:id
/// Delete an account and everything it authored; admins cannot delete themselves
pub async fn delete_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<MessageResponse>> {
    let id = UserId::parse(&id)?;
    if &id == admin.user_id() {
        return Err(ServerError::BadRequest(
            "You cannot delete your own account".to_string(),
        ));
    }

    app_state.db.delete_user(&id).await?;

    tracing::info!(user_id = %id, admin = %admin.user_id, "User deleted by admin");

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}

/// GET /api/users/:id/activity
/// Favorites and ratings of a member
pub async fn user_activity(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<UserActivity>> {
    let id = UserId::parse(&id)?;
    let activity = app_state.db.get_user_activity(&id).await?;
    Ok(Json(activity))
}
