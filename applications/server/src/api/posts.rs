/// Deep-dive post API routes
use crate::{
    api::{albums::MessageResponse, JsonBody},
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use club_core::{
    storage::StorageContext,
    types::{CreatePost, Post, PostId, UpdatePost},
};

/// GET /api/posts
pub async fn list_posts(State(app_state): State<AppState>) -> Result<Json<Vec<Post>>> {
    let posts = app_state.db.get_posts().await?;
    Ok(Json(posts))
}

/// GET /api/posts/:id
pub async fn get_post(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Post>> {
    let id = PostId::parse(&id)?;
    let post = app_state
        .db
        .get_post(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Post not found".to_string()))?;
    Ok(Json(post))
}

/// POST /api/posts
pub async fn create_post(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<CreatePost>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = app_state.db.create_post(user.user_id(), req).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/posts/:id
/// Author or admin
pub async fn update_post(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<UpdatePost>,
) -> Result<Json<Post>> {
    let id = PostId::parse(&id)?;
    let post = app_state.db.update_post(&id, &user.actor(), req).await?;
    Ok(Json(post))
}

/// DELETE /api/posts/:id
/// Author or admin
pub async fn delete_post(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    let id = PostId::parse(&id)?;
    app_state.db.delete_post(&id, &user.actor()).await?;
    Ok(Json(MessageResponse {
        message: "Post deleted".to_string(),
    }))
}
