/// Personal collection API routes
use crate::{
    api::{albums::CommentRequest, albums::MessageResponse, JsonBody},
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
    types::{
        CreatePersonalAlbum, PersonalAlbum, PersonalAlbumId, PersonalComment,
        UpdatePersonalAlbum,
    },
};

/// POST /api/personal-albums
pub async fn create_personal_album(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<CreatePersonalAlbum>,
) -> Result<(StatusCode, Json<PersonalAlbum>)> {
    let album = app_state
        .db
        .create_personal_album(user.user_id(), req)
        .await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// GET /api/personal-albums/:id
pub async fn get_personal_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<PersonalAlbum>> {
    let id = PersonalAlbumId::parse(&id)?;
    let album = app_state
        .db
        .get_personal_album(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))?;
    Ok(Json(album))
}

/// PUT /api/personal-albums/:id
/// Owner only
pub async fn update_personal_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<UpdatePersonalAlbum>,
) -> Result<Json<PersonalAlbum>> {
    let id = PersonalAlbumId::parse(&id)?;
    let album = app_state
        .db
        .update_personal_album(&id, &user.actor(), req)
        .await?;
    Ok(Json(album))
}

/// DELETE /api/personal-albums/:id
/// Owner only; removes the album's comments too
pub async fn delete_personal_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>> {
    let id = PersonalAlbumId::parse(&id)?;
    app_state
        .db
        .delete_personal_album(&id, &user.actor())
        .await?;
    Ok(Json(MessageResponse {
        message: "Album removed".to_string(),
    }))
}

/// GET /api/personal-albums/:id/comments
pub async fn list_comments(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<PersonalComment>>> {
    let id = PersonalAlbumId::parse(&id)?;
    if app_state.db.get_personal_album(&id).await?.is_none() {
        return Err(ServerError::NotFound("Album not found".to_string()));
    }
    let comments = app_state.db.get_personal_comments(&id).await?;
    Ok(Json(comments))
}

/// POST /api/personal-albums/:id/comments
pub async fn add_comment(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<CommentRequest>,
) -> Result<(StatusCode, Json<PersonalComment>)> {
    let id = PersonalAlbumId::parse(&id)?;
    let comment = app_state
        .db
        .add_personal_comment(&id, user.user_id(), &req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
