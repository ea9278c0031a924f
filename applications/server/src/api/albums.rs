/// Shared album catalog API routes
use crate::{
    api::JsonBody,
    error::{Result, ServerError},
    middleware::{AdminUser, AuthenticatedUser},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use club_core::{
    storage::StorageContext,
    types::{Album, AlbumId, AlbumSort, AlbumView, Comment, CreateAlbum, UpdateAlbum, UserId},
};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize)]
pub struct ListAlbumsQuery {
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct ClubScoreRequest {
    #[serde(
        alias = "clubScore",
        alias = "clubOriginalScore",
        alias = "club_original_score",
        deserialize_with = "number_or_numeric_string"
    )]
    pub club_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct FixEntryNumbersResponse {
    pub message: String,
    pub albums: Vec<Album>,
}

/// Accept `7.5` as well as `"7.5"`; form posts send numbers as strings
fn number_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom("Score must be a number")),
    }
}

async fn load_view(app_state: &AppState, id: &AlbumId, viewer: Option<&UserId>) -> Result<AlbumView> {
    app_state
        .db
        .get_album_view(id, viewer)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))
}

/// GET /api/albums?sort=KEY
/// List the catalog; unknown sort keys fall back to entry-number order
pub async fn list_albums(
    State(app_state): State<AppState>,
    Query(query): Query<ListAlbumsQuery>,
    viewer: Option<AuthenticatedUser>,
) -> Result<Json<Vec<AlbumView>>> {
    let sort = AlbumSort::from_query(query.sort.as_deref());
    let albums = app_state
        .db
        .list_albums(sort, viewer.as_ref().map(AuthenticatedUser::user_id))
        .await?;
    Ok(Json(albums))
}

/// GET /api/albums/:id
pub async fn get_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    viewer: Option<AuthenticatedUser>,
) -> Result<Json<AlbumView>> {
    let id = AlbumId::parse(&id)?;
    let view = load_view(&app_state, &id, viewer.as_ref().map(AuthenticatedUser::user_id)).await?;
    Ok(Json(view))
}

/// POST /api/albums
/// Create an album; the entry number defaults to max + 1
pub async fn create_album(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(req): JsonBody<CreateAlbum>,
) -> Result<(StatusCode, Json<AlbumView>)> {
    let album = app_state.db.create_album(req).await?;

    tracing::info!(
        album_id = %album.id,
        entry_number = album.club_entry_number,
        admin = %admin.user_id,
        "Album added to catalog"
    );

    let view = load_view(&app_state, &album.id, Some(admin.user_id())).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/albums/:id
pub async fn update_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(req): JsonBody<UpdateAlbum>,
) -> Result<Json<AlbumView>> {
    let id = AlbumId::parse(&id)?;
    app_state.db.update_album(&id, req).await?;
    let view = load_view(&app_state, &id, Some(admin.user_id())).await?;
    Ok(Json(view))
}

/// DELETE /api/albums/:id
/// Remove an album with its comments, scores and favorites
pub async fn delete_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<MessageResponse>> {
    let id = AlbumId::parse(&id)?;
    app_state.db.delete_album(&id).await?;

    tracing::info!(album_id = %id, admin = %admin.user_id, "Album deleted");

    Ok(Json(MessageResponse {
        message: "Album deleted".to_string(),
    }))
}

/// POST /api/albums/fix-entry-numbers
pub async fn fix_entry_numbers(
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<FixEntryNumbersResponse>> {
    let albums = app_state.db.fix_entry_numbers().await?;

    tracing::info!(admin = %admin.user_id, albums = albums.len(), "Entry numbers repaired");

    Ok(Json(FixEntryNumbersResponse {
        message: format!("Entry numbers fixed for {} albums", albums.len()),
        albums,
    }))
}

/// POST /api/albums/:id/score
pub async fn submit_score(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<ScoreRequest>,
) -> Result<Json<AlbumView>> {
    let id = AlbumId::parse(&id)?;
    app_state
        .db
        .submit_score(&id, user.user_id(), req.score)
        .await?;
    let view = load_view(&app_state, &id, Some(user.user_id())).await?;
    Ok(Json(view))
}

/// PUT /api/albums/:id/clubscore
pub async fn set_club_score(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(req): JsonBody<ClubScoreRequest>,
) -> Result<Json<AlbumView>> {
    let id = AlbumId::parse(&id)?;
    app_state.db.set_club_score(&id, req.club_score).await?;
    let view = load_view(&app_state, &id, Some(admin.user_id())).await?;
    Ok(Json(view))
}

/// POST /api/albums/:id/favorite
pub async fn favorite_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<AlbumView>> {
    let id = AlbumId::parse(&id)?;
    app_state.db.favorite_album(&id, user.user_id()).await?;
    let view = load_view(&app_state, &id, Some(user.user_id())).await?;
    Ok(Json(view))
}

/// DELETE /api/albums/:id/favorite
pub async fn unfavorite_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<AlbumView>> {
    let id = AlbumId::parse(&id)?;
    app_state.db.unfavorite_album(&id, user.user_id()).await?;
    let view = load_view(&app_state, &id, Some(user.user_id())).await?;
    Ok(Json(view))
}

/// GET /api/albums/:id/comments
pub async fn list_comments(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Comment>>> {
    let id = AlbumId::parse(&id)?;
    if app_state.db.get_album(&id).await?.is_none() {
        return Err(ServerError::NotFound("Album not found".to_string()));
    }
    let comments = app_state.db.get_album_comments(&id).await?;
    Ok(Json(comments))
}

/// POST /api/albums/:id/comments
pub async fn add_comment(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    JsonBody(req): JsonBody<CommentRequest>,
) -> Result<(StatusCode, Json<Comment>)> {
    let id = AlbumId::parse(&id)?;
    let comment = app_state
        .db
        .add_album_comment(&id, user.user_id(), &req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
