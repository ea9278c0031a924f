//! Album favorites
//!
//! The primary key on (album, user) makes the set semantics hold in storage:
//! adding twice is a no-op and removing an absent entry changes nothing.

use crate::albums::album_from_row;
use crate::now_timestamp;
use club_core::{error::Result, types::*, ClubError};
use sqlx::{Row, SqlitePool};

async fn ensure_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<()> {
    let exists: Option<String> = sqlx::query_scalar("SELECT id FROM albums WHERE id = ?")
        .bind(album_id)
        .fetch_optional(pool)
        .await?;

    exists
        .map(|_| ())
        .ok_or_else(|| ClubError::not_found("Album", album_id.as_str()))
}

pub async fn add(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
    ensure_album(pool, album_id).await?;
    crate::users::ensure_exists(pool, user_id).await?;

    sqlx::query(
        "INSERT INTO album_favorites (album_id, user_id, created_at)
         VALUES (?, ?, ?)
         ON CONFLICT(album_id, user_id) DO NOTHING",
    )
    .bind(album_id)
    .bind(user_id)
    .bind(now_timestamp())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn remove(pool: &SqlitePool, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
    ensure_album(pool, album_id).await?;

    sqlx::query("DELETE FROM album_favorites WHERE album_id = ? AND user_id = ?")
        .bind(album_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Members who favorited an album, in the order they did so
pub async fn get_for_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<UserId>> {
    let ids = sqlx::query_scalar(
        "SELECT user_id FROM album_favorites WHERE album_id = ? ORDER BY created_at, rowid",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Albums a member favorited, newest album first
pub async fn get_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<AlbumSummary>> {
    let rows = sqlx::query(
        "SELECT a.*
         FROM album_favorites f
         JOIN albums a ON a.id = f.album_id
         WHERE f.user_id = ?
         ORDER BY a.date_added DESC, a.club_entry_number DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| album_from_row(row).map(|album| AlbumSummary::from(&album)))
        .collect()
}
