//! Album comment queries

use crate::now_timestamp;
use club_core::{error::Result, types::*, ClubError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn comment_from_row(row: &SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        album_id: row.try_get("album_id")?,
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        text: row.try_get("text")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Comments on an album, newest first
pub async fn get_for_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        "SELECT c.id, c.album_id, c.user_id, u.username, c.text, c.created_at
         FROM comments c
         JOIN users u ON u.id = c.user_id
         WHERE c.album_id = ?
         ORDER BY c.created_at DESC, c.rowid DESC",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(comment_from_row).collect()
}

pub async fn create(
    pool: &SqlitePool,
    album_id: &AlbumId,
    user_id: &UserId,
    text: &str,
) -> Result<Comment> {
    let text = normalize_comment_text(text)?;

    let album: Option<String> = sqlx::query_scalar("SELECT id FROM albums WHERE id = ?")
        .bind(album_id)
        .fetch_optional(pool)
        .await?;
    if album.is_none() {
        return Err(ClubError::not_found("Album", album_id.as_str()));
    }

    let username: String = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ClubError::not_found("User", user_id.as_str()))?;

    let comment = Comment {
        id: CommentId::generate(),
        album_id: album_id.clone(),
        user_id: user_id.clone(),
        username,
        text,
        created_at: now_timestamp(),
    };

    sqlx::query(
        "INSERT INTO comments (id, album_id, user_id, text, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&comment.id)
    .bind(&comment.album_id)
    .bind(&comment.user_id)
    .bind(&comment.text)
    .bind(&comment.created_at)
    .execute(pool)
    .await?;

    Ok(comment)
}
