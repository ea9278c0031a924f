//! Member score queries
//!
//! Scores live in `album_scores` keyed by (album, user). Every write loads the
//! album's `ScoreSheet`, applies the change and stores the recomputed
//! average in the same immediate transaction, so concurrent submissions
//! queue on the write lock and the last one wins.

use crate::albums::{album_from_row, fetch_album};
use crate::{begin_write, now_timestamp};
use club_core::{
    error::Result, scoring::validate_score, scoring::ScoreSheet, types::*, ClubError,
};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Scores of one album with usernames, in submission order
pub async fn get_for_album(pool: &SqlitePool, album_id: &AlbumId) -> Result<Vec<ScoreEntry>> {
    let rows = sqlx::query(
        "SELECT s.user_id, u.username, s.score
         FROM album_scores s
         JOIN users u ON u.id = s.user_id
         WHERE s.album_id = ?
         ORDER BY s.created_at, s.rowid",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<ScoreEntry> {
            Ok(ScoreEntry {
                user_id: row.try_get("user_id")?,
                username: row.try_get("username")?,
                score: row.try_get("score")?,
            })
        })
        .collect()
}

/// Every score a member has given, newest album first
pub async fn get_ratings_for_user(pool: &SqlitePool, user_id: &UserId) -> Result<Vec<RatingEntry>> {
    let rows = sqlx::query(
        "SELECT s.score, a.*
         FROM album_scores s
         JOIN albums a ON a.id = s.album_id
         WHERE s.user_id = ?
         ORDER BY a.date_added DESC, a.club_entry_number DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<RatingEntry> {
            let album = album_from_row(row)?;
            Ok(RatingEntry {
                score: row.try_get("score")?,
                album: AlbumSummary::from(&album),
            })
        })
        .collect()
}

async fn load_sheet(conn: &mut SqliteConnection, album_id: &AlbumId) -> Result<ScoreSheet> {
    let rows = sqlx::query("SELECT user_id, score FROM album_scores WHERE album_id = ?")
        .bind(album_id)
        .fetch_all(&mut *conn)
        .await?;

    let entries = rows
        .iter()
        .map(|row| -> Result<(UserId, f64)> {
            Ok((row.try_get("user_id")?, row.try_get("score")?))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ScoreSheet::from_entries(entries))
}

async fn store_average(conn: &mut SqliteConnection, album_id: &AlbumId, average: f64) -> Result<()> {
    sqlx::query("UPDATE albums SET average_user_score = ? WHERE id = ?")
        .bind(average)
        .bind(album_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Recompute an album's average from the rows currently stored
pub(crate) async fn recompute_average(conn: &mut SqliteConnection, album_id: &AlbumId) -> Result<f64> {
    let average = load_sheet(conn, album_id).await?.average();
    store_average(conn, album_id, average).await?;
    Ok(average)
}

/// Insert or replace a member's score and refresh the album average
///
/// An existing row is updated in place so the member keeps their position in
/// the album's score list.
pub async fn submit(
    pool: &SqlitePool,
    album_id: &AlbumId,
    user_id: &UserId,
    score: f64,
) -> Result<Album> {
    let score = validate_score(score)?;
    let mut tx = begin_write(pool).await?;

    if fetch_album(&mut *tx, album_id).await?.is_none() {
        return Err(ClubError::not_found("Album", album_id.as_str()));
    }
    crate::users::ensure_exists(&mut *tx, user_id).await?;

    let mut sheet = load_sheet(&mut *tx, album_id).await?;
    sheet.upsert(user_id.clone(), score)?;

    let now = now_timestamp();
    sqlx::query(
        "INSERT INTO album_scores (album_id, user_id, score, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(album_id, user_id)
         DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at",
    )
    .bind(album_id)
    .bind(user_id)
    .bind(score)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await?;

    store_average(&mut *tx, album_id, sheet.average()).await?;

    let album = fetch_album(&mut *tx, album_id)
        .await?
        .ok_or_else(|| ClubError::not_found("Album", album_id.as_str()))?;

    tx.commit().await?;
    Ok(album)
}
