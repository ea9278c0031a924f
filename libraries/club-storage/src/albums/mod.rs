//! Shared album catalog queries
//!
//! Entry numbers are read and assigned while holding the write lock, and the
//! `idx_albums_club_entry_number` unique index backs the invariant, so two
//! concurrent creations can never end up with the same number.

use crate::{begin_write, map_unique_violation, now_timestamp};
use club_core::{
    entry_numbers::{next_entry_number, plan_repair},
    error::Result,
    scoring::validate_score,
    types::*,
    ClubError,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::collections::HashMap;

const ALBUM_COLUMNS: &str = "a.id, a.title, a.artist, a.release_year, a.genre, a.cover_art_url,
     a.external_id, a.trivia, a.club_entry_number, a.club_original_score,
     a.average_user_score, a.date_added, a.updated_at";

pub(crate) fn album_from_row(row: &SqliteRow) -> Result<Album> {
    let genre: String = row.try_get("genre")?;

    Ok(Album {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        release_year: row.try_get("release_year")?,
        genre: serde_json::from_str(&genre)?,
        cover_art_url: row.try_get("cover_art_url")?,
        external_id: row.try_get("external_id")?,
        trivia: row.try_get("trivia")?,
        club_entry_number: row.try_get("club_entry_number")?,
        club_original_score: row.try_get("club_original_score")?,
        average_user_score: row.try_get("average_user_score")?,
        date_added: row.try_get("date_added")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let mut conn = pool.acquire().await?;
    fetch_album(&mut *conn, id).await
}

/// Load an album on an existing connection (used inside transactions)
pub(crate) async fn fetch_album(conn: &mut SqliteConnection, id: &AlbumId) -> Result<Option<Album>> {
    let sql = format!("SELECT {ALBUM_COLUMNS} FROM albums a WHERE a.id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await?;

    row.as_ref().map(album_from_row).transpose()
}

/// All albums in entry-number order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let sql = format!(
        "SELECT {ALBUM_COLUMNS} FROM albums a ORDER BY {}",
        AlbumSort::EntryNumberAsc.order_by()
    );
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    rows.iter().map(album_from_row).collect()
}

/// Sorted listing with scores, favorites and comment counts joined in
pub async fn list_views(
    pool: &SqlitePool,
    sort: AlbumSort,
    viewer: Option<&UserId>,
) -> Result<Vec<AlbumView>> {
    let sql = format!(
        "SELECT {ALBUM_COLUMNS} FROM albums a ORDER BY {}",
        sort.order_by()
    );
    let albums = sqlx::query(&sql)
        .fetch_all(pool)
        .await?
        .iter()
        .map(album_from_row)
        .collect::<Result<Vec<_>>>()?;

    let mut scores = all_scores(pool).await?;
    let mut favorites = all_favorites(pool).await?;
    let comment_counts = all_comment_counts(pool).await?;

    Ok(albums
        .into_iter()
        .map(|album| {
            let album_scores = scores.remove(&album.id).unwrap_or_default();
            let favorited_by = favorites.remove(&album.id).unwrap_or_default();
            let comment_count = comment_counts.get(&album.id).copied().unwrap_or(0);
            AlbumView::assemble(album, album_scores, favorited_by, comment_count, viewer)
        })
        .collect())
}

/// Single album view
pub async fn get_view(
    pool: &SqlitePool,
    id: &AlbumId,
    viewer: Option<&UserId>,
) -> Result<Option<AlbumView>> {
    let Some(album) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let scores = crate::scores::get_for_album(pool, id).await?;
    let favorited_by = crate::favorites::get_for_album(pool, id).await?;
    let comment_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE album_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(Some(AlbumView::assemble(
        album,
        scores,
        favorited_by,
        comment_count,
        viewer,
    )))
}

async fn all_scores(pool: &SqlitePool) -> Result<HashMap<AlbumId, Vec<ScoreEntry>>> {
    let rows = sqlx::query(
        "SELECT s.album_id, s.user_id, u.username, s.score
         FROM album_scores s
         JOIN users u ON u.id = s.user_id
         ORDER BY s.created_at, s.rowid",
    )
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<AlbumId, Vec<ScoreEntry>> = HashMap::new();
    for row in rows {
        let album_id: AlbumId = row.try_get("album_id")?;
        grouped.entry(album_id).or_default().push(ScoreEntry {
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            score: row.try_get("score")?,
        });
    }
    Ok(grouped)
}

async fn all_favorites(pool: &SqlitePool) -> Result<HashMap<AlbumId, Vec<UserId>>> {
    let rows = sqlx::query(
        "SELECT album_id, user_id FROM album_favorites ORDER BY created_at, rowid",
    )
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<AlbumId, Vec<UserId>> = HashMap::new();
    for row in rows {
        let album_id: AlbumId = row.try_get("album_id")?;
        grouped
            .entry(album_id)
            .or_default()
            .push(row.try_get("user_id")?);
    }
    Ok(grouped)
}

async fn all_comment_counts(pool: &SqlitePool) -> Result<HashMap<AlbumId, i64>> {
    let rows = sqlx::query("SELECT album_id, COUNT(*) AS total FROM comments GROUP BY album_id")
        .fetch_all(pool)
        .await?;

    rows.iter()
        .map(|row| -> Result<(AlbumId, i64)> {
            Ok((row.try_get("album_id")?, row.try_get("total")?))
        })
        .collect()
}

pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    let album = album.validate()?;
    let mut tx = begin_write(pool).await?;

    let entry_number = match album.club_entry_number {
        Some(number) => {
            let taken: Option<String> =
                sqlx::query_scalar("SELECT id FROM albums WHERE club_entry_number = ?")
                    .bind(number)
                    .fetch_optional(&mut *tx)
                    .await?;
            if taken.is_some() {
                return Err(ClubError::duplicate(format!(
                    "Club entry number {number} is already in use"
                )));
            }
            number
        }
        None => {
            let current_max: Option<i64> =
                sqlx::query_scalar("SELECT MAX(club_entry_number) FROM albums")
                    .fetch_one(&mut *tx)
                    .await?;
            next_entry_number(current_max)
        }
    };

    let id = AlbumId::generate();
    let now = now_timestamp();
    let genre = serde_json::to_string(&album.genre)?;

    sqlx::query(
        "INSERT INTO albums (
            id, title, artist, release_year, genre, cover_art_url, external_id, trivia,
            club_entry_number, club_original_score, average_user_score, date_added, updated_at
         )
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)",
    )
    .bind(&id)
    .bind(&album.title)
    .bind(&album.artist)
    .bind(album.release_year)
    .bind(&genre)
    .bind(&album.cover_art_url)
    .bind(&album.external_id)
    .bind(&album.trivia)
    .bind(entry_number)
    .bind(album.club_original_score)
    .bind(&now)
    .bind(&now)
    .execute(&mut *tx)
    .await
    .map_err(|err| map_unique_violation(err, "Club entry number is already in use"))?;

    let created = fetch_album(&mut *tx, &id)
        .await?
        .ok_or_else(|| ClubError::storage("Failed to create album"))?;

    tx.commit().await?;
    Ok(created)
}

pub async fn update(pool: &SqlitePool, id: &AlbumId, update: UpdateAlbum) -> Result<Album> {
    let update = update.validate()?;
    let mut album = get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClubError::not_found("Album", id.as_str()))?;

    update.apply_to(&mut album);
    album.updated_at = now_timestamp();

    sqlx::query(
        "UPDATE albums
         SET title = ?, artist = ?, release_year = ?, genre = ?, trivia = ?,
             cover_art_url = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&album.title)
    .bind(&album.artist)
    .bind(album.release_year)
    .bind(serde_json::to_string(&album.genre)?)
    .bind(&album.trivia)
    .bind(&album.cover_art_url)
    .bind(&album.updated_at)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(album)
}

pub async fn set_club_score(pool: &SqlitePool, id: &AlbumId, score: f64) -> Result<Album> {
    let score = validate_score(score)?;

    let result = sqlx::query(
        "UPDATE albums SET club_original_score = ?, updated_at = ? WHERE id = ?",
    )
    .bind(score)
    .bind(now_timestamp())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ClubError::not_found("Album", id.as_str()));
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClubError::not_found("Album", id.as_str()))
}

/// Delete an album with its comments
///
/// Scores and favorites go with the album through `ON DELETE CASCADE`. Other
/// albums keep their entry numbers.
pub async fn delete(pool: &SqlitePool, id: &AlbumId) -> Result<()> {
    let mut tx = begin_write(pool).await?;

    if fetch_album(&mut *tx, id).await?.is_none() {
        return Err(ClubError::not_found("Album", id.as_str()));
    }

    let comments = sqlx::query("DELETE FROM comments WHERE album_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(
        album_id = %id,
        comments_removed = comments.rows_affected(),
        "Album deleted"
    );
    Ok(())
}

/// Rewrite entry numbers to the dense sequence `1..N`
///
/// Rewrites are applied in ascending order; each target is at most the
/// album's current number, so the unique index never sees a collision.
pub async fn fix_entry_numbers(pool: &SqlitePool) -> Result<Vec<Album>> {
    let mut tx = begin_write(pool).await?;

    let rows = sqlx::query("SELECT id, club_entry_number FROM albums ORDER BY club_entry_number")
        .fetch_all(&mut *tx)
        .await?;
    let current = rows
        .iter()
        .map(|row| -> Result<(AlbumId, i64)> {
            Ok((row.try_get("id")?, row.try_get("club_entry_number")?))
        })
        .collect::<Result<Vec<_>>>()?;

    let plan = plan_repair(&current);
    let now = now_timestamp();

    for rewrite in &plan {
        sqlx::query("UPDATE albums SET club_entry_number = ?, updated_at = ? WHERE id = ?")
            .bind(rewrite.to)
            .bind(&now)
            .bind(&rewrite.album_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(
        albums = current.len(),
        renumbered = plan.len(),
        "Club entry numbers repaired"
    );

    get_all(pool).await
}
