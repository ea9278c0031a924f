//! Personal collection albums and their comment threads
//!
//! Only the owner may change or remove a personal album; comments are open
//! to every authenticated member.

use crate::now_timestamp;
use club_core::{error::Result, types::*, ClubError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const PERSONAL_ALBUM_COLUMNS: &str = "id, owner_id, title, artist, release_year, cover_art_url,
     user_rating, notes, created_at, updated_at";

fn personal_album_from_row(row: &SqliteRow) -> Result<PersonalAlbum> {
    Ok(PersonalAlbum {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        release_year: row.try_get("release_year")?,
        cover_art_url: row.try_get("cover_art_url")?,
        user_rating: row.try_get("user_rating")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn personal_comment_from_row(row: &SqliteRow) -> Result<PersonalComment> {
    Ok(PersonalComment {
        id: row.try_get("id")?,
        personal_album_id: row.try_get("personal_album_id")?,
        author_id: row.try_get("author_id")?,
        author_username: row.try_get("author_username")?,
        text: row.try_get("text")?,
        created_at: row.try_get("created_at")?,
    })
}

pub async fn create(
    pool: &SqlitePool,
    owner: &UserId,
    album: CreatePersonalAlbum,
) -> Result<PersonalAlbum> {
    let album = album.validate()?;
    crate::users::ensure_exists(pool, owner).await?;
    let now = now_timestamp();

    let personal = PersonalAlbum {
        id: PersonalAlbumId::generate(),
        owner_id: owner.clone(),
        title: album.title,
        artist: album.artist,
        release_year: album.release_year,
        cover_art_url: album.cover_art_url,
        user_rating: album.user_rating,
        notes: album.notes,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO personal_albums (
            id, owner_id, title, artist, release_year, cover_art_url,
            user_rating, notes, created_at, updated_at
         )
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&personal.id)
    .bind(&personal.owner_id)
    .bind(&personal.title)
    .bind(&personal.artist)
    .bind(personal.release_year)
    .bind(&personal.cover_art_url)
    .bind(personal.user_rating)
    .bind(&personal.notes)
    .bind(&personal.created_at)
    .bind(&personal.updated_at)
    .execute(pool)
    .await?;

    Ok(personal)
}

pub async fn get_by_id(pool: &SqlitePool, id: &PersonalAlbumId) -> Result<Option<PersonalAlbum>> {
    let sql = format!("SELECT {PERSONAL_ALBUM_COLUMNS} FROM personal_albums WHERE id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    row.as_ref().map(personal_album_from_row).transpose()
}

/// A member's collection, newest first
pub async fn get_for_owner(pool: &SqlitePool, owner: &UserId) -> Result<Vec<PersonalAlbum>> {
    let sql = format!(
        "SELECT {PERSONAL_ALBUM_COLUMNS} FROM personal_albums
         WHERE owner_id = ?
         ORDER BY created_at DESC, rowid DESC"
    );
    let rows = sqlx::query(&sql).bind(owner).fetch_all(pool).await?;

    rows.iter().map(personal_album_from_row).collect()
}

async fn get_owned(
    pool: &SqlitePool,
    id: &PersonalAlbumId,
    actor: &Actor,
) -> Result<PersonalAlbum> {
    let album = get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClubError::not_found("Personal album", id.as_str()))?;

    if !actor.can_modify(&album.owner_id, false) {
        return Err(ClubError::permission_denied(
            "Only the owner can modify this album",
        ));
    }
    Ok(album)
}

pub async fn update(
    pool: &SqlitePool,
    id: &PersonalAlbumId,
    actor: &Actor,
    update: UpdatePersonalAlbum,
) -> Result<PersonalAlbum> {
    let mut album = get_owned(pool, id, actor).await?;

    update.apply_to(&mut album)?;
    album.updated_at = now_timestamp();

    sqlx::query(
        "UPDATE personal_albums
         SET title = ?, artist = ?, release_year = ?, cover_art_url = ?,
             user_rating = ?, notes = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&album.title)
    .bind(&album.artist)
    .bind(album.release_year)
    .bind(&album.cover_art_url)
    .bind(album.user_rating)
    .bind(&album.notes)
    .bind(&album.updated_at)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(album)
}

/// Delete a personal album and its comments
pub async fn delete(pool: &SqlitePool, id: &PersonalAlbumId, actor: &Actor) -> Result<()> {
    get_owned(pool, id, actor).await?;

    let mut tx = crate::begin_write(pool).await?;

    sqlx::query("DELETE FROM personal_comments WHERE personal_album_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM personal_albums WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Comments on a personal album, newest first
pub async fn get_comments(
    pool: &SqlitePool,
    id: &PersonalAlbumId,
) -> Result<Vec<PersonalComment>> {
    let rows = sqlx::query(
        "SELECT c.id, c.personal_album_id, c.author_id, u.username AS author_username,
                c.text, c.created_at
         FROM personal_comments c
         JOIN users u ON u.id = c.author_id
         WHERE c.personal_album_id = ?
         ORDER BY c.created_at DESC, c.rowid DESC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(personal_comment_from_row).collect()
}

pub async fn add_comment(
    pool: &SqlitePool,
    id: &PersonalAlbumId,
    author: &UserId,
    text: &str,
) -> Result<PersonalComment> {
    let text = normalize_comment_text(text)?;

    if get_by_id(pool, id).await?.is_none() {
        return Err(ClubError::not_found("Personal album", id.as_str()));
    }

    let author_username: String = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
        .bind(author)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ClubError::not_found("User", author.as_str()))?;

    let comment = PersonalComment {
        id: PersonalCommentId::generate(),
        personal_album_id: id.clone(),
        author_id: author.clone(),
        author_username,
        text,
        created_at: now_timestamp(),
    };

    sqlx::query(
        "INSERT INTO personal_comments (id, personal_album_id, author_id, text, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&comment.id)
    .bind(&comment.personal_album_id)
    .bind(&comment.author_id)
    .bind(&comment.text)
    .bind(&comment.created_at)
    .execute(pool)
    .await?;

    Ok(comment)
}
