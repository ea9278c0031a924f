//! Deep-dive posts

use crate::now_timestamp;
use club_core::{error::Result, types::*, ClubError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const POST_SELECT: &str = "SELECT p.id, p.title, p.content, p.author_id, u.username AS author_username,
            p.created_at, p.updated_at
     FROM posts p
     JOIN users u ON u.id = p.author_id";

fn post_from_row(row: &SqliteRow) -> Result<Post> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author: PostAuthor {
            id: row.try_get("author_id")?,
            username: row.try_get("author_username")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn create(pool: &SqlitePool, author: &UserId, post: CreatePost) -> Result<Post> {
    let post = post.validate()?;
    crate::users::ensure_exists(pool, author).await?;
    let id = PostId::generate();
    let now = now_timestamp();

    sqlx::query(
        "INSERT INTO posts (id, title, content, author_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&post.title)
    .bind(&post.content)
    .bind(author)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ClubError::storage("Failed to create post"))
}

/// All posts, newest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Post>> {
    let sql = format!("{POST_SELECT} ORDER BY p.created_at DESC, p.rowid DESC");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    rows.iter().map(post_from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: &PostId) -> Result<Option<Post>> {
    let sql = format!("{POST_SELECT} WHERE p.id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    row.as_ref().map(post_from_row).transpose()
}

/// Load a post the actor may change (author, or an administrator)
async fn get_editable(pool: &SqlitePool, id: &PostId, actor: &Actor) -> Result<Post> {
    let post = get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClubError::not_found("Post", id.as_str()))?;

    if !actor.can_modify(&post.author.id, true) {
        return Err(ClubError::permission_denied(
            "Only the author or an administrator can modify this post",
        ));
    }
    Ok(post)
}

pub async fn update(
    pool: &SqlitePool,
    id: &PostId,
    actor: &Actor,
    update: UpdatePost,
) -> Result<Post> {
    let mut post = get_editable(pool, id, actor).await?;

    update.apply_to(&mut post);
    post.updated_at = now_timestamp();

    sqlx::query("UPDATE posts SET title = ?, content = ?, updated_at = ? WHERE id = ?")
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.updated_at)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(post)
}

pub async fn delete(pool: &SqlitePool, id: &PostId, actor: &Actor) -> Result<()> {
    get_editable(pool, id, actor).await?;

    sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
