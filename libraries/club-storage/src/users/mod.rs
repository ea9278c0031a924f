//! User accounts, profile settings and account removal

use crate::{begin_write, map_unique_violation, now_timestamp};
use club_core::{error::Result, types::*, ClubError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};

const USER_COLUMNS: &str = "id, username, email, role, background_color, text_color,
     accent_color, background_image_url, layout_style, date_registered";

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let role: String = row.try_get("role")?;

    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        role: role.parse()?,
        profile_settings: ProfileSettings {
            background_color: row.try_get("background_color")?,
            text_color: row.try_get("text_color")?,
            accent_color: row.try_get("accent_color")?,
            background_image_url: row.try_get("background_image_url")?,
            layout_style: row.try_get("layout_style")?,
        },
        date_registered: row.try_get("date_registered")?,
    })
}

/// Create an account
///
/// Username and email are unique; a collision is reported as `Duplicate`.
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let user = user.validate()?;

    let existing: Option<String> =
        sqlx::query_scalar("SELECT id FROM users WHERE email = ? OR username = ?")
            .bind(&user.email)
            .bind(&user.username)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Err(ClubError::duplicate(
            "A user with that username or email already exists",
        ));
    }

    let id = UserId::generate();
    let defaults = ProfileSettings::default();

    sqlx::query(
        "INSERT INTO users (
            id, username, email, password_hash, role, background_color, text_color,
            accent_color, background_image_url, layout_style, date_registered
         )
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .bind(&defaults.background_color)
    .bind(&defaults.text_color)
    .bind(&defaults.accent_color)
    .bind(&defaults.background_image_url)
    .bind(&defaults.layout_style)
    .bind(now_timestamp())
    .execute(pool)
    .await
    .map_err(|err| {
        map_unique_violation(err, "A user with that username or email already exists")
    })?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ClubError::storage("Failed to create user"))
}

/// `NotFound` unless the account exists
///
/// Tokens outlive deleted accounts, so writes keyed by a member id check it
/// before touching rows that reference `users`.
pub(crate) async fn ensure_exists<'e, E>(executor: E, id: &UserId) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    let exists: Option<String> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    exists
        .map(|_| ())
        .ok_or_else(|| ClubError::not_found("User", id.as_str()))
}

pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Look up a user by email (compared after trimming and lowercasing)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
    let row = sqlx::query(&sql)
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get user's password hash for authentication
pub async fn get_password_hash(pool: &SqlitePool, id: &UserId) -> Result<Option<String>> {
    let hash = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(hash)
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY date_registered, username");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    rows.iter().map(user_from_row).collect()
}

pub async fn update_profile_settings(
    pool: &SqlitePool,
    id: &UserId,
    update: UpdateProfileSettings,
) -> Result<ProfileSettings> {
    let user = get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClubError::not_found("User", id.as_str()))?;

    let settings = update.apply_to(&user.profile_settings);

    sqlx::query(
        "UPDATE users
         SET background_color = ?, text_color = ?, accent_color = ?,
             background_image_url = ?, layout_style = ?
         WHERE id = ?",
    )
    .bind(&settings.background_color)
    .bind(&settings.text_color)
    .bind(&settings.accent_color)
    .bind(&settings.background_image_url)
    .bind(&settings.layout_style)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(settings)
}

/// Delete a user together with everything they authored
///
/// Albums the user scored get their average recomputed from the remaining
/// scores before the transaction commits.
pub async fn delete(pool: &SqlitePool, id: &UserId) -> Result<()> {
    let mut tx = begin_write(pool).await?;
    ensure_exists(&mut *tx, id).await?;

    let scored: Vec<AlbumId> =
        sqlx::query_scalar("SELECT album_id FROM album_scores WHERE user_id = ?")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

    let statements = [
        "DELETE FROM comments WHERE user_id = ?",
        "DELETE FROM personal_comments WHERE author_id = ?",
        "DELETE FROM personal_comments WHERE personal_album_id IN
            (SELECT id FROM personal_albums WHERE owner_id = ?)",
        "DELETE FROM personal_albums WHERE owner_id = ?",
        "DELETE FROM posts WHERE author_id = ?",
        "DELETE FROM album_favorites WHERE user_id = ?",
        "DELETE FROM album_scores WHERE user_id = ?",
        "DELETE FROM users WHERE id = ?",
    ];
    for statement in statements {
        sqlx::query(statement).bind(id).execute(&mut *tx).await?;
    }

    for album_id in &scored {
        crate::scores::recompute_average(&mut *tx, album_id).await?;
    }

    tx.commit().await?;

    tracing::info!(
        user_id = %id,
        albums_rescored = scored.len(),
        "User deleted"
    );
    Ok(())
}

/// A member's favorites and ratings
pub async fn get_activity(pool: &SqlitePool, id: &UserId) -> Result<UserActivity> {
    if get_by_id(pool, id).await?.is_none() {
        return Err(ClubError::not_found("User", id.as_str()));
    }

    Ok(UserActivity {
        favorites: crate::favorites::get_for_user(pool, id).await?,
        ratings: crate::scores::get_ratings_for_user(pool, id).await?,
    })
}

/// Public profile with the member's personal albums
pub async fn get_profile(pool: &SqlitePool, id: &UserId) -> Result<Option<Profile>> {
    let Some(user) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    Ok(Some(Profile {
        personal_albums: crate::personal_albums::get_for_owner(pool, id).await?,
        user: PublicUser::from(user),
    }))
}
