//! Integration tests for accounts, activity and account removal

mod test_helpers;

use club_core::types::*;
use club_core::ClubError;
use test_helpers::*;

fn new_user(username: &str, email: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
        role: Role::User,
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[tokio::test]
async fn test_create_user_normalizes_and_applies_defaults() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let user = club_storage::users::create(pool, new_user(" mara ", " Mara@Example.com "))
        .await
        .expect("Failed to create user");

    assert_eq!(user.username, "mara");
    assert_eq!(user.email, "mara@example.com");
    assert_eq!(user.role, Role::User);
    assert_eq!(user.profile_settings, ProfileSettings::default());

    let found = club_storage::users::find_by_email(pool, "MARA@example.com")
        .await
        .expect("Failed to look up user")
        .expect("User not found");
    assert_eq!(found.id, user.id);

    let hash = club_storage::users::get_password_hash(pool, &user.id)
        .await
        .expect("Failed to load hash");
    assert_eq!(hash.as_deref(), Some("hash"));
}

#[tokio::test]
async fn test_duplicate_email_or_username_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    club_storage::users::create(pool, new_user("mara", "mara@example.com"))
        .await
        .expect("Failed to create user");

    let same_email = club_storage::users::create(pool, new_user("other", "MARA@example.com")).await;
    assert!(matches!(same_email, Err(ClubError::Duplicate(_))));

    let same_name = club_storage::users::create(pool, new_user("mara", "else@example.com")).await;
    assert!(matches!(same_name, Err(ClubError::Duplicate(_))));

    let users = club_storage::users::get_all(pool)
        .await
        .expect("Failed to list users");
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_update_profile_settings_merges_fields() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "painter").await;

    let settings = club_storage::users::update_profile_settings(
        pool,
        &user.id,
        UpdateProfileSettings {
            accent_color: Some("#00ff00".to_string()),
            text_color: Some(String::new()),
            background_image_url: Some("https://example.com/wall.jpg".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to update settings");

    assert_eq!(settings.accent_color, "#00ff00");
    assert_eq!(settings.text_color, "#e2e8f0");

    let stored = club_storage::users::get_by_id(pool, &user.id)
        .await
        .expect("Failed to load user")
        .expect("User not found");
    assert_eq!(stored.profile_settings, settings);
}

// ============================================================================
// Activity and profiles
// ============================================================================

#[tokio::test]
async fn test_activity_lists_favorites_and_ratings() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "collector").await;
    let older = create_test_album(pool, "Older", "Band").await;
    let newer = create_test_album(pool, "Newer", "Band").await;

    club_storage::scores::submit(pool, &older.id, &user.id, 6.0)
        .await
        .expect("Failed to score");
    club_storage::scores::submit(pool, &newer.id, &user.id, 9.0)
        .await
        .expect("Failed to score");
    club_storage::favorites::add(pool, &older.id, &user.id)
        .await
        .expect("Failed to favorite");

    let activity = club_storage::users::get_activity(pool, &user.id)
        .await
        .expect("Failed to load activity");

    assert_eq!(activity.favorites.len(), 1);
    assert_eq!(activity.favorites[0].id, older.id);
    assert_eq!(activity.ratings.len(), 2);
    assert_eq!(activity.ratings[0].album.id, newer.id);
    assert_eq!(activity.ratings[0].score, 9.0);

    let missing = club_storage::users::get_activity(pool, &UserId::generate()).await;
    assert!(matches!(missing, Err(ClubError::NotFound { .. })));
}

#[tokio::test]
async fn test_profile_includes_personal_albums() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "digger").await;

    club_storage::personal_albums::create(
        pool,
        &user.id,
        CreatePersonalAlbum {
            title: "Rare Groove".to_string(),
            artist: "Unknown".to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create personal album");

    let profile = club_storage::users::get_profile(pool, &user.id)
        .await
        .expect("Failed to load profile")
        .expect("Profile not found");
    assert_eq!(profile.user.username, "digger");
    assert_eq!(profile.personal_albums.len(), 1);

    let json = serde_json::to_value(&profile).expect("Failed to serialize profile");
    assert!(json["user"].get("email").is_none());
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
async fn test_delete_user_removes_content_and_recomputes_averages() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let leaving = create_test_user(pool, "leaving").await;
    let staying = create_test_user(pool, "staying").await;
    let album = create_test_album(pool, "Astral Weeks", "Van Morrison").await;

    club_storage::scores::submit(pool, &album.id, &leaving.id, 2.0)
        .await
        .expect("Failed to score");
    let before = club_storage::scores::submit(pool, &album.id, &staying.id, 9.0)
        .await
        .expect("Failed to score");
    assert_eq!(before.average_user_score, 5.5);

    club_storage::favorites::add(pool, &album.id, &leaving.id)
        .await
        .expect("Failed to favorite");
    club_storage::comments::create(pool, &album.id, &leaving.id, "Not for me")
        .await
        .expect("Failed to comment");
    let personal = club_storage::personal_albums::create(
        pool,
        &leaving.id,
        CreatePersonalAlbum {
            title: "Mixtape".to_string(),
            artist: "Me".to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create personal album");
    club_storage::personal_albums::add_comment(pool, &personal.id, &staying.id, "Nice tape")
        .await
        .expect("Failed to comment");
    club_storage::posts::create(
        pool,
        &leaving.id,
        CreatePost {
            title: "Goodbye".to_string(),
            content: "So long".to_string(),
        },
    )
    .await
    .expect("Failed to create post");

    club_storage::users::delete(pool, &leaving.id)
        .await
        .expect("Failed to delete user");

    assert!(club_storage::users::get_by_id(pool, &leaving.id)
        .await
        .expect("Failed to query user")
        .is_none());

    let view = club_storage::albums::get_view(pool, &album.id, None)
        .await
        .expect("Failed to load album")
        .expect("Album not found");
    assert_eq!(view.album.average_user_score, 9.0);
    assert_eq!(view.scores.len(), 1);
    assert_eq!(view.favorite_count, 0);
    assert_eq!(view.comment_count, 0);

    assert!(club_storage::personal_albums::get_by_id(pool, &personal.id)
        .await
        .expect("Failed to query personal album")
        .is_none());
    assert!(club_storage::posts::get_all(pool)
        .await
        .expect("Failed to list posts")
        .is_empty());
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let test_db = TestDb::new().await;

    let result = club_storage::users::delete(test_db.pool(), &UserId::generate()).await;
    assert!(matches!(result, Err(ClubError::NotFound { .. })));
}
