//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! so migrations, constraints and indexes behave as in production.

#![allow(dead_code)]

use club_core::types::*;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = club_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        club_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a member account
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> User {
    club_storage::users::create(
        pool,
        CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            role: Role::User,
        },
    )
    .await
    .expect("Failed to create test user")
}

/// Test fixture: Create an album with an automatically assigned entry number
pub async fn create_test_album(pool: &SqlitePool, title: &str, artist: &str) -> Album {
    club_storage::albums::create(
        pool,
        CreateAlbum {
            title: title.to_string(),
            artist: artist.to_string(),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create test album")
}

/// Test fixture: Create an album with an explicit entry number
pub async fn create_numbered_album(pool: &SqlitePool, title: &str, number: i64) -> Album {
    club_storage::albums::create(
        pool,
        CreateAlbum {
            title: title.to_string(),
            artist: "Various Artists".to_string(),
            club_entry_number: Some(number),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to create numbered album")
}

/// Entry numbers of the catalog in entry order
pub async fn entry_numbers(pool: &SqlitePool) -> Vec<i64> {
    club_storage::albums::get_all(pool)
        .await
        .expect("Failed to list albums")
        .iter()
        .map(|album| album.club_entry_number)
        .collect()
}
