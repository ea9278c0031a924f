//! Integration tests for the album catalog slice
//!
//! Covers entry-number assignment and repair, metadata edits, the club score,
//! sorted listings and cascade deletion.

mod test_helpers;

use club_core::types::*;
use club_core::ClubError;
use test_helpers::*;

// ============================================================================
// Entry numbers
// ============================================================================

#[tokio::test]
async fn test_entry_numbers_follow_creation_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for (i, title) in ["Blue", "Hejira", "Court and Spark", "Ladies of the Canyon"]
        .iter()
        .enumerate()
    {
        let album = create_test_album(pool, title, "Joni Mitchell").await;
        assert_eq!(album.club_entry_number, i as i64 + 1);
        assert_eq!(album.average_user_score, 0.0);
    }

    assert_eq!(entry_numbers(pool).await, vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn test_explicit_entry_number_is_kept_and_next_follows_max() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_numbered_album(pool, "Remain in Light", 10).await;
    assert_eq!(album.club_entry_number, 10);

    let next = create_test_album(pool, "Fear of Music", "Talking Heads").await;
    assert_eq!(next.club_entry_number, 11);
}

#[tokio::test]
async fn test_duplicate_entry_number_is_rejected() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_numbered_album(pool, "Marquee Moon", 3).await;

    let result = club_storage::albums::create(
        pool,
        CreateAlbum {
            title: "Adventure".to_string(),
            artist: "Television".to_string(),
            club_entry_number: Some(3),
            ..Default::default()
        },
    )
    .await;

    assert!(matches!(result, Err(ClubError::Duplicate(_))));
    assert_eq!(entry_numbers(pool).await, vec![3]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creations_get_distinct_numbers() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool().clone();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                club_storage::albums::create(
                    &pool,
                    CreateAlbum {
                        title: format!("Session {i}"),
                        artist: "The Band".to_string(),
                        ..Default::default()
                    },
                )
                .await
            })
        })
        .collect();

    for handle in handles {
        handle
            .await
            .expect("Task panicked")
            .expect("Failed to create album");
    }

    assert_eq!(entry_numbers(&pool).await, (1..=8_i64).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_fix_entry_numbers_closes_gaps_in_order() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let first = create_numbered_album(pool, "First", 1).await;
    let third = create_numbered_album(pool, "Third", 3).await;
    let fourth = create_numbered_album(pool, "Fourth", 4).await;

    let repaired = club_storage::albums::fix_entry_numbers(pool)
        .await
        .expect("Failed to repair entry numbers");

    let order: Vec<(AlbumId, i64)> = repaired
        .iter()
        .map(|album| (album.id.clone(), album.club_entry_number))
        .collect();
    assert_eq!(
        order,
        vec![(first.id, 1), (third.id, 2), (fourth.id, 3)]
    );
}

#[tokio::test]
async fn test_fix_entry_numbers_on_dense_catalog_changes_nothing() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let album = create_test_album(pool, "Horses", "Patti Smith").await;

    let repaired = club_storage::albums::fix_entry_numbers(pool)
        .await
        .expect("Failed to repair entry numbers");

    assert_eq!(repaired.len(), 1);
    assert_eq!(repaired[0].club_entry_number, 1);
    assert_eq!(repaired[0].updated_at, album.updated_at);
}

// ============================================================================
// Deletion
// ============================================================================

#[tokio::test]
async fn test_delete_album_removes_comments_and_keeps_other_numbers() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let user = create_test_user(pool, "listener").await;

    let a = create_test_album(pool, "A", "Artist").await;
    let b = create_test_album(pool, "B", "Artist").await;
    let c = create_test_album(pool, "C", "Artist").await;

    club_storage::comments::create(pool, &b.id, &user.id, "Side two is perfect")
        .await
        .expect("Failed to comment");
    club_storage::scores::submit(pool, &b.id, &user.id, 8.0)
        .await
        .expect("Failed to score");
    club_storage::favorites::add(pool, &b.id, &user.id)
        .await
        .expect("Failed to favorite");

    club_storage::albums::delete(pool, &b.id)
        .await
        .expect("Failed to delete album");

    assert!(club_storage::albums::get_by_id(pool, &b.id)
        .await
        .expect("Failed to query album")
        .is_none());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE album_id = ?")
        .bind(&b.id)
        .fetch_one(pool)
        .await
        .expect("Failed to count comments");
    assert_eq!(remaining, 0);

    let activity = club_storage::users::get_activity(pool, &user.id)
        .await
        .expect("Failed to load activity");
    assert!(activity.favorites.is_empty());
    assert!(activity.ratings.is_empty());

    let numbers: Vec<(AlbumId, i64)> = club_storage::albums::get_all(pool)
        .await
        .expect("Failed to list albums")
        .into_iter()
        .map(|album| (album.id, album.club_entry_number))
        .collect();
    assert_eq!(numbers, vec![(a.id, 1), (c.id, 3)]);
}

#[tokio::test]
async fn test_delete_missing_album_is_not_found() {
    let test_db = TestDb::new().await;

    let result = club_storage::albums::delete(test_db.pool(), &AlbumId::generate()).await;
    assert!(matches!(result, Err(ClubError::NotFound { .. })));
}

// ============================================================================
// Metadata and club score
// ============================================================================

#[tokio::test]
async fn test_update_album_metadata() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let album = create_test_album(pool, "Pet Sounds", "The Beach Boys").await;

    let updated = club_storage::albums::update(
        pool,
        &album.id,
        UpdateAlbum {
            release_year: Some(Some(1966)),
            genre: Some(vec!["Pop".to_string(), "Baroque pop".to_string()]),
            trivia: Some("Recorded at Western Studios".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("Failed to update album");

    assert_eq!(updated.title, "Pet Sounds");
    assert_eq!(updated.club_entry_number, album.club_entry_number);

    let stored = club_storage::albums::get_by_id(pool, &album.id)
        .await
        .expect("Failed to query album")
        .expect("Album not found");
    assert_eq!(stored.release_year, Some(1966));
    assert_eq!(stored.genre, vec!["Pop", "Baroque pop"]);
    assert_eq!(stored.trivia.as_deref(), Some("Recorded at Western Studios"));
}

#[tokio::test]
async fn test_set_club_score_validates_range() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let album = create_test_album(pool, "Loveless", "My Bloody Valentine").await;

    let scored = club_storage::albums::set_club_score(pool, &album.id, 9.5)
        .await
        .expect("Failed to set club score");
    assert_eq!(scored.club_original_score, Some(9.5));

    let result = club_storage::albums::set_club_score(pool, &album.id, 10.5).await;
    assert!(matches!(result, Err(ClubError::InvalidInput(_))));

    let missing = club_storage::albums::set_club_score(pool, &AlbumId::generate(), 5.0).await;
    assert!(matches!(missing, Err(ClubError::NotFound { .. })));
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_listing_sorts_and_breaks_ties_on_entry_number() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let b = create_test_album(pool, "Bitches Brew", "Miles Davis").await;
    let a = create_test_album(pool, "A Love Supreme", "John Coltrane").await;
    let k = create_test_album(pool, "Kind of Blue", "Miles Davis").await;

    let by_artist = club_storage::albums::list_views(pool, AlbumSort::ArtistAsc, None)
        .await
        .expect("Failed to list albums");
    let ids: Vec<&AlbumId> = by_artist.iter().map(|view| &view.album.id).collect();
    assert_eq!(ids, vec![&a.id, &b.id, &k.id]);

    let by_title_desc = club_storage::albums::list_views(pool, AlbumSort::TitleDesc, None)
        .await
        .expect("Failed to list albums");
    let titles: Vec<&str> = by_title_desc
        .iter()
        .map(|view| view.album.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Kind of Blue", "Bitches Brew", "A Love Supreme"]);

    let newest_entry_first = club_storage::albums::list_views(pool, AlbumSort::EntryNumberDesc, None)
        .await
        .expect("Failed to list albums");
    assert_eq!(newest_entry_first[0].album.id, k.id);
}

#[tokio::test]
async fn test_listing_joins_viewer_data() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();
    let alice = create_test_user(pool, "alice").await;
    let bob = create_test_user(pool, "bob").await;
    let album = create_test_album(pool, "Spirit of Eden", "Talk Talk").await;

    club_storage::scores::submit(pool, &album.id, &alice.id, 9.0)
        .await
        .expect("Failed to score");
    club_storage::scores::submit(pool, &album.id, &bob.id, 7.0)
        .await
        .expect("Failed to score");
    club_storage::favorites::add(pool, &album.id, &alice.id)
        .await
        .expect("Failed to favorite");
    club_storage::comments::create(pool, &album.id, &bob.id, "Slow burner")
        .await
        .expect("Failed to comment");

    let views = club_storage::albums::list_views(pool, AlbumSort::default(), Some(&alice.id))
        .await
        .expect("Failed to list albums");
    let view = &views[0];

    assert_eq!(view.album.average_user_score, 8.0);
    assert_eq!(view.scores.len(), 2);
    assert_eq!(view.scores[0].username, "alice");
    assert_eq!(view.favorite_count, 1);
    assert_eq!(view.comment_count, 1);
    assert_eq!(view.my_score, Some(9.0));
    assert!(view.is_favorited);

    let as_bob = club_storage::albums::get_view(pool, &album.id, Some(&bob.id))
        .await
        .expect("Failed to load view")
        .expect("Album not found");
    assert_eq!(as_bob.my_score, Some(7.0));
    assert!(!as_bob.is_favorited);

    let anonymous = club_storage::albums::get_view(pool, &album.id, None)
        .await
        .expect("Failed to load view")
        .expect("Album not found");
    assert_eq!(anonymous.my_score, None);
    assert_eq!(anonymous.comment_count, 1);
}
