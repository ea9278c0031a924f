//! Listeners Club Core
//!
//! Storage-agnostic domain types, aggregate rules, traits and error handling
//! for the Listeners Club backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Album`, `User`, `Comment`, `PersonalAlbum`, `Post`, etc.
//! - **Aggregate Rules**: score averaging (`ScoreSheet`) and club entry numbering
//! - **Core Traits**: `StorageContext`, implemented by `club-storage`
//! - **Error Handling**: Unified `ClubError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use club_core::scoring::ScoreSheet;
//! use club_core::types::UserId;
//!
//! let mut sheet = ScoreSheet::default();
//! let alice = UserId::generate();
//! let bob = UserId::generate();
//!
//! sheet.upsert(alice.clone(), 7.0).unwrap();
//! sheet.upsert(bob, 8.5).unwrap();
//! assert_eq!(sheet.average(), 7.8);
//!
//! // Re-scoring replaces the previous value
//! sheet.upsert(alice, 9.0).unwrap();
//! assert_eq!(sheet.average(), 8.8);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod entry_numbers;
pub mod error;
pub mod scoring;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{ClubError, Result};
pub use storage::StorageContext;

pub use types::{
    // Ids
    AlbumId, CommentId, PersonalAlbumId, PersonalCommentId, PostId, UserId,
    // Albums
    Album, AlbumSort, AlbumSummary, AlbumView, CreateAlbum, ScoreEntry, UpdateAlbum,
    // Comments
    Comment, PersonalComment,
    // Users
    Actor, CreateUser, Profile, ProfileSettings, PublicUser, RatingEntry, Role,
    UpdateProfileSettings, User, UserActivity,
    // Personal collection
    CreatePersonalAlbum, PersonalAlbum, UpdatePersonalAlbum,
    // Posts
    CreatePost, Post, PostAuthor, UpdatePost,
};
