//! Storage trait for the club catalog and community data

use crate::error::Result;
use crate::types::{
    Actor, Album, AlbumId, AlbumSort, AlbumView, Comment, CreateAlbum, CreatePersonalAlbum,
    CreatePost, CreateUser, PersonalAlbum, PersonalAlbumId, PersonalComment, Post, PostId,
    Profile, ProfileSettings, UpdateAlbum, UpdatePersonalAlbum, UpdatePost,
    UpdateProfileSettings, User, UserActivity, UserId,
};
use async_trait::async_trait;

/// Storage context providing access to database operations
///
/// Every operation that acts on behalf of a member takes that member's id
/// (or `Actor`) explicitly; implementations hold no notion of a current user.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Album catalog
    // ========================================================================

    /// List albums in the given order, joined with scores, favorites and
    /// comment counts. `viewer` fills in the per-member fields.
    async fn list_albums(&self, sort: AlbumSort, viewer: Option<&UserId>)
        -> Result<Vec<AlbumView>>;

    /// Get a single album view
    async fn get_album_view(&self, id: &AlbumId, viewer: Option<&UserId>)
        -> Result<Option<AlbumView>>;

    /// Get the bare album record
    async fn get_album(&self, id: &AlbumId) -> Result<Option<Album>>;

    /// Create an album, assigning the next entry number unless one is given
    async fn create_album(&self, album: CreateAlbum) -> Result<Album>;

    /// Edit album metadata
    async fn update_album(&self, id: &AlbumId, update: UpdateAlbum) -> Result<Album>;

    /// Set the administrator club score
    async fn set_club_score(&self, id: &AlbumId, score: f64) -> Result<Album>;

    /// Delete an album and its comments; other entry numbers are untouched
    async fn delete_album(&self, id: &AlbumId) -> Result<()>;

    /// Rewrite entry numbers to `1..N`, returning the catalog in entry order
    async fn fix_entry_numbers(&self) -> Result<Vec<Album>>;

    // ========================================================================
    // Scores & favorites
    // ========================================================================

    /// Insert or replace a member's score and recompute the average
    async fn submit_score(&self, album_id: &AlbumId, user_id: &UserId, score: f64)
        -> Result<Album>;

    /// Add the member to the album's favorites (idempotent)
    async fn favorite_album(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()>;

    /// Remove the member from the album's favorites (idempotent)
    async fn unfavorite_album(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()>;

    // ========================================================================
    // Album comments
    // ========================================================================

    /// Comments on an album, newest first
    async fn get_album_comments(&self, album_id: &AlbumId) -> Result<Vec<Comment>>;

    /// Add a comment to an album
    async fn add_album_comment(&self, album_id: &AlbumId, user_id: &UserId, text: &str)
        -> Result<Comment>;

    // ========================================================================
    // Users
    // ========================================================================

    /// Create an account
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Find a user by (normalized) email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Stored bcrypt hash for a user
    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>>;

    /// Get all users
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Update a member's own profile settings
    async fn update_profile_settings(&self, id: &UserId, update: UpdateProfileSettings)
        -> Result<ProfileSettings>;

    /// Delete a user and everything they own, fixing affected averages
    async fn delete_user(&self, id: &UserId) -> Result<()>;

    /// A member's favorites and ratings
    async fn get_user_activity(&self, id: &UserId) -> Result<UserActivity>;

    /// Public profile with personal albums
    async fn get_profile(&self, id: &UserId) -> Result<Option<Profile>>;

    // ========================================================================
    // Personal collection
    // ========================================================================

    /// Create a personal album owned by `owner`
    async fn create_personal_album(&self, owner: &UserId, album: CreatePersonalAlbum)
        -> Result<PersonalAlbum>;

    /// Get a personal album
    async fn get_personal_album(&self, id: &PersonalAlbumId) -> Result<Option<PersonalAlbum>>;

    /// Update a personal album (owner only)
    async fn update_personal_album(
        &self,
        id: &PersonalAlbumId,
        actor: &Actor,
        update: UpdatePersonalAlbum,
    ) -> Result<PersonalAlbum>;

    /// Delete a personal album and its comments (owner only)
    async fn delete_personal_album(&self, id: &PersonalAlbumId, actor: &Actor) -> Result<()>;

    /// Comments on a personal album, newest first
    async fn get_personal_comments(&self, id: &PersonalAlbumId) -> Result<Vec<PersonalComment>>;

    /// Comment on a personal album
    async fn add_personal_comment(&self, id: &PersonalAlbumId, author: &UserId, text: &str)
        -> Result<PersonalComment>;

    // ========================================================================
    // Posts
    // ========================================================================

    /// Publish a post
    async fn create_post(&self, author: &UserId, post: CreatePost) -> Result<Post>;

    /// All posts, newest first
    async fn get_posts(&self) -> Result<Vec<Post>>;

    /// Get a post
    async fn get_post(&self, id: &PostId) -> Result<Option<Post>>;

    /// Edit a post (author or admin)
    async fn update_post(&self, id: &PostId, actor: &Actor, update: UpdatePost) -> Result<Post>;

    /// Delete a post (author or admin)
    async fn delete_post(&self, id: &PostId, actor: &Actor) -> Result<()>;
}
