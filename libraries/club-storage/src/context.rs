use crate::error::StorageError;
use crate::{
    albums, comments, create_pool, favorites, personal_albums, posts, run_migrations, scores,
    users,
};
use async_trait::async_trait;
use club_core::{error::Result, storage::StorageContext, types::*};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and bring the schema up to date
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = create_pool(database_url)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Albums
    async fn list_albums(
        &self,
        sort: AlbumSort,
        viewer: Option<&UserId>,
    ) -> Result<Vec<AlbumView>> {
        albums::list_views(&self.pool, sort, viewer).await
    }

    async fn get_album_view(
        &self,
        id: &AlbumId,
        viewer: Option<&UserId>,
    ) -> Result<Option<AlbumView>> {
        albums::get_view(&self.pool, id, viewer).await
    }

    async fn get_album(&self, id: &AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    async fn create_album(&self, album: CreateAlbum) -> Result<Album> {
        albums::create(&self.pool, album).await
    }

    async fn update_album(&self, id: &AlbumId, update: UpdateAlbum) -> Result<Album> {
        albums::update(&self.pool, id, update).await
    }

    async fn set_club_score(&self, id: &AlbumId, score: f64) -> Result<Album> {
        albums::set_club_score(&self.pool, id, score).await
    }

    async fn delete_album(&self, id: &AlbumId) -> Result<()> {
        albums::delete(&self.pool, id).await
    }

    async fn fix_entry_numbers(&self) -> Result<Vec<Album>> {
        albums::fix_entry_numbers(&self.pool).await
    }

    // Scores & favorites
    async fn submit_score(
        &self,
        album_id: &AlbumId,
        user_id: &UserId,
        score: f64,
    ) -> Result<Album> {
        scores::submit(&self.pool, album_id, user_id, score).await
    }

    async fn favorite_album(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        favorites::add(&self.pool, album_id, user_id).await
    }

    async fn unfavorite_album(&self, album_id: &AlbumId, user_id: &UserId) -> Result<()> {
        favorites::remove(&self.pool, album_id, user_id).await
    }

    // Album comments
    async fn get_album_comments(&self, album_id: &AlbumId) -> Result<Vec<Comment>> {
        comments::get_for_album(&self.pool, album_id).await
    }

    async fn add_album_comment(
        &self,
        album_id: &AlbumId,
        user_id: &UserId,
        text: &str,
    ) -> Result<Comment> {
        comments::create(&self.pool, album_id, user_id, text).await
    }

    // Users
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        users::find_by_email(&self.pool, email).await
    }

    async fn get_password_hash(&self, id: &UserId) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, id).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    async fn update_profile_settings(
        &self,
        id: &UserId,
        update: UpdateProfileSettings,
    ) -> Result<ProfileSettings> {
        users::update_profile_settings(&self.pool, id, update).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<()> {
        users::delete(&self.pool, id).await
    }

    async fn get_user_activity(&self, id: &UserId) -> Result<UserActivity> {
        users::get_activity(&self.pool, id).await
    }

    async fn get_profile(&self, id: &UserId) -> Result<Option<Profile>> {
        users::get_profile(&self.pool, id).await
    }

    // Personal collection
    async fn create_personal_album(
        &self,
        owner: &UserId,
        album: CreatePersonalAlbum,
    ) -> Result<PersonalAlbum> {
        personal_albums::create(&self.pool, owner, album).await
    }

    async fn get_personal_album(&self, id: &PersonalAlbumId) -> Result<Option<PersonalAlbum>> {
        personal_albums::get_by_id(&self.pool, id).await
    }

    async fn update_personal_album(
        &self,
        id: &PersonalAlbumId,
        actor: &Actor,
        update: UpdatePersonalAlbum,
    ) -> Result<PersonalAlbum> {
        personal_albums::update(&self.pool, id, actor, update).await
    }

    async fn delete_personal_album(&self, id: &PersonalAlbumId, actor: &Actor) -> Result<()> {
        personal_albums::delete(&self.pool, id, actor).await
    }

    async fn get_personal_comments(&self, id: &PersonalAlbumId) -> Result<Vec<PersonalComment>> {
        personal_albums::get_comments(&self.pool, id).await
    }

    async fn add_personal_comment(
        &self,
        id: &PersonalAlbumId,
        author: &UserId,
        text: &str,
    ) -> Result<PersonalComment> {
        personal_albums::add_comment(&self.pool, id, author, text).await
    }

    // Posts
    async fn create_post(&self, author: &UserId, post: CreatePost) -> Result<Post> {
        posts::create(&self.pool, author, post).await
    }

    async fn get_posts(&self) -> Result<Vec<Post>> {
        posts::get_all(&self.pool).await
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>> {
        posts::get_by_id(&self.pool, id).await
    }

    async fn update_post(&self, id: &PostId, actor: &Actor, update: UpdatePost) -> Result<Post> {
        posts::update(&self.pool, id, actor, update).await
    }

    async fn delete_post(&self, id: &PostId, actor: &Actor) -> Result<()> {
        posts::delete(&self.pool, id, actor).await
    }
}
