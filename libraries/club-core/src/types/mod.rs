mod album;
mod comment;
mod ids;
mod personal_album;
mod post;
mod sort;
mod user;

pub use album::{Album, AlbumSummary, AlbumView, CreateAlbum, ScoreEntry, UpdateAlbum};
pub use comment::{normalize_comment_text, Comment, PersonalComment};
pub use ids::{AlbumId, CommentId, PersonalAlbumId, PersonalCommentId, PostId, UserId};
pub use personal_album::{CreatePersonalAlbum, PersonalAlbum, UpdatePersonalAlbum};
pub use post::{CreatePost, Post, PostAuthor, UpdatePost};
pub use sort::AlbumSort;
pub use user::{
    Actor, CreateUser, Profile, ProfileSettings, PublicUser, RatingEntry, Role,
    UpdateProfileSettings, User, UserActivity,
};
