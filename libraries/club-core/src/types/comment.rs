//! Comment types for shared and personal albums

use super::{AlbumId, CommentId, PersonalAlbumId, PersonalCommentId, UserId};
use crate::error::{ClubError, Result};
use serde::{Deserialize, Serialize};

/// A member comment on a shared catalog album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub album_id: AlbumId,
    pub user_id: UserId,
    pub username: String,
    pub text: String,
    pub created_at: String,
}

/// A comment on someone's personal collection album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalComment {
    pub id: PersonalCommentId,
    pub personal_album_id: PersonalAlbumId,
    pub author_id: UserId,
    pub author_username: String,
    pub text: String,
    pub created_at: String,
}

/// Trim comment text, rejecting blank comments
pub fn normalize_comment_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClubError::invalid_input("Comment text is required"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_is_trimmed() {
        assert_eq!(normalize_comment_text("  great record \n").unwrap(), "great record");
    }

    #[test]
    fn blank_comment_is_rejected() {
        assert!(normalize_comment_text(" \t ").is_err());
    }
}
