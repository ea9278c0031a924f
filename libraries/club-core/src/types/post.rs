//! Deep-dive posts

use super::album::require_text;
use super::{PostId, UserId};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Author reference embedded in a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub id: UserId,
    pub username: String,
}

/// A long-form member post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: PostAuthor,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
}

impl CreatePost {
    pub fn validate(self) -> Result<Self> {
        let title = require_text(&self.title, "Title")?;
        // Content keeps its own whitespace; only emptiness is checked
        require_text(&self.content, "Content")?;
        Ok(Self {
            title,
            content: self.content,
        })
    }
}

/// Partial post update; blank fields keep the previous value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePost {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdatePost {
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title.filter(|t| !t.trim().is_empty()) {
            post.title = title.trim().to_string();
        }
        if let Some(content) = self.content.filter(|c| !c.trim().is_empty()) {
            post.content = content;
        }
    }
}
