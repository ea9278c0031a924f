//! Personal collection albums

use super::album::require_text;
use super::{PersonalAlbumId, UserId};
use crate::error::Result;
use crate::scoring::validate_score;
use serde::{Deserialize, Serialize};

/// A member-owned entry in their private collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalAlbum {
    pub id: PersonalAlbumId,
    pub owner_id: UserId,
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
    pub cover_art_url: Option<String>,
    /// Owner's own rating, 0-10
    pub user_rating: Option<f64>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a personal album
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePersonalAlbum {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub cover_art_url: Option<String>,
    #[serde(default)]
    pub user_rating: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CreatePersonalAlbum {
    pub fn validate(mut self) -> Result<Self> {
        self.title = require_text(&self.title, "Title")?;
        self.artist = require_text(&self.artist, "Artist")?;
        if let Some(rating) = self.user_rating {
            validate_score(rating)?;
        }
        Ok(self)
    }
}

/// Partial update of a personal album
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePersonalAlbum {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub cover_art_url: Option<String>,
    #[serde(default)]
    pub user_rating: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl UpdatePersonalAlbum {
    /// Merge onto an existing album; blank title/artist keep the old value
    pub fn apply_to(self, album: &mut PersonalAlbum) -> Result<()> {
        if let Some(rating) = self.user_rating {
            validate_score(rating)?;
            album.user_rating = Some(rating);
        }
        if let Some(title) = self.title.filter(|t| !t.trim().is_empty()) {
            album.title = title.trim().to_string();
        }
        if let Some(artist) = self.artist.filter(|a| !a.trim().is_empty()) {
            album.artist = artist.trim().to_string();
        }
        if self.release_year.is_some() {
            album.release_year = self.release_year;
        }
        if self.cover_art_url.is_some() {
            album.cover_art_url = self.cover_art_url;
        }
        if self.notes.is_some() {
            album.notes = self.notes;
        }
        Ok(())
    }
}
