//! Shared catalog album types

use super::{AlbumId, UserId};
use crate::error::{ClubError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// An album in the club's shared catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
    pub genre: Vec<String>,
    pub cover_art_url: Option<String>,
    /// Id of the album in the external metadata service it was imported from
    pub external_id: Option<String>,
    pub trivia: Option<String>,
    pub club_entry_number: i64,
    /// Administrator-assigned score, 0-10
    pub club_original_score: Option<f64>,
    /// Mean of all member scores rounded to one decimal, 0 when unscored
    pub average_user_score: f64,
    pub date_added: String,
    pub updated_at: String,
}

/// Data for creating a new album
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub cover_art_url: Option<String>,
    #[serde(default, alias = "spotifyId", alias = "spotify_id")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub trivia: Option<String>,
    /// Explicit entry number; assigned as max+1 when absent
    #[serde(default)]
    pub club_entry_number: Option<i64>,
    #[serde(default)]
    pub club_original_score: Option<f64>,
}

impl CreateAlbum {
    /// Trim required fields and check ranges
    pub fn validate(mut self) -> Result<Self> {
        self.title = require_text(&self.title, "Title")?;
        self.artist = require_text(&self.artist, "Artist")?;

        if let Some(number) = self.club_entry_number {
            if number < 1 {
                return Err(ClubError::invalid_input(
                    "Club entry number must be a positive integer",
                ));
            }
        }

        if let Some(score) = self.club_original_score {
            crate::scoring::validate_score(score)?;
        }

        Ok(self)
    }
}

/// Metadata an administrator may edit after creation
///
/// The entry number is deliberately absent: it only changes through the
/// repair operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAlbum {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    /// `None` keeps the year, `Some(None)` (an explicit `null`) clears it
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_year: Option<Option<i32>>,
    #[serde(default)]
    pub genre: Option<Vec<String>>,
    #[serde(default)]
    pub trivia: Option<String>,
    #[serde(default)]
    pub cover_art_url: Option<String>,
}

impl UpdateAlbum {
    /// Trim supplied required fields, rejecting blanks
    pub fn validate(mut self) -> Result<Self> {
        if let Some(title) = self.title.as_deref() {
            self.title = Some(require_text(title, "Title")?);
        }
        if let Some(artist) = self.artist.as_deref() {
            self.artist = Some(require_text(artist, "Artist")?);
        }
        Ok(self)
    }

    /// Apply the supplied fields onto an album
    pub fn apply_to(self, album: &mut Album) {
        if let Some(title) = self.title {
            album.title = title;
        }
        if let Some(artist) = self.artist {
            album.artist = artist;
        }
        if let Some(release_year) = self.release_year {
            album.release_year = release_year;
        }
        if let Some(genre) = self.genre {
            album.genre = genre;
        }
        if self.trivia.is_some() {
            album.trivia = self.trivia;
        }
        if self.cover_art_url.is_some() {
            album.cover_art_url = self.cover_art_url;
        }
    }
}

/// Distinguish a field sent as `null` from one that was left out
fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A member's score as shown on an album
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub user_id: UserId,
    pub username: String,
    pub score: f64,
}

/// Denormalized album record served to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumView {
    #[serde(flatten)]
    pub album: Album,
    pub scores: Vec<ScoreEntry>,
    pub favorited_by: Vec<UserId>,
    pub favorite_count: usize,
    pub comment_count: i64,
    /// The requesting member's own score, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_score: Option<f64>,
    /// Whether the requesting member favorited the album
    pub is_favorited: bool,
}

impl AlbumView {
    /// Assemble a view, deriving the viewer-specific fields
    pub fn assemble(
        album: Album,
        scores: Vec<ScoreEntry>,
        favorited_by: Vec<UserId>,
        comment_count: i64,
        viewer: Option<&UserId>,
    ) -> Self {
        let my_score = viewer.and_then(|viewer| {
            scores
                .iter()
                .find(|entry| &entry.user_id == viewer)
                .map(|entry| entry.score)
        });
        let is_favorited = viewer.is_some_and(|viewer| favorited_by.contains(viewer));

        Self {
            album,
            favorite_count: favorited_by.len(),
            scores,
            favorited_by,
            comment_count,
            my_score,
            is_favorited,
        }
    }
}

/// Compact album reference used in activity feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    pub release_year: Option<i32>,
    pub cover_art_url: Option<String>,
}

impl From<&Album> for AlbumSummary {
    fn from(album: &Album) -> Self {
        Self {
            id: album.id.clone(),
            title: album.title.clone(),
            artist: album.artist.clone(),
            release_year: album.release_year,
            cover_art_url: album.cover_art_url.clone(),
        }
    }
}

pub(crate) fn require_text(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClubError::invalid_input(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
