//! Album listing sort keys

use crate::error::{ClubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort order accepted by the album listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlbumSort {
    /// Club entry number, oldest entry first
    #[default]
    #[serde(rename = "added_asc")]
    EntryNumberAsc,
    #[serde(rename = "added_desc")]
    EntryNumberDesc,
    DateAddedAsc,
    DateAddedDesc,
    ArtistAsc,
    ArtistDesc,
    TitleAsc,
    TitleDesc,
    YearAsc,
    YearDesc,
    ClubScoreAsc,
    ClubScoreDesc,
}

impl AlbumSort {
    pub const ALL: [AlbumSort; 12] = [
        AlbumSort::EntryNumberAsc,
        AlbumSort::EntryNumberDesc,
        AlbumSort::DateAddedAsc,
        AlbumSort::DateAddedDesc,
        AlbumSort::ArtistAsc,
        AlbumSort::ArtistDesc,
        AlbumSort::TitleAsc,
        AlbumSort::TitleDesc,
        AlbumSort::YearAsc,
        AlbumSort::YearDesc,
        AlbumSort::ClubScoreAsc,
        AlbumSort::ClubScoreDesc,
    ];

    /// Query-string key for this order
    pub fn key(self) -> &'static str {
        match self {
            AlbumSort::EntryNumberAsc => "added_asc",
            AlbumSort::EntryNumberDesc => "added_desc",
            AlbumSort::DateAddedAsc => "date_added_asc",
            AlbumSort::DateAddedDesc => "date_added_desc",
            AlbumSort::ArtistAsc => "artist_asc",
            AlbumSort::ArtistDesc => "artist_desc",
            AlbumSort::TitleAsc => "title_asc",
            AlbumSort::TitleDesc => "title_desc",
            AlbumSort::YearAsc => "year_asc",
            AlbumSort::YearDesc => "year_desc",
            AlbumSort::ClubScoreAsc => "club_score_asc",
            AlbumSort::ClubScoreDesc => "club_score_desc",
        }
    }

    /// Resolve an optional query value, falling back to entry-number order
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// SQL `ORDER BY` body for the `albums` table aliased as `a`
    ///
    /// Ties always break on entry number so the order is total.
    pub fn order_by(self) -> &'static str {
        match self {
            AlbumSort::EntryNumberAsc => "a.club_entry_number ASC",
            AlbumSort::EntryNumberDesc => "a.club_entry_number DESC",
            AlbumSort::DateAddedAsc => "a.date_added ASC, a.club_entry_number ASC",
            AlbumSort::DateAddedDesc => "a.date_added DESC, a.club_entry_number ASC",
            AlbumSort::ArtistAsc => "a.artist ASC, a.club_entry_number ASC",
            AlbumSort::ArtistDesc => "a.artist DESC, a.club_entry_number ASC",
            AlbumSort::TitleAsc => "a.title ASC, a.club_entry_number ASC",
            AlbumSort::TitleDesc => "a.title DESC, a.club_entry_number ASC",
            AlbumSort::YearAsc => "a.release_year ASC, a.club_entry_number ASC",
            AlbumSort::YearDesc => "a.release_year DESC, a.club_entry_number ASC",
            AlbumSort::ClubScoreAsc => "a.club_original_score ASC, a.club_entry_number ASC",
            AlbumSort::ClubScoreDesc => "a.club_original_score DESC, a.club_entry_number ASC",
        }
    }
}

impl FromStr for AlbumSort {
    type Err = ClubError;

    fn from_str(s: &str) -> Result<Self> {
        AlbumSort::ALL
            .into_iter()
            .find(|sort| sort.key() == s)
            .ok_or_else(|| ClubError::invalid_input(format!("Unknown sort key: {}", s)))
    }
}

impl fmt::Display for AlbumSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
