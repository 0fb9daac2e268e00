//! Album summaries derived from song records.

use serde::{Deserialize, Serialize};

use super::song::Song;

/// Deduplicated view of one album.
///
/// Built by [`albums_from_songs`](crate::aggregate::albums_from_songs) from
/// every song sharing the same album and artist, or returned as-is by the
/// catalog's album endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Synthetic key in the form `album-artist`.
    pub id: String,

    /// Album title.
    pub title: String,

    /// Display artist name.
    pub artist: String,

    /// Cover image URL.
    #[serde(default)]
    pub cover_url: String,

    /// Release date of the first song seen for this album.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Number of songs grouped under this album.
    #[serde(default)]
    pub songs_count: usize,
}

impl Album {
    /// Start a summary from the first song seen for an album.
    pub fn from_first_song(song: &Song) -> Self {
        Self {
            id: Self::key_id(&song.album, &song.artist),
            title: song.album.clone(),
            artist: song.artist.clone(),
            cover_url: song.cover_url.clone(),
            release_date: Some(song.release_date.clone()).filter(|d| !d.is_empty()),
            songs_count: 1,
        }
    }

    /// Display id for an `(album, artist)` pair.
    pub fn key_id(album: &str, artist: &str) -> String {
        format!("{}-{}", album, artist)
    }

    /// Case-insensitive substring match on title or artist.
    ///
    /// `term` must already be lowercase.
    pub fn matches(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term) || self.artist.to_lowercase().contains(term)
    }
}
