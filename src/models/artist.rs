//! Artist records.

use serde::{Deserialize, Serialize};

use super::song::Song;

/// An artist as listed by the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// Catalog identifier.
    pub id: String,

    /// Artist name.
    pub name: String,

    /// Picture URL.
    #[serde(default)]
    pub image_url: String,

    /// Genres associated with the artist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,

    /// Popularity score, if the catalog tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
}

impl Artist {
    /// Derive an artist entry from a song, using the song cover as picture.
    pub fn from_song(song: &Song) -> Self {
        Self {
            id: song.artist.clone(),
            name: song.artist.clone(),
            image_url: song.cover_url.clone(),
            ..Default::default()
        }
    }

    /// Case-insensitive substring match on the name.
    ///
    /// `term` must already be lowercase.
    pub fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
    }
}
