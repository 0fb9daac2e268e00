//! Song records as served by the catalog.

use serde::{Deserialize, Serialize};

use super::common::{ReleaseDate, SongId};

/// Marker carried by album names of synthetic multi-song bundles.
pub const COLLECTION_MARKER: &str = " - Collection";

/// A single track in the catalog.
///
/// Field names follow the catalog's JSON. Use
/// [`converters::parse_song`](crate::converters::parse_song) for payloads
/// that may contain `null` or mistyped fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Song {
    /// Catalog identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: SongId,

    /// Track title.
    pub title: String,

    /// Display name of the performing artist. Empty when unknown.
    pub artist: String,

    /// Credited authors.
    pub authors: Vec<String>,

    /// Display name of the album. Empty when unknown.
    pub album: String,

    /// Release date as sent by the catalog.
    pub release_date: String,

    /// Duration as sent by the catalog (e.g. "3:45").
    pub duration: String,

    /// Genre name.
    pub genre: String,

    /// Number of likes.
    pub likes: u64,

    /// Number of plays.
    pub plays: u64,

    /// Cover art URL.
    pub cover_url: String,

    /// Audio stream URL.
    pub audio_url: String,

    /// Album id on Spotify, if linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_id: Option<String>,

    /// Album id in the catalog, if linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Song {
    /// Whether the song belongs to a real album.
    ///
    /// Songs without an album name, or whose album is a synthetic
    /// collection, are not part of any album.
    pub fn has_album(&self) -> bool {
        !self.album.is_empty() && !self.album.contains(COLLECTION_MARKER)
    }

    /// Whether the song names a usable artist.
    pub fn has_artist(&self) -> bool {
        !self.artist.is_empty() && self.artist != "null" && self.artist != "undefined"
    }

    /// Parsed release date.
    pub fn release(&self) -> ReleaseDate {
        ReleaseDate::parse(&self.release_date)
    }

    /// Case-insensitive substring match on title, artist, album or genre.
    ///
    /// `term` must already be lowercase.
    pub fn matches(&self, term: &str) -> bool {
        [&self.title, &self.artist, &self.album, &self.genre]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
    }

    /// Whether `other` is a different song sharing this song's genre or artist.
    pub fn is_similar_to(&self, other: &Song) -> bool {
        other.id != self.id
            && ((!self.genre.is_empty() && other.genre == self.genre)
                || (!self.artist.is_empty() && other.artist == self.artist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, artist: &str, album: &str, genre: &str) -> Song {
        Song {
            id: id.into(),
            title: format!("Song {}", id),
            artist: artist.to_string(),
            album: album.to_string(),
            genre: genre.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_has_album() {
        assert!(song("1", "A", "Thriller", "").has_album());
        assert!(!song("1", "A", "", "").has_album());
        assert!(!song("1", "A", "Greatest Hits - Collection", "").has_album());
    }

    #[test]
    fn test_has_artist_rejects_stringified_nulls() {
        assert!(song("1", "Shakira", "", "").has_artist());
        assert!(!song("1", "null", "", "").has_artist());
        assert!(!song("1", "undefined", "", "").has_artist());
        assert!(!song("1", "", "", "").has_artist());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let s = song("1", "Héroes del Silencio", "Senderos de traición", "Rock");
        assert!(s.matches("héroes"));
        assert!(s.matches("rock"));
        assert!(s.matches("traición"));
        assert!(!s.matches("pop"));
    }

    #[test]
    fn test_is_similar_to() {
        let a = song("1", "Soda Stereo", "Canción Animal", "Rock");
        let b = song("2", "Soda Stereo", "Dynamo", "Alternativo");
        let c = song("3", "Maná", "Sueños Líquidos", "Rock");
        let d = song("4", "Juanes", "Mi Sangre", "Pop");
        assert!(a.is_similar_to(&b));
        assert!(a.is_similar_to(&c));
        assert!(!a.is_similar_to(&d));
        assert!(!a.is_similar_to(&a));
    }

    #[test]
    fn test_deserialize_wire_names() {
        let s: Song = serde_json::from_str(
            r#"{"_id":"abc","title":"T","artist":"A","album":"B","cover_url":"c.jpg","likes":3}"#,
        )
        .unwrap();
        assert_eq!(s.id, SongId::Text("abc".to_string()));
        assert_eq!(s.cover_url, "c.jpg");
        assert_eq!(s.likes, 3);
        assert!(s.authors.is_empty());
    }
}
