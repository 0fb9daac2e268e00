//! JSON to model converters.
//!
//! The catalog is loose about types: `null` shows up where strings are
//! expected and ids may be strings or numbers. These functions read raw
//! [`Value`]s leniently instead of failing the whole listing because of one
//! malformed record.

use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::models::{Album, Artist, Category, Genre, Song, SongId};

/// Artwork used for categories with neither an image nor genres.
pub const CATEGORY_PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=200";

/// Background gradients assigned to categories without a color.
pub const CATEGORY_GRADIENTS: [&str; 10] = [
    "from-pink-500 to-purple-500",
    "from-yellow-500 to-orange-500",
    "from-red-500 to-red-800",
    "from-blue-400 to-indigo-600",
    "from-purple-400 to-purple-800",
    "from-green-400 to-emerald-600",
    "from-amber-500 to-yellow-800",
    "from-gray-400 to-gray-700",
    "from-teal-400 to-cyan-600",
    "from-rose-400 to-pink-600",
];

/// Get string from JSON, returning empty string if missing or not a string.
fn get_str(json: &Value, key: &str) -> String {
    json.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Get a non-empty string from JSON.
fn get_opt_str(json: &Value, key: &str) -> Option<String> {
    json.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Get an identifier from JSON (handles both string and numeric ids).
fn get_id(json: &Value, key: &str) -> Option<SongId> {
    match json.get(key)? {
        Value::String(s) if !s.is_empty() => Some(SongId::Text(s.clone())),
        Value::Number(n) => Some(match n.as_u64() {
            Some(n) => SongId::Number(n),
            None => SongId::Text(n.to_string()),
        }),
        _ => None,
    }
}

/// Get u64 from JSON, accepting numeric strings.
fn get_u64(json: &Value, key: &str) -> u64 {
    match json.get(key) {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Get a list of strings, skipping non-string entries.
fn get_str_list(json: &Value, key: &str) -> Vec<String> {
    json.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Unwrap a `{ "<key>": ... }` envelope if present.
fn unwrap_envelope<'a>(json: &'a Value, key: &str) -> &'a Value {
    match json.get(key) {
        Some(inner) if inner.is_object() || inner.is_array() => inner,
        _ => json,
    }
}

/// Read an array payload, accepting a bare array or an envelope.
fn get_array<'a>(json: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    unwrap_envelope(json, key)
        .as_array()
        .ok_or_else(|| CatalogError::UnexpectedPayload(format!("expected a list of {}", key)))
}

/// Parse a song from raw JSON.
///
/// Accepts the bare record or a `{ "song": {...} }` envelope.
pub fn parse_song(json: &Value) -> Result<Song> {
    let json = unwrap_envelope(json, "song");
    let id = get_id(json, "_id")
        .or_else(|| get_id(json, "id"))
        .ok_or_else(|| CatalogError::UnexpectedPayload("Missing song id".to_string()))?;

    Ok(Song {
        id,
        title: get_str(json, "title"),
        artist: get_str(json, "artist"),
        authors: get_str_list(json, "authors"),
        album: get_str(json, "album"),
        release_date: get_opt_str(json, "release_date")
            .or_else(|| get_opt_str(json, "releaseDate"))
            .unwrap_or_default(),
        duration: match json.get("duration") {
            Some(Value::Number(n)) => n.to_string(),
            _ => get_str(json, "duration"),
        },
        genre: get_str(json, "genre"),
        likes: get_u64(json, "likes"),
        plays: get_u64(json, "plays"),
        cover_url: get_opt_str(json, "cover_url")
            .or_else(|| get_opt_str(json, "coverUrl"))
            .unwrap_or_default(),
        audio_url: get_opt_str(json, "audio_url")
            .or_else(|| get_opt_str(json, "audioUrl"))
            .unwrap_or_default(),
        spotify_id: get_opt_str(json, "spotify_id"),
        album_id: get_opt_str(json, "album_id"),
        created_at: get_opt_str(json, "created_at"),
        updated_at: get_opt_str(json, "updated_at"),
    })
}

/// Parse a song listing.
///
/// Records without an id are dropped; everything else is kept.
pub fn parse_songs(json: &Value) -> Result<Vec<Song>> {
    Ok(get_array(json, "songs")?
        .iter()
        .filter_map(|s| parse_song(s).ok())
        .collect())
}

/// Parse an artist from raw JSON.
pub fn parse_artist(json: &Value) -> Result<Artist> {
    let json = unwrap_envelope(json, "artist");
    let id = get_id(json, "id")
        .or_else(|| get_id(json, "_id"))
        .ok_or_else(|| CatalogError::UnexpectedPayload("Missing artist id".to_string()))?;

    Ok(Artist {
        id: id.to_string(),
        name: get_str(json, "name"),
        image_url: get_str(json, "image_url"),
        genres: get_str_list(json, "genres"),
        popularity: json
            .get("popularity")
            .and_then(|v| v.as_u64())
            .and_then(|p| u32::try_from(p).ok()),
    })
}

/// Parse an artist listing.
pub fn parse_artists(json: &Value) -> Result<Vec<Artist>> {
    Ok(get_array(json, "artists")?
        .iter()
        .filter_map(|a| parse_artist(a).ok())
        .collect())
}

/// Parse an album summary from raw JSON.
pub fn parse_album(json: &Value) -> Result<Album> {
    let json = unwrap_envelope(json, "album");
    let id = get_id(json, "id")
        .or_else(|| get_id(json, "_id"))
        .ok_or_else(|| CatalogError::UnexpectedPayload("Missing album id".to_string()))?;

    Ok(Album {
        id: id.to_string(),
        title: get_str(json, "title"),
        artist: get_str(json, "artist"),
        cover_url: get_opt_str(json, "coverUrl")
            .or_else(|| get_opt_str(json, "cover_url"))
            .unwrap_or_default(),
        release_date: get_opt_str(json, "releaseDate").or_else(|| get_opt_str(json, "release_date")),
        songs_count: get_u64(json, "songsCount") as usize,
    })
}

/// Parse an album listing.
pub fn parse_albums(json: &Value) -> Result<Vec<Album>> {
    Ok(get_array(json, "albums")?
        .iter()
        .filter_map(|a| parse_album(a).ok())
        .collect())
}

fn parse_genre(json: &Value) -> Genre {
    Genre {
        id: get_id(json, "id")
            .or_else(|| get_id(json, "_id"))
            .map(|id| id.to_string())
            .unwrap_or_default(),
        name: get_str(json, "name"),
        slug: get_str(json, "slug"),
        count: get_u64(json, "count"),
    }
}

/// Pick a gradient for a category name. Same name, same gradient.
pub fn gradient_for(name: &str) -> &'static str {
    let sum = name
        .bytes()
        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
    CATEGORY_GRADIENTS[sum % CATEGORY_GRADIENTS.len()]
}

/// Parse and normalise a category.
///
/// `position` is used to build an id when the record carries none.
/// Missing artwork falls back to the first genre's image endpoint, then to
/// a placeholder; a missing color gets a gradient derived from the name.
pub fn parse_category(json: &Value, position: usize) -> Category {
    let json = unwrap_envelope(json, "category");
    let genres: Vec<Genre> = json
        .get("genres")
        .and_then(|g| g.as_array())
        .map(|arr| arr.iter().map(parse_genre).collect())
        .unwrap_or_default();

    let mut category = Category {
        id: get_id(json, "id")
            .or_else(|| get_id(json, "_id"))
            .map(|id| id.to_string())
            .unwrap_or_else(|| format!("category-{}", position)),
        name: get_str(json, "name"),
        image_url: get_opt_str(json, "image_url"),
        color: get_opt_str(json, "color"),
        genres,
    };

    if category.image_url.is_none() {
        category.image_url = Some(match category.first_genre_slug() {
            Some(slug) => format!("/api/music/genres/{}/image", slug),
            None => CATEGORY_PLACEHOLDER_IMAGE.to_string(),
        });
    }
    if category.color.is_none() {
        category.color = Some(gradient_for(&category.name).to_string());
    }

    category
}

/// Parse a category listing.
pub fn parse_categories(json: &Value) -> Result<Vec<Category>> {
    Ok(get_array(json, "categories")?
        .iter()
        .enumerate()
        .map(|(i, c)| parse_category(c, i))
        .collect())
}
