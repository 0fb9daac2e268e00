//! Browsing categories and their genres.

use serde::{Deserialize, Serialize};

/// A music genre inside a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: String,
    pub name: String,
    pub slug: String,
    /// Number of songs tagged with this genre.
    #[serde(default)]
    pub count: u64,
}

/// A browsing category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Artwork URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Gradient classes used as background, e.g. `from-pink-500 to-purple-500`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Genres grouped under this category.
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Category {
    /// Slug of the first genre, if any.
    pub fn first_genre_slug(&self) -> Option<&str> {
        self.genres
            .first()
            .map(|g| g.slug.as_str())
            .filter(|s| !s.is_empty())
    }
}
