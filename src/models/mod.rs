//! Data models for catalog responses.
//!
//! This module contains the song, album, artist and category records
//! exchanged with the catalog service, plus the derived album summary.

pub mod album;
pub mod artist;
pub mod category;
pub mod common;
pub mod song;

// Re-exports for convenience
pub use album::Album;
pub use artist::Artist;
pub use category::{Category, Genre};
pub use common::{format_time, ReleaseDate, SongId};
pub use song::{Song, COLLECTION_MARKER};
