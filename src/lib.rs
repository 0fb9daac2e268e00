//! # Melodia
//!
//! A Rust client for a music catalog service: songs, artists, albums and
//! browsing categories, plus the album listing derived from songs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use melodia::{CatalogConfig, Melodia};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let melodia = Melodia::new(CatalogConfig::new("http://localhost:3001"))?;
//!
//!     // Songs, derived albums and artists in one go
//!     let library = melodia.load().await?;
//!     println!("{} albums", library.albums.len());
//!
//!     // Search the snapshot
//!     let results = library.search("thriller");
//!     println!("{} matching songs", results.songs.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Album aggregation
//!
//! [`albums_from_songs`] is a pure function and can be used without the
//! HTTP client:
//!
//! ```rust
//! use melodia::{albums_from_songs, Song};
//!
//! let songs = vec![
//!     Song { album: "Thriller".into(), artist: "Michael Jackson".into(), ..Default::default() },
//!     Song { album: "Thriller".into(), artist: "Michael Jackson".into(), ..Default::default() },
//! ];
//! let albums = albums_from_songs(&songs);
//! assert_eq!(albums[0].songs_count, 2);
//! ```
//!
//! ## Base URL fallback
//!
//! The catalog is reachable under `/api/music` and, for older deployments,
//! `/api/v1`. [`CatalogConfig`] lists these prefixes in priority order and
//! [`CatalogApi`] tries them in turn for every request.

pub mod aggregate;
pub mod api;
pub mod collation;
pub mod config;
pub mod converters;
pub mod error;
mod library;
pub mod models;

// Main interface (recommended)
pub use library::{DownloadResult, Library, Melodia, SIMILAR_SONGS_LIMIT};

// Lower-level pieces
pub use aggregate::{albums_from_songs, artists_from_songs, CatalogStats, SearchResults};
pub use api::CatalogApi;
pub use collation::Collation;
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use models::{Album, Artist, Category, Genre, Song, SongId};
