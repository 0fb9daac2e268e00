//! Unified catalog interface.
//!
//! [`Melodia`] combines the HTTP client with the derived views in
//! [`aggregate`](crate::aggregate): it loads the song list once and builds
//! album, artist and search listings from it.

use std::path::{Path, PathBuf};

use futures_util::future;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{self, CatalogStats, SearchResults};
use crate::api::CatalogApi;
use crate::collation::Collation;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::models::{Album, Artist, Category, Song};

/// Number of related songs shown next to a song.
pub const SIMILAR_SONGS_LIMIT: usize = 4;

/// Snapshot of the catalog as shown on the browse screen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Library {
    pub songs: Vec<Song>,
    /// Albums derived from `songs`.
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    /// Whether `artists` was derived from `songs` because the artists
    /// endpoint failed.
    pub artists_from_songs: bool,
    pub stats: CatalogStats,
}

impl Library {
    /// Search songs and albums of this snapshot.
    pub fn search(&self, term: &str) -> SearchResults {
        aggregate::search(&self.songs, &self.albums, term)
    }

    /// Artists whose name contains `term`, case-insensitively.
    pub fn search_artists(&self, term: &str) -> Vec<&Artist> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.artists.iter().filter(|a| a.matches(&term)).collect()
    }
}

/// Result of an audio download.
#[derive(Debug)]
pub struct DownloadResult {
    /// Path to the written file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
    pub title: String,
    pub artist: String,
}

/// Main catalog interface.
///
/// # Example
///
/// ```rust,no_run
/// use melodia::Melodia;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let melodia = Melodia::from_env()?;
///     let library = melodia.load().await?;
///     for album in &library.albums {
///         println!("{} - {} ({} songs)", album.artist, album.title, album.songs_count);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Melodia {
    api: CatalogApi,
    collation: Collation,
}

impl Melodia {
    /// Create an instance for the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        Ok(Self {
            api: CatalogApi::new(config)?,
            collation: Collation::spanish(),
        })
    }

    /// Create an instance configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(CatalogConfig::from_env()?)
    }

    /// Underlying HTTP client.
    pub fn api(&self) -> &CatalogApi {
        &self.api
    }

    /// Load songs and artists and derive the album listing.
    ///
    /// Songs are required. If artists cannot be fetched they are derived
    /// from the songs instead.
    pub async fn load(&self) -> Result<Library> {
        let (songs, artists) =
            future::join(self.api.get_all_songs(), self.api.get_all_artists()).await;
        let songs = songs?;

        let stats = CatalogStats::from_songs(&songs);
        info!(
            "Loaded {} songs ({} without album, {} without artist)",
            stats.songs, stats.without_album, stats.without_artist
        );

        let albums = aggregate::albums_from_songs_with(&songs, &self.collation);
        info!("Derived {} albums", albums.len());

        let (artists, artists_from_songs) = match artists {
            Ok(artists) => (artists, false),
            Err(e) => {
                warn!("Could not fetch artists, deriving them from songs: {}", e);
                (aggregate::artists_from_songs(&songs), true)
            }
        };
        debug!("{} artists available", artists.len());

        Ok(Library {
            songs,
            albums,
            artists,
            artists_from_songs,
            stats,
        })
    }

    /// Artist listing, independent of the songs endpoint when possible.
    ///
    /// The flag is `true` when the artists endpoint failed and the list was
    /// derived from the songs instead.
    pub async fn artists(&self) -> Result<(Vec<Artist>, bool)> {
        match self.api.get_all_artists().await {
            Ok(artists) => Ok((artists, false)),
            Err(e) => {
                warn!("Could not fetch artists, deriving them from songs: {}", e);
                let songs = self.api.get_all_songs().await?;
                Ok((aggregate::artists_from_songs(&songs), true))
            }
        }
    }

    /// Album listing derived from the current song list.
    pub async fn albums(&self) -> Result<Vec<Album>> {
        let songs = self.api.get_all_songs().await?;
        Ok(aggregate::albums_from_songs_with(&songs, &self.collation))
    }

    /// Search the current song list and its albums.
    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        let songs = self.api.get_all_songs().await?;
        let albums = aggregate::albums_from_songs_with(&songs, &self.collation);
        Ok(aggregate::search(&songs, &albums, term))
    }

    /// A song together with up to [`SIMILAR_SONGS_LIMIT`] related songs.
    pub async fn song_with_similar(&self, song_id: &str) -> Result<(Song, Vec<Song>)> {
        let (song, songs) =
            future::join(self.api.get_song(song_id), self.api.get_all_songs()).await;
        let song = song?;
        let similar = match songs {
            Ok(songs) => aggregate::similar_songs(&songs, &song, SIMILAR_SONGS_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
            Err(e) => {
                warn!("Could not load similar songs for {}: {}", song_id, e);
                Vec::new()
            }
        };
        Ok((song, similar))
    }

    /// Get a song by id.
    pub async fn get_song(&self, song_id: &str) -> Result<Song> {
        self.api.get_song(song_id).await
    }

    /// Get every song.
    pub async fn get_all_songs(&self) -> Result<Vec<Song>> {
        self.api.get_all_songs().await
    }

    /// Get every artist.
    pub async fn get_all_artists(&self) -> Result<Vec<Artist>> {
        self.api.get_all_artists().await
    }

    /// Get an artist by id.
    pub async fn get_artist(&self, artist_id: &str) -> Result<Artist> {
        self.api.get_artist(artist_id).await
    }

    /// Album listing maintained by the service.
    pub async fn get_all_albums(&self) -> Result<Vec<Album>> {
        self.api.get_all_albums().await
    }

    /// Get an album by id.
    pub async fn get_album(&self, album_id: &str) -> Result<Album> {
        self.api.get_album(album_id).await
    }

    /// Get every category.
    pub async fn get_all_categories(&self) -> Result<Vec<Category>> {
        self.api.get_all_categories().await
    }

    /// Get a category by id.
    pub async fn get_category(&self, category_id: &str) -> Result<Category> {
        self.api.get_category(category_id).await
    }

    /// Download a song's audio into `output_dir` as `<artist> - <title>.<ext>`.
    pub async fn download_audio<P: AsRef<Path>>(
        &self,
        song_id: &str,
        output_dir: P,
    ) -> Result<DownloadResult> {
        let output_dir = output_dir.as_ref();
        tokio::fs::create_dir_all(output_dir).await?;

        let (song, audio) =
            future::join(self.api.get_song(song_id), self.api.get_song_audio(song_id)).await;
        let song = song?;
        let audio = audio?;

        let filename = format!(
            "{} - {}{}",
            sanitize_filename(&song.artist),
            sanitize_filename(&song.title),
            audio_extension(&song.audio_url)
        );
        let path = output_dir.join(filename);
        tokio::fs::write(&path, &audio).await?;
        info!("Wrote {} bytes to {}", audio.len(), path.display());

        Ok(DownloadResult {
            path,
            size: audio.len() as u64,
            title: song.title,
            artist: song.artist,
        })
    }
}

/// Sanitize a string for use as a filename.
fn sanitize_filename(name: &str) -> String {
    name.replace(['/', '\\', ':', '*', '?', '"', '<', '>', '|'], "_")
        .trim()
        .to_string()
}

/// File extension taken from the audio URL, `.mp3` when unknown.
fn audio_extension(audio_url: &str) -> String {
    let path = audio_url.split(['?', '#']).next().unwrap_or("");
    let file = path.rsplit('/').next().unwrap_or("");
    match file.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=4).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            format!(".{}", ext.to_ascii_lowercase())
        }
        _ => ".mp3".to_string(),
    }
}
