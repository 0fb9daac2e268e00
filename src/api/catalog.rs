//! Catalog service client.
//!
//! Every request is tried against each configured base URL in turn. The
//! first successful response wins; when none succeeds the failure of the
//! primary base URL is reported.

use bytes::Bytes;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::CatalogConfig;
use crate::converters;
use crate::error::{CatalogError, Result};
use crate::models::{Album, Artist, Category, Song};

/// Client for the music catalog service.
///
/// # Example
///
/// ```rust,no_run
/// use melodia::{CatalogApi, CatalogConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = CatalogApi::new(CatalogConfig::new("http://localhost:3001"))?;
///     let songs = api.get_all_songs().await?;
///     println!("{} songs", songs.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: Client,
    base_urls: Vec<String>,
}

impl CatalogApi {
    /// Create a client from a validated configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_urls: config.base_urls(),
        })
    }

    /// Candidate base URLs in the order they are tried.
    pub fn base_urls(&self) -> &[String] {
        &self.base_urls
    }

    /// GET `path` under each base URL until one answers with a success status.
    async fn send(&self, path: &str) -> Result<Response> {
        let mut primary_error = None;

        for (attempt, base) in self.base_urls.iter().enumerate() {
            let url = format!("{}/{}", base, path);
            debug!("GET {}", url);

            let failure = match self.client.get(&url).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => CatalogError::HttpStatus {
                    url,
                    status: response.status().as_u16(),
                },
                Err(e) => CatalogError::RequestError(e),
            };

            if attempt + 1 < self.base_urls.len() {
                warn!("{} ({}), trying next base URL", failure, path);
            }
            if primary_error.is_none() {
                primary_error = Some(failure);
            }
        }

        let err = primary_error
            .unwrap_or_else(|| CatalogError::Config("no base URLs configured".to_string()));
        error!("Catalog request for {} failed: {}", path, err);
        Err(err)
    }

    /// GET and decode a JSON body.
    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self.send(path).await?;
        Ok(response.json::<Value>().await?)
    }

    /// Get every song in the catalog.
    pub async fn get_all_songs(&self) -> Result<Vec<Song>> {
        let json = self.get_json("songs").await?;
        converters::parse_songs(&json)
    }

    /// Get a song by id.
    pub async fn get_song(&self, id: &str) -> Result<Song> {
        let id = check_id(id)?;
        let json = self
            .get_json(&format!("songs/{}", id))
            .await
            .map_err(|e| not_found(e, || CatalogError::SongNotFound(id.to_string())))?;
        converters::parse_song(&json)
    }

    /// Get every artist in the catalog.
    pub async fn get_all_artists(&self) -> Result<Vec<Artist>> {
        let json = self.get_json("artists").await?;
        converters::parse_artists(&json)
    }

    /// Get an artist by id.
    pub async fn get_artist(&self, id: &str) -> Result<Artist> {
        let id = check_id(id)?;
        let json = self
            .get_json(&format!("artists/{}", id))
            .await
            .map_err(|e| not_found(e, || CatalogError::ArtistNotFound(id.to_string())))?;
        converters::parse_artist(&json)
    }

    /// Get the album listing maintained by the service.
    ///
    /// See [`albums_from_songs`](crate::aggregate::albums_from_songs) for the
    /// listing derived from songs.
    pub async fn get_all_albums(&self) -> Result<Vec<Album>> {
        let json = self.get_json("albums").await?;
        converters::parse_albums(&json)
    }

    /// Get an album by id.
    pub async fn get_album(&self, id: &str) -> Result<Album> {
        let id = check_id(id)?;
        let json = self
            .get_json(&format!("albums/{}", id))
            .await
            .map_err(|e| not_found(e, || CatalogError::AlbumNotFound(id.to_string())))?;
        converters::parse_album(&json)
    }

    /// Get every category, normalised.
    pub async fn get_all_categories(&self) -> Result<Vec<Category>> {
        let json = self.get_json("categories").await?;
        converters::parse_categories(&json)
    }

    /// Get a category by id, normalised.
    pub async fn get_category(&self, id: &str) -> Result<Category> {
        let id = check_id(id)?;
        let json = self
            .get_json(&format!("categories/{}", id))
            .await
            .map_err(|e| not_found(e, || CatalogError::CategoryNotFound(id.to_string())))?;
        if !json.is_object() {
            return Err(CatalogError::UnexpectedPayload(format!(
                "category {} is not an object",
                id
            )));
        }
        Ok(converters::parse_category(&json, 0))
    }

    /// Fetch the audio payload of a song.
    pub async fn get_song_audio(&self, id: &str) -> Result<Bytes> {
        let id = check_id(id)?;
        let response = self
            .send(&format!("songs/{}/audio", id))
            .await
            .map_err(|e| not_found(e, || CatalogError::SongNotFound(id.to_string())))?;
        Ok(response.bytes().await?)
    }
}

/// Reject ids that cannot be used as a single path segment.
fn check_id(id: &str) -> Result<&str> {
    let trimmed = id.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '?', '#', '\\'])
    {
        return Err(CatalogError::InvalidId(id.to_string()));
    }
    Ok(trimmed)
}

/// Turn a 404 into the resource-specific error.
fn not_found<F>(err: CatalogError, make: F) -> CatalogError
where
    F: FnOnce() -> CatalogError,
{
    if err.status() == Some(404) {
        make()
    } else {
        err
    }
}
