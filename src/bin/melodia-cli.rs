use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use melodia::config::{
    split_prefixes, DEFAULT_SERVER_URL, ENV_PREFIXES, ENV_SERVER_URL, ENV_TIMEOUT_SECS,
};
use melodia::models::format_time;
use melodia::{CatalogConfig, Melodia};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "melodia-cli")]
#[command(about = "CLI for Melodia - music catalog browser", long_about = None)]
struct Cli {
    /// Catalog server URL
    #[arg(long, env = ENV_SERVER_URL, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// API path prefix, tried in the order given (repeatable or comma separated)
    #[arg(long = "prefix", value_name = "PREFIX", env = ENV_PREFIXES, value_delimiter = ',')]
    prefixes: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, env = ENV_TIMEOUT_SECS, default_value_t = 30)]
    timeout: u64,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List songs
    Songs {
        /// Only songs whose title, artist, album or genre contains this
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a song and related songs
    Song {
        /// Song id
        id: String,
    },
    /// List artists
    Artists,
    /// List albums
    Albums {
        /// Use the service's album listing instead of deriving it from songs
        #[arg(long)]
        remote: bool,
    },
    /// List categories
    Categories,
    /// Download the audio of a song
    Audio {
        /// Song id
        id: String,

        /// Output directory
        #[arg(short, long, default_value = "downloads")]
        output: PathBuf,
    },
}

impl Cli {
    fn catalog_config(&self) -> CatalogConfig {
        let config = CatalogConfig::new(self.server.clone())
            .with_timeout(Duration::from_secs(self.timeout));
        let prefixes = split_prefixes(&self.prefixes.join(","));
        if prefixes.is_empty() {
            config
        } else {
            config.with_prefixes(prefixes)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let melodia = Melodia::new(cli.catalog_config())?;

    match &cli.command {
        Commands::Songs { search } => {
            let songs = match search {
                Some(term) => melodia.search(term).await?.songs,
                None => melodia.get_all_songs().await?,
            };
            if cli.json {
                return print_json(&songs);
            }
            for (i, song) in songs.iter().enumerate() {
                println!(
                    "{}. {} - {} [{}] (ID: {})",
                    i + 1,
                    song.artist,
                    song.title,
                    song.album,
                    song.id
                );
            }
        }
        Commands::Song { id } => {
            let (song, similar) = melodia.song_with_similar(id).await?;
            if cli.json {
                return print_json(&serde_json::json!({ "song": song, "similar": similar }));
            }
            println!("{}", song.title);
            println!("   Artist: {}", song.artist);
            println!("   Album: {}", song.album);
            println!("   Genre: {}", song.genre);
            let release = song.release();
            if !release.is_unknown() {
                println!("   Released: {}", release.to_long_es());
            }
            if let Ok(seconds) = song.duration.parse::<f64>() {
                println!("   Duration: {}", format_time(seconds));
            } else if !song.duration.is_empty() {
                println!("   Duration: {}", song.duration);
            }
            println!("   Likes: {}  Plays: {}", song.likes, song.plays);
            if !similar.is_empty() {
                println!("Similar songs:");
                for s in &similar {
                    println!("   - {} - {} (ID: {})", s.artist, s.title, s.id);
                }
            }
        }
        Commands::Artists => {
            let (artists, derived) = melodia.artists().await?;
            if cli.json {
                return print_json(&artists);
            }
            if derived {
                println!("(artists derived from songs)");
            }
            for (i, artist) in artists.iter().enumerate() {
                println!("{}. {} (ID: {})", i + 1, artist.name, artist.id);
            }
        }
        Commands::Albums { remote } => {
            let albums = if *remote {
                melodia.get_all_albums().await?
            } else {
                melodia.albums().await?
            };
            if cli.json {
                return print_json(&albums);
            }
            for (i, album) in albums.iter().enumerate() {
                println!(
                    "{}. {} - {} ({} songs)",
                    i + 1,
                    album.artist,
                    album.title,
                    album.songs_count
                );
            }
        }
        Commands::Categories => {
            let categories = melodia.get_all_categories().await?;
            if cli.json {
                return print_json(&categories);
            }
            for (i, category) in categories.iter().enumerate() {
                let genres: Vec<&str> = category.genres.iter().map(|g| g.name.as_str()).collect();
                println!("{}. {} [{}]", i + 1, category.name, genres.join(", "));
            }
        }
        Commands::Audio { id, output } => {
            println!("Downloading audio for song {}...", id);
            let result = melodia.download_audio(id, output).await?;
            println!("✅ Downloaded: {} - {}", result.artist, result.title);
            println!("   Path: {}", result.path.display());
            println!("   Size: {} bytes", result.size);
        }
    }

    Ok(())
}
