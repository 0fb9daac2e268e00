//! Derived views over a song list.
//!
//! Everything here is a pure function of its input: album summaries,
//! fallback artist lists, search and "similar songs" selections. Nothing
//! is cached; callers recompute from the current song list.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::collation::Collation;
use crate::models::{Album, Artist, Song};

/// Group songs into album summaries sorted by artist, then title.
///
/// Songs without an album, or whose album carries the
/// [`COLLECTION_MARKER`](crate::models::COLLECTION_MARKER), are ignored.
/// Songs are grouped by their `(album, artist)` pair. The first song seen
/// for a pair provides the title, artist, cover and release date; later
/// songs only raise `songs_count`.
pub fn albums_from_songs(songs: &[Song]) -> Vec<Album> {
    albums_from_songs_with(songs, &Collation::spanish())
}

/// [`albums_from_songs`] with an explicit comparator.
pub fn albums_from_songs_with(songs: &[Song], collation: &Collation) -> Vec<Album> {
    let grouped = songs.iter().filter(|song| song.has_album()).fold(
        HashMap::<(&str, &str), Album>::new(),
        |mut acc, song| {
            acc.entry((song.album.as_str(), song.artist.as_str()))
                .and_modify(|album| album.songs_count += 1)
                .or_insert_with(|| Album::from_first_song(song));
            acc
        },
    );

    let mut albums: Vec<Album> = grouped.into_values().collect();
    albums.sort_by(|a, b| {
        collation
            .compare(&a.artist, &b.artist)
            .then_with(|| collation.compare(&a.title, &b.title))
    });
    albums
}

/// Distinct artists named by the songs, in first-seen order.
///
/// Used when the artists endpoint is unavailable. Each artist takes the
/// cover of the first song it appears on as its picture.
pub fn artists_from_songs(songs: &[Song]) -> Vec<Artist> {
    let mut seen = HashSet::new();
    songs
        .iter()
        .filter(|song| song.has_artist())
        .filter(|song| seen.insert(song.artist.as_str()))
        .map(Artist::from_song)
        .collect()
}

/// Counters describing the shape of a song list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub songs: usize,
    pub without_album: usize,
    pub without_artist: usize,
}

impl CatalogStats {
    pub fn from_songs(songs: &[Song]) -> Self {
        Self {
            songs: songs.len(),
            without_album: songs.iter().filter(|s| s.album.is_empty()).count(),
            without_artist: songs.iter().filter(|s| s.artist.is_empty()).count(),
        }
    }
}

/// Albums and songs matching a search term.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.songs.is_empty()
    }
}

/// Case-insensitive substring search over albums and songs.
///
/// Surrounding whitespace in `term` is ignored. A blank term matches nothing.
pub fn search(songs: &[Song], albums: &[Album], term: &str) -> SearchResults {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return SearchResults::default();
    }

    SearchResults {
        albums: albums.iter().filter(|a| a.matches(&term)).cloned().collect(),
        songs: songs.iter().filter(|s| s.matches(&term)).cloned().collect(),
    }
}

/// Up to `limit` songs sharing genre or artist with `song`, in list order.
pub fn similar_songs<'a>(songs: &'a [Song], song: &Song, limit: usize) -> Vec<&'a Song> {
    songs
        .iter()
        .filter(|candidate| song.is_similar_to(candidate))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn song(title: &str, artist: &str, album: &str, cover: &str) -> Song {
        Song {
            id: title.into(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            cover_url: cover.to_string(),
            ..Default::default()
        }
    }

    fn example_songs() -> Vec<Song> {
        vec![
            song("Beat It", "Michael Jackson", "Thriller", "A.jpg"),
            song("Billie Jean", "Michael Jackson", "Thriller", "B.jpg"),
            song("Untitled", "Unknown", "", "C.jpg"),
            song("Mix", "Various", "Singles - Collection", "D.jpg"),
            song("Hells Bells", "AC/DC", "Back in Black", "E.jpg"),
        ]
    }

    #[test]
    fn test_example_scenario() {
        let albums = albums_from_songs(&example_songs());
        assert_eq!(
            albums,
            vec![
                Album {
                    id: "Back in Black-AC/DC".to_string(),
                    title: "Back in Black".to_string(),
                    artist: "AC/DC".to_string(),
                    cover_url: "E.jpg".to_string(),
                    release_date: None,
                    songs_count: 1,
                },
                Album {
                    id: "Thriller-Michael Jackson".to_string(),
                    title: "Thriller".to_string(),
                    artist: "Michael Jackson".to_string(),
                    cover_url: "A.jpg".to_string(),
                    release_date: None,
                    songs_count: 2,
                },
            ]
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let songs = example_songs();
        assert_eq!(albums_from_songs(&songs), albums_from_songs(&songs));
    }

    #[test]
    fn test_count_is_conserved() {
        let songs = example_songs();
        let counted: usize = albums_from_songs(&songs).iter().map(|a| a.songs_count).sum();
        let eligible = songs
            .iter()
            .filter(|s| !s.album.is_empty() && !s.album.contains(" - Collection"))
            .count();
        assert_eq!(counted, eligible);
        assert_eq!(counted, 3);
    }

    #[test]
    fn test_excluded_songs_produce_nothing() {
        let songs = vec![
            song("a", "X", "", "1.jpg"),
            song("b", "Y", "Greatest Hits - Collection", "2.jpg"),
        ];
        assert!(albums_from_songs(&songs).is_empty());
    }

    #[test]
    fn test_null_fields_from_json_are_tolerated() {
        let songs = crate::converters::parse_songs(&serde_json::json!([
            { "_id": "1", "title": "a", "album": null, "artist": "X" },
            { "_id": "2", "title": "b", "album": "Solo", "artist": null },
            { "_id": "3", "title": "c", "album": 17, "artist": "Z" },
        ]))
        .unwrap();
        let albums = albums_from_songs(&songs);
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].title, "Solo");
        assert_eq!(albums[0].artist, "");
        assert_eq!(albums[0].id, "Solo-");
    }

    #[test]
    fn test_first_write_wins() {
        let mut first = song("one", "Maná", "Sueños Líquidos", "first.jpg");
        first.release_date = "1997-10-28".to_string();
        let mut second = song("two", "Maná", "Sueños Líquidos", "second.jpg");
        second.release_date = "2000-01-01".to_string();

        let albums = albums_from_songs(&[first, second]);
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].cover_url, "first.jpg");
        assert_eq!(albums[0].release_date.as_deref(), Some("1997-10-28"));
        assert_eq!(albums[0].songs_count, 2);
    }

    #[test]
    fn test_hyphenated_names_do_not_merge() {
        let songs = vec![
            song("a", "Bar-Baz", "Foo", "1.jpg"),
            song("b", "Baz", "Foo-Bar", "2.jpg"),
        ];
        let albums = albums_from_songs(&songs);
        assert_eq!(albums.len(), 2);
        assert!(albums.iter().all(|a| a.songs_count == 1));
    }

    #[test]
    fn test_keys_are_unique() {
        let songs = vec![
            song("a", "Shakira", "Pies Descalzos", "1.jpg"),
            song("b", "Shakira", "Pies Descalzos", "1.jpg"),
            song("c", "Shakira", "Dónde Están los Ladrones", "2.jpg"),
            song("d", "Juanes", "Mi Sangre", "3.jpg"),
        ];
        let albums = albums_from_songs(&songs);
        let pairs: HashSet<(&str, &str)> = albums
            .iter()
            .map(|a| (a.title.as_str(), a.artist.as_str()))
            .collect();
        assert_eq!(pairs.len(), albums.len());
    }

    #[test]
    fn test_sorted_by_artist_then_title_with_locale_rules() {
        let songs = vec![
            song("1", "Zoé", "Memo Rex Commander", "z.jpg"),
            song("2", "Álvaro Soler", "Eterno Agosto", "a.jpg"),
            song("3", "alejandro Sanz", "Más", "s.jpg"),
            song("4", "Álvaro Soler", "Magia", "a2.jpg"),
            song("5", "Bebe", "Pafuera Telarañas", "b.jpg"),
        ];
        let albums = albums_from_songs(&songs);
        let order: Vec<(&str, &str)> = albums
            .iter()
            .map(|a| (a.artist.as_str(), a.title.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("alejandro Sanz", "Más"),
                ("Álvaro Soler", "Eterno Agosto"),
                ("Álvaro Soler", "Magia"),
                ("Bebe", "Pafuera Telarañas"),
                ("Zoé", "Memo Rex Commander"),
            ]
        );

        let collation = Collation::spanish();
        for pair in albums.windows(2) {
            let by_artist = collation.compare(&pair[0].artist, &pair[1].artist);
            assert!(
                by_artist.is_lt()
                    || (by_artist.is_eq()
                        && collation.compare(&pair[0].title, &pair[1].title).is_le())
            );
        }
    }

    #[test]
    fn test_order_does_not_depend_on_input_order() {
        let mut songs = vec![
            song("1", "Mana", "Uno", "1.jpg"),
            song("2", "mana", "Uno", "2.jpg"),
            song("3", "Maná", "Uno", "3.jpg"),
        ];
        let forward = albums_from_songs(&songs);
        songs.reverse();
        let backward = albums_from_songs(&songs);
        let names = |albums: &[Album]| {
            albums
                .iter()
                .map(|a| a.artist.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&forward), names(&backward));
    }

    #[test]
    fn test_artists_from_songs_first_seen_order() {
        let songs = vec![
            song("1", "Shakira", "", "s1.jpg"),
            song("2", "null", "", "x.jpg"),
            song("3", "Juanes", "", "j.jpg"),
            song("4", "Shakira", "", "s2.jpg"),
            song("5", "", "", "e.jpg"),
            song("6", "undefined", "", "u.jpg"),
        ];
        let artists = artists_from_songs(&songs);
        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Shakira", "Juanes"]);
        assert_eq!(artists[0].id, "Shakira");
        assert_eq!(artists[0].image_url, "s1.jpg");
    }

    #[test]
    fn test_stats() {
        let stats = CatalogStats::from_songs(&example_songs());
        assert_eq!(
            stats,
            CatalogStats {
                songs: 5,
                without_album: 1,
                without_artist: 0,
            }
        );
    }

    #[test]
    fn test_search() {
        let songs = example_songs();
        let albums = albums_from_songs(&songs);

        let results = search(&songs, &albums, "  THRILL ");
        assert_eq!(results.albums.len(), 1);
        assert_eq!(results.songs.len(), 2);

        let results = search(&songs, &albums, "bells");
        assert!(results.albums.is_empty());
        assert_eq!(results.songs[0].title, "Hells Bells");

        assert!(search(&songs, &albums, "   ").is_empty());
    }

    #[test]
    fn test_search_ignores_surrounding_whitespace() {
        let songs = example_songs();
        let albums = albums_from_songs(&songs);

        assert_eq!(
            search(&songs, &albums, " back in black\t"),
            search(&songs, &albums, "back in black")
        );
        assert_eq!(search(&songs, &albums, "\nback in black ").albums.len(), 1);
        // inner whitespace is still part of the term
        assert!(search(&songs, &albums, "back  in").is_empty());
    }

    #[test]
    fn test_similar_songs() {
        let mut songs = example_songs();
        songs[4].genre = "Rock".to_string();
        songs[2].genre = "Rock".to_string();
        let target = songs[0].clone();

        let similar = similar_songs(&songs, &target, 4);
        let titles: Vec<&str> = similar.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Billie Jean"]);

        let rock = songs[4].clone();
        let similar = similar_songs(&songs, &rock, 1);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].title, "Untitled");
    }

    mod properties {
        use std::collections::HashSet;

        use proptest::prelude::*;

        use super::song;
        use crate::aggregate::albums_from_songs;
        use crate::collation::Collation;
        use crate::models::{Album, Song, COLLECTION_MARKER};

        const ARTISTS: &[&str] = &[
            "Álvaro Soler",
            "alvaro soler",
            "ALVARO SOLER",
            "Zoé",
            "zoe",
            "Maná",
            "Mana",
            "Ñu",
            "Nu",
            "Bebe",
            "AC/DC",
            "Bar-Baz",
            "",
        ];

        const ALBUMS: &[&str] = &[
            "",
            "Éxitos - Collection",
            "Greatest Hits - Collection",
            "Eterno Agosto",
            "eterno agosto",
            "Ñandú",
            "Foo",
            "Foo-Bar",
            "Sueños Líquidos",
        ];

        prop_compose! {
            fn arb_song()(
                n in 0u32..1000,
                artist in prop::sample::select(ARTISTS),
                album in prop::sample::select(ALBUMS),
                cover in "[a-z]{1,4}\\.jpg",
            ) -> Song {
                song(&n.to_string(), artist, album, &cover)
            }
        }

        fn arb_songs() -> impl Strategy<Value = Vec<Song>> {
            prop::collection::vec(arb_song(), 0..60)
        }

        fn shape(albums: &[Album]) -> Vec<(String, String, usize)> {
            albums
                .iter()
                .map(|a| (a.artist.clone(), a.title.clone(), a.songs_count))
                .collect()
        }

        proptest! {
            #[test]
            fn count_is_conserved(songs in arb_songs()) {
                let counted: usize = albums_from_songs(&songs).iter().map(|a| a.songs_count).sum();
                let eligible = songs
                    .iter()
                    .filter(|s| !s.album.is_empty() && !s.album.contains(COLLECTION_MARKER))
                    .count();
                prop_assert_eq!(counted, eligible);
            }

            #[test]
            fn title_artist_pairs_are_unique(songs in arb_songs()) {
                let albums = albums_from_songs(&songs);
                let pairs: HashSet<(&str, &str)> = albums
                    .iter()
                    .map(|a| (a.title.as_str(), a.artist.as_str()))
                    .collect();
                prop_assert_eq!(pairs.len(), albums.len());
                prop_assert!(albums.iter().all(|a| a.songs_count >= 1));
                prop_assert!(albums.iter().all(|a| !a.title.contains(COLLECTION_MARKER)));
            }

            #[test]
            fn adjacent_albums_are_ordered(songs in arb_songs()) {
                let albums = albums_from_songs(&songs);
                let collation = Collation::spanish();
                for pair in albums.windows(2) {
                    let order = collation
                        .compare(&pair[0].artist, &pair[1].artist)
                        .then_with(|| collation.compare(&pair[0].title, &pair[1].title));
                    prop_assert!(order.is_lt(), "{:?} before {:?}", pair[0], pair[1]);
                }
            }

            #[test]
            fn aggregation_is_idempotent(songs in arb_songs()) {
                prop_assert_eq!(albums_from_songs(&songs), albums_from_songs(&songs));
            }

            #[test]
            fn input_order_only_changes_first_song_fields(
                (songs, shuffled) in arb_songs()
                    .prop_flat_map(|songs| (Just(songs.clone()), Just(songs).prop_shuffle()))
            ) {
                prop_assert_eq!(
                    shape(&albums_from_songs(&songs)),
                    shape(&albums_from_songs(&shuffled))
                );
            }
        }
    }
}
