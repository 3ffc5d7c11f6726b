mod common;

use std::collections::HashMap;

use common::{FakeCatalog, track};
use serde_json::json;
use tunesync::management::*;
use tunesync::types::{AlbumInfo, AlbumStub, ArtistInfo, Track};

// Helper function to build a catalog serving the given pages
fn catalog_with_pages(pages: Vec<Vec<Track>>) -> FakeCatalog {
    FakeCatalog {
        pages,
        ..FakeCatalog::default()
    }
}

fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}

#[tokio::test]
async fn test_cache_get_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = TrackCache::new(dir.path().join("tracks.json"));

    assert!(cache.get().await.unwrap().is_none());
}

#[tokio::test]
async fn test_cache_round_trip_keeps_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/cache/tracks.json");

    let mut original: Track = serde_json::from_value(json!({
        "id": "t1",
        "clientId": "abc",
        "title": "Song",
        "estimatedSize": "1234",
        "albumArtRef": [{"url": "http://art"}],
        "playCount": 7,
        "kind": "sj#track"
    }))
    .unwrap();
    original.year = Some(1999);
    let tracks = vec![original, track("t2")];

    let mut cache = TrackCache::new(path.clone());
    cache.set(tracks.clone()).await.unwrap();
    assert!(path.is_file());

    let mut reloaded = TrackCache::new(path);
    let cached = reloaded.get().await.unwrap().unwrap();
    assert_eq!(cached, tracks.as_slice());
    assert_eq!(cached[0].extra.get("playCount"), Some(&json!(7)));
}

#[tokio::test]
async fn test_cache_invalid_json_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    std::fs::write(&path, "not json").unwrap();

    let mut cache = TrackCache::new(path);
    assert!(matches!(cache.get().await, Err(CacheError::Parse(_))));
}

#[tokio::test]
async fn test_remote_fetch_yields_all_pages_and_writes_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    let catalog = catalog_with_pages(vec![
        vec![track("a"), track("b")],
        vec![track("c")],
        vec![track("d")],
    ]);

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(path.clone()));
    let tracks = library.tracks().await.unwrap();

    assert_eq!(ids(&tracks), vec!["a", "b", "c", "d"]);
    assert_eq!(
        catalog.calls_starting_with("page:"),
        vec!["page:0:false", "page:1:false", "page:2:false"]
    );

    let mut cache = TrackCache::new(path);
    assert_eq!(cache.get().await.unwrap().unwrap(), tracks.as_slice());
}

#[tokio::test]
async fn test_remote_fetch_drops_deleted_tracks() {
    let dir = tempfile::tempdir().unwrap();
    let mut deleted = track("gone");
    deleted.deleted = Some(true);
    let catalog = catalog_with_pages(vec![vec![track("a"), deleted, track("b")]]);

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(dir.path().join("tracks.json")));
    let tracks = library.tracks().await.unwrap();

    assert_eq!(ids(&tracks), vec!["a", "b"]);
}

#[tokio::test]
async fn test_cache_written_only_after_exhaustion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    let catalog = catalog_with_pages(vec![vec![track("a")], vec![track("b")]]);

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(path.clone()));
    let mut stream = library.get_tracks(true).await.unwrap();
    assert!(!stream.is_cached());

    assert_eq!(stream.next().await.unwrap().unwrap().id, "a");
    assert!(!path.exists());
    assert_eq!(stream.next().await.unwrap().unwrap().id, "b");
    assert!(!path.exists());

    assert!(stream.next().await.is_none());
    assert!(path.is_file());
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_failed_page_writes_no_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    let catalog = FakeCatalog {
        pages: vec![vec![track("a")], vec![track("b")]],
        failing_page: Some(1),
        ..FakeCatalog::default()
    };

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(path.clone()));
    let mut stream = library.get_tracks(true).await.unwrap();

    assert_eq!(stream.next().await.unwrap().unwrap().id, "a");
    assert!(matches!(
        stream.next().await,
        Some(Err(LibraryError::Remote(_)))
    ));
    assert!(stream.next().await.is_none());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_cached_tracks_skip_the_remote() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    TrackCache::new(path.clone())
        .set(vec![track("cached")])
        .await
        .unwrap();
    let catalog = catalog_with_pages(vec![vec![track("remote")]]);

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(path));
    let stream = library.get_tracks(true).await.unwrap();
    assert!(stream.is_cached());

    let tracks = stream.collect().await.unwrap();
    assert_eq!(ids(&tracks), vec!["cached"]);
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn test_empty_cache_falls_back_to_remote() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    TrackCache::new(path.clone()).set(Vec::new()).await.unwrap();
    let catalog = catalog_with_pages(vec![vec![track("remote")]]);

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(path));
    let tracks = library.tracks().await.unwrap();

    assert_eq!(ids(&tracks), vec!["remote"]);
}

#[tokio::test]
async fn test_refresh_ignores_and_overwrites_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks.json");
    TrackCache::new(path.clone())
        .set(vec![track("old")])
        .await
        .unwrap();
    let catalog = catalog_with_pages(vec![vec![track("new-1"), track("new-2")]]);

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(path.clone()));
    assert_eq!(library.refresh().await.unwrap(), 2);
    assert_eq!(library.len().await.unwrap(), 2);

    let mut cache = TrackCache::new(path);
    assert_eq!(ids(cache.get().await.unwrap().unwrap()), vec!["new-1", "new-2"]);
}

#[tokio::test]
async fn test_len_without_cache() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = FakeCatalog::default();

    let mut library = TrackLibrary::new(&catalog, TrackCache::new(dir.path().join("tracks.json")));
    assert!(matches!(library.len().await, Err(LibraryError::NoCache)));
}

#[tokio::test]
async fn test_global_tracks_resolves_artists_and_albums() {
    let catalog = FakeCatalog {
        artists: HashMap::from([(
            "artist-1".to_string(),
            ArtistInfo {
                albums: vec![
                    AlbumStub {
                        album_id: "album-a".to_string(),
                        name: None,
                    },
                    AlbumStub {
                        album_id: "album-b".to_string(),
                        name: None,
                    },
                ],
            },
        )]),
        albums: HashMap::from([
            (
                "album-a".to_string(),
                AlbumInfo {
                    tracks: vec![track("a1"), track("a2")],
                },
            ),
            (
                "album-b".to_string(),
                AlbumInfo {
                    tracks: vec![track("b1")],
                },
            ),
            (
                "album-c".to_string(),
                AlbumInfo {
                    tracks: vec![track("c1")],
                },
            ),
        ]),
        ..FakeCatalog::default()
    };

    let tracks = global_tracks(
        &catalog,
        &["artist-1".to_string()],
        &["album-c".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(ids(&tracks), vec!["c1", "a1", "a2", "b1"]);
}
