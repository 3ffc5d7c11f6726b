#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use tunesync::{
    catalog::{CatalogClient, ClientError, ManagerClient},
    types::{
        AlbumInfo, ArtistInfo, Device, Playlist, PlaylistItem, PlaylistItemSnippet,
        PlaylistItemsPage, PlaylistSnippet, ResourceId, SearchResults, Track, TrackPage,
    },
    youtube::VideoClient,
};

const STREAM_PREFIX: &str = "fake://stream/";
const COVER_PREFIX: &str = "fake://cover/";

// Helper function to create a track with just an id
pub fn track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        ..Track::default()
    }
}

// Helper function to create a fully described library track
pub fn album_track(
    id: &str,
    album_artist: &str,
    album: &str,
    title: &str,
    track_number: u32,
    year: i32,
) -> Track {
    Track {
        id: id.to_string(),
        artist: Some(album_artist.to_string()),
        album_artist: Some(album_artist.to_string()),
        album: Some(album.to_string()),
        title: Some(title.to_string()),
        track_number: Some(track_number),
        year: Some(year),
        ..Track::default()
    }
}

pub fn device(id: &str, kind: &str) -> Device {
    Device {
        id: id.to_string(),
        kind: kind.to_string(),
        friendly_name: None,
    }
}

/// In-memory catalog recording every call it receives.
#[derive(Default)]
pub struct FakeCatalog {
    /// Listing pages; page `n` is requested with the token `page-n`.
    pub pages: Vec<Vec<Track>>,
    /// Index of a page whose request fails.
    pub failing_page: Option<usize>,
    pub devices: Vec<Device>,
    /// Audio served through the store path, by `nid`.
    pub streams: HashMap<String, Vec<u8>>,
    pub covers: HashMap<String, Vec<u8>>,
    /// Search hits by exact query.
    pub search_hits: HashMap<String, Vec<Track>>,
    pub failing_deletes: HashSet<String>,
    pub artists: HashMap<String, ArtistInfo>,
    pub albums: HashMap<String, AlbumInfo>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn ensure_authenticated(&self) -> Result<(), ClientError> {
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ClientError> {
        self.record(format!("search:{}", query));
        Ok(SearchResults {
            song_hits: self.search_hits.get(query).cloned().unwrap_or_default(),
            artist_hits: Vec::new(),
        })
    }

    async fn get_all_songs_page(
        &self,
        start_token: Option<&str>,
        include_deleted: bool,
    ) -> Result<TrackPage, ClientError> {
        let index = start_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);
        self.record(format!("page:{}:{}", index, include_deleted));

        if self.failing_page == Some(index) {
            return Err(ClientError::CallFailed(format!("page {} failed", index)));
        }

        let tracks = self.pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(TrackPage {
            tracks,
            next_page_token,
        })
    }

    async fn get_stream_url(&self, nid: &str, device_id: &str) -> Result<String, ClientError> {
        self.record(format!("stream:{}:{}", nid, device_id));
        if self.streams.contains_key(nid) {
            Ok(format!("{}{}", STREAM_PREFIX, nid))
        } else {
            Err(ClientError::CallFailed(format!("no stream for {}", nid)))
        }
    }

    async fn get_registered_devices(&self) -> Result<Vec<Device>, ClientError> {
        self.record("devices".to_string());
        Ok(self.devices.clone())
    }

    async fn delete_songs(&self, id: &str) -> Result<(), ClientError> {
        self.record(format!("delete:{}", id));
        if self.failing_deletes.contains(id) {
            return Err(ClientError::CallFailed(format!("cannot delete {}", id)));
        }
        Ok(())
    }

    async fn add_store_track(&self, store_id: &str) -> Result<(), ClientError> {
        self.record(format!("add:{}", store_id));
        Ok(())
    }

    async fn get_artist_info(&self, artist_id: &str) -> Result<ArtistInfo, ClientError> {
        self.record(format!("artist:{}", artist_id));
        self.artists
            .get(artist_id)
            .cloned()
            .ok_or_else(|| ClientError::CallFailed(format!("unknown artist {}", artist_id)))
    }

    async fn get_album_info(&self, album_id: &str) -> Result<AlbumInfo, ClientError> {
        self.record(format!("album:{}", album_id));
        self.albums
            .get(album_id)
            .cloned()
            .ok_or_else(|| ClientError::CallFailed(format!("unknown album {}", album_id)))
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        self.record(format!("fetch:{}", url));
        if let Some(nid) = url.strip_prefix(STREAM_PREFIX) {
            if let Some(audio) = self.streams.get(nid) {
                return Ok(audio.clone());
            }
        }
        if let Some(name) = url.strip_prefix(COVER_PREFIX) {
            if let Some(image) = self.covers.get(name) {
                return Ok(image.clone());
            }
        }
        Err(ClientError::CallFailed(format!("cannot fetch {}", url)))
    }
}

/// Uploaded tracks by id.
#[derive(Default)]
pub struct FakeManager {
    pub uploads: HashMap<String, Vec<u8>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeManager {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ManagerClient for FakeManager {
    async fn ensure_authenticated(&self) -> Result<(), ClientError> {
        Ok(())
    }

    async fn download_song(&self, id: &str) -> Result<(String, Vec<u8>), ClientError> {
        self.calls.lock().unwrap().push(format!("download:{}", id));
        self.uploads
            .get(id)
            .map(|audio| (format!("{}.mp3", id), audio.clone()))
            .ok_or_else(|| ClientError::CallFailed(format!("no upload {}", id)))
    }
}

pub fn playlist(id: &str, title: &str) -> Playlist {
    Playlist {
        id: id.to_string(),
        snippet: PlaylistSnippet {
            title: title.to_string(),
            localized: None,
        },
    }
}

fn playlist_item(video_id: &str) -> PlaylistItem {
    PlaylistItem {
        snippet: PlaylistItemSnippet {
            resource_id: ResourceId {
                kind: Some("youtube#video".to_string()),
                video_id: video_id.to_string(),
            },
        },
    }
}

/// Video platform holding playlists in memory, paging items `page_size` at a time.
pub struct FakeVideo {
    pub playlists: Mutex<Vec<Playlist>>,
    pub items: Mutex<HashMap<String, Vec<String>>>,
    pub page_size: usize,
    pub failing_inserts: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeVideo {
    pub fn new(playlists: Vec<Playlist>) -> Self {
        Self {
            playlists: Mutex::new(playlists),
            items: Mutex::new(HashMap::new()),
            page_size: 2,
            failing_inserts: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_items(self, playlist_id: &str, video_ids: &[&str]) -> Self {
        self.items.lock().unwrap().insert(
            playlist_id.to_string(),
            video_ids.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn items_of(&self, playlist_id: &str) -> Vec<String> {
        self.items
            .lock()
            .unwrap()
            .get(playlist_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_create(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("create:"))
            .collect()
    }
}

#[async_trait]
impl VideoClient for FakeVideo {
    async fn ensure_authenticated(&self) -> Result<(), ClientError> {
        Ok(())
    }

    async fn get_playlists(&self) -> Result<Vec<Playlist>, ClientError> {
        self.calls.lock().unwrap().push("playlists".to_string());
        Ok(self.playlists.lock().unwrap().clone())
    }

    async fn create_playlist(&self, title: &str) -> Result<Playlist, ClientError> {
        self.calls.lock().unwrap().push(format!("create:{}", title));
        let mut playlists = self.playlists.lock().unwrap();
        let created = playlist(&format!("pl-{}", playlists.len() + 1), title);
        playlists.push(created.clone());
        Ok(created)
    }

    async fn get_playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, ClientError> {
        let start = page_token
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(0);
        self.calls
            .lock()
            .unwrap()
            .push(format!("items:{}:{}", playlist_id, start));

        let all = self.items_of(playlist_id);
        let end = (start + self.page_size).min(all.len());
        let items = all[start.min(end)..end]
            .iter()
            .map(|id| playlist_item(id))
            .collect();
        let next_page_token = (end < all.len()).then(|| end.to_string());

        Ok(PlaylistItemsPage {
            items,
            next_page_token,
        })
    }

    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<(), ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("insert:{}:{}", playlist_id, video_id));
        if self.failing_inserts.contains(video_id) {
            return Err(ClientError::CallFailed(format!("quota exceeded for {}", video_id)));
        }

        self.items
            .lock()
            .unwrap()
            .entry(playlist_id.to_string())
            .or_default()
            .push(video_id.to_string());
        Ok(())
    }
}
