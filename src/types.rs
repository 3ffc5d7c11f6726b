use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// A track of the remote catalog.
///
/// Only the fields the application reads are typed; everything else the service
/// sends is kept in `extra` so a cached snapshot survives a round trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_size: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub album_art_ref: Vec<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Track {
    /// Estimated size of the audio file in bytes, if the catalog reported a usable one.
    pub fn estimated_size_bytes(&self) -> Option<u64> {
        self.estimated_size
            .as_deref()
            .and_then(|s| s.trim().parse::<u64>().ok())
    }

    /// "Artist - Title" label used in console output.
    pub fn description(&self) -> String {
        format!(
            "{} - {}",
            self.artist.as_deref().unwrap_or_default(),
            self.title.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub kind: String,
    pub id: String,
}

/// One page of the remote track listing.
#[derive(Debug, Clone, Default)]
pub struct TrackPage {
    pub tracks: Vec<Track>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub song_hits: Vec<Track>,
    pub artist_hits: Vec<ArtistSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo {
    #[serde(default)]
    pub albums: Vec<AlbumStub>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumStub {
    pub album_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumInfo {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// A playlist on the video platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub snippet: PlaylistSnippet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSnippet {
    pub title: String,
    #[serde(default)]
    pub localized: Option<Localized>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Localized {
    pub title: String,
}

impl Playlist {
    pub fn title(&self) -> &str {
        self.snippet
            .localized
            .as_ref()
            .map(|l| l.title.as_str())
            .unwrap_or(&self.snippet.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    #[serde(default)]
    pub kind: Option<String>,
    pub video_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub track: String,
    pub album: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct VideoTableRow {
    pub track: String,
    pub kind: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct UsageTableRow {
    pub tracks: usize,
    pub uploaded: usize,
    pub size: String,
}
