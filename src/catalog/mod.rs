//! # Catalog Integration Module
//!
//! Contracts and HTTP implementations for the music service. The rest of the
//! application only talks to the service through the [`CatalogClient`] and
//! [`ManagerClient`] traits, so tests substitute hand-written fakes and the
//! download, library and matching logic never touch HTTP directly.
//!
//! ```text
//! Application Layer (CLI, sync, management)
//!          ↓
//! CatalogClient / ManagerClient (traits)
//!          ↓
//! MobileClient / MusicManager (reqwest)  ←  Session (credentials, auth state)
//!          ↓
//! Music service HTTP API
//! ```
//!
//! ## Authentication
//!
//! Clients start out unauthenticated. Callers invoke `ensure_authenticated()`
//! once before the first remote call; afterwards every call uses the session's
//! access token. A remote call on a session that never authenticated fails with
//! [`ClientError::NotAuthenticated`] instead of logging in behind the caller's
//! back.

mod manager;
mod mobile;
pub mod session;

use async_trait::async_trait;

use crate::types::{AlbumInfo, ArtistInfo, Device, SearchResults, TrackPage};

pub use manager::MusicManager;
pub use mobile::MobileClient;
pub use session::{AuthState, Session};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("client is not authenticated")]
    NotAuthenticated,

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("remote call failed: {0}")]
    CallFailed(String),
}

/// Music catalog operations.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Authenticates the client if it has not been authenticated yet.
    async fn ensure_authenticated(&self) -> Result<(), ClientError>;

    /// Searches the store catalog.
    async fn search(&self, query: &str) -> Result<SearchResults, ClientError>;

    /// Fetches one page of the user's library listing.
    ///
    /// `start_token` is `None` for the first page; the returned page carries the
    /// token of the next one, or `None` once the listing is exhausted.
    async fn get_all_songs_page(
        &self,
        start_token: Option<&str>,
        include_deleted: bool,
    ) -> Result<TrackPage, ClientError>;

    /// Resolves a store track id to a streaming URL for a registered device.
    async fn get_stream_url(&self, nid: &str, device_id: &str) -> Result<String, ClientError>;

    async fn get_registered_devices(&self) -> Result<Vec<Device>, ClientError>;

    /// Removes a track from the user's library.
    async fn delete_songs(&self, id: &str) -> Result<(), ClientError>;

    /// Adds a store track to the user's library.
    async fn add_store_track(&self, store_id: &str) -> Result<(), ClientError>;

    async fn get_artist_info(&self, artist_id: &str) -> Result<ArtistInfo, ClientError>;

    async fn get_album_info(&self, album_id: &str) -> Result<AlbumInfo, ClientError>;

    /// Downloads the body of an arbitrary URL (streams, cover art).
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, ClientError>;
}

/// Access to the raw files of tracks the user uploaded.
#[async_trait]
pub trait ManagerClient: Send + Sync {
    async fn ensure_authenticated(&self) -> Result<(), ClientError>;

    /// Downloads an uploaded track, returning the suggested file name and the audio bytes.
    async fn download_song(&self, id: &str) -> Result<(String, Vec<u8>), ClientError>;
}
