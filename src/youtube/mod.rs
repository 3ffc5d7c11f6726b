//! # Video Platform Module
//!
//! Contract and HTTP implementation for the video platform playlists the
//! exporter writes to, plus the PKCE authorization flow that produces the
//! platform's credential file.
//!
//! The client reuses the catalog's [`ClientError`] and
//! [`Session`](crate::catalog::Session): it starts unauthenticated and must be
//! authenticated explicitly before the first call.

pub mod auth;
mod client;

use async_trait::async_trait;

use crate::{
    catalog::ClientError,
    types::{Playlist, PlaylistItem, PlaylistItemsPage},
};

pub use client::YoutubeClient;

/// Playlist operations of the video platform.
#[async_trait]
pub trait VideoClient: Send + Sync {
    async fn ensure_authenticated(&self) -> Result<(), ClientError>;

    /// Playlists owned by the authenticated user.
    async fn get_playlists(&self) -> Result<Vec<Playlist>, ClientError>;

    /// Creates a private playlist.
    async fn create_playlist(&self, title: &str) -> Result<Playlist, ClientError>;

    /// Fetches one page of a playlist's items; `page_token` is `None` for the first page.
    async fn get_playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, ClientError>;

    async fn insert_playlist_item(&self, playlist_id: &str, video_id: &str)
    -> Result<(), ClientError>;
}

/// Collects every item of a playlist, following page tokens until they run out.
pub async fn playlist_items<V: VideoClient + ?Sized>(
    client: &V,
    playlist_id: &str,
) -> Result<Vec<PlaylistItem>, ClientError> {
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = client
            .get_playlist_items_page(playlist_id, page_token.as_deref())
            .await?;
        items.extend(page.items);

        match page.next_page_token {
            Some(token) if !token.is_empty() => page_token = Some(token),
            _ => break,
        }
    }

    Ok(items)
}
