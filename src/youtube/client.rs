use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;

use super::VideoClient;
use crate::{
    catalog::{ClientError, Session},
    types::{Playlist, PlaylistItem, PlaylistItemsPage},
};

const PAGE_SIZE: &str = "50";
const PLAYLIST_DESCRIPTION: &str = "my music videos";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// HTTP client of the YouTube Data API.
pub struct YoutubeClient {
    http: Client,
    session: Session,
    api_url: String,
}

impl YoutubeClient {
    pub fn new(session: Session, api_url: String) -> Self {
        Self {
            http: Client::new(),
            session,
            api_url,
        }
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.session.access_token().await?;
        Ok(request.bearer_auth(token))
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.api_url, resource)
    }
}

#[async_trait]
impl VideoClient for YoutubeClient {
    async fn ensure_authenticated(&self) -> Result<(), ClientError> {
        self.session.ensure_authenticated().await
    }

    async fn get_playlists(&self) -> Result<Vec<Playlist>, ClientError> {
        let mut playlists = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![
                ("part", "id,snippet"),
                ("mine", "true"),
                ("maxResults", PAGE_SIZE),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("pageToken", token));
            }

            let request = self
                .authorized(self.http.get(self.url("playlists")).query(&query))
                .await?;
            let response: ListResponse<Playlist> =
                request.send().await?.error_for_status()?.json().await?;
            playlists.extend(response.items);

            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(playlists)
    }

    async fn create_playlist(&self, title: &str) -> Result<Playlist, ClientError> {
        let body = json!({
            "snippet": {
                "title": title,
                "description": PLAYLIST_DESCRIPTION,
            },
            "status": {
                "privacyStatus": "private",
            },
        });

        let request = self
            .authorized(
                self.http
                    .post(self.url("playlists"))
                    .query(&[("part", "snippet,status")])
                    .json(&body),
            )
            .await?;
        let playlist = request.send().await?.error_for_status()?.json().await?;
        Ok(playlist)
    }

    async fn get_playlist_items_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, ClientError> {
        let mut query = vec![
            ("part", "id,snippet,contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", PAGE_SIZE),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let request = self
            .authorized(self.http.get(self.url("playlistItems")).query(&query))
            .await?;
        let response: ListResponse<PlaylistItem> =
            request.send().await?.error_for_status()?.json().await?;

        Ok(PlaylistItemsPage {
            items: response.items,
            next_page_token: response.next_page_token,
        })
    }

    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<(), ClientError> {
        let body = json!({
            "snippet": {
                "playlistId": playlist_id,
                "resourceId": {
                    "kind": "youtube#video",
                    "videoId": video_id,
                },
            },
        });

        let request = self
            .authorized(
                self.http
                    .post(self.url("playlistItems"))
                    .query(&[("part", "snippet")])
                    .json(&body),
            )
            .await?;
        request.send().await?.error_for_status()?;
        Ok(())
    }
}
