use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, header, redirect};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CatalogClient, ClientError, Session};
use crate::{
    config::CatalogEndpoints,
    types::{AlbumInfo, ArtistInfo, ArtistSummary, Device, SearchResults, Track, TrackPage},
};

const PAGE_SIZE: u32 = 1000;
const SEARCH_RESULTS: u32 = 50;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedResponse<T> {
    data: Option<FeedData<T>>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedData<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    entries: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    track: Option<Track>,
    #[serde(default)]
    artist: Option<ArtistSummary>,
}

/// HTTP client of the mobile catalog API.
pub struct MobileClient {
    http: Client,
    session: Session,
    endpoints: CatalogEndpoints,
}

impl MobileClient {
    pub fn new(session: Session, endpoints: CatalogEndpoints) -> Result<Self, ClientError> {
        // stream URLs are handed out as redirects; they must not be followed
        let http = Client::builder()
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            http,
            session,
            endpoints,
        })
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.session.access_token().await?;
        Ok(request.bearer_auth(token))
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.endpoints.api_url, path);
        let request = self
            .authorized(self.http.get(&url).query(&[("alt", "json")]).query(query))
            .await?;
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn mutate(&self, mutation: Value) -> Result<(), ClientError> {
        let url = format!("{}/trackbatch", self.endpoints.api_url);
        let request = self
            .authorized(
                self.http
                    .post(&url)
                    .query(&[("alt", "json")])
                    .json(&json!({ "mutations": [mutation] })),
            )
            .await?;
        let response = request.send().await?.error_for_status()?;
        let body: Value = response.json().await?;

        let failed = body["mutate_response"]
            .as_array()
            .map(|results| {
                results
                    .iter()
                    .any(|r| r["response_code"].as_str().is_some_and(|c| c != "OK"))
            })
            .unwrap_or(false);
        if failed {
            return Err(ClientError::CallFailed(body.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl CatalogClient for MobileClient {
    async fn ensure_authenticated(&self) -> Result<(), ClientError> {
        self.session.ensure_authenticated().await
    }

    async fn search(&self, query: &str) -> Result<SearchResults, ClientError> {
        let max_results = SEARCH_RESULTS.to_string();
        let res: SearchResponse = self
            .get_json(
                "query",
                &[
                    ("q", query),
                    ("ct", "1,2,3,4,6,7,8,9"),
                    ("max-results", &max_results),
                ],
            )
            .await?;

        let mut results = SearchResults::default();
        for entry in res.entries {
            match entry.kind.as_str() {
                "1" => results.song_hits.extend(entry.track),
                "2" => results.artist_hits.extend(entry.artist),
                _ => {}
            }
        }

        Ok(results)
    }

    async fn get_all_songs_page(
        &self,
        start_token: Option<&str>,
        include_deleted: bool,
    ) -> Result<TrackPage, ClientError> {
        let url = format!("{}/trackfeed", self.endpoints.api_url);
        let mut body = json!({ "max-results": PAGE_SIZE });
        if let Some(token) = start_token {
            body["start-token"] = json!(token);
        }

        let request = self
            .authorized(
                self.http
                    .post(&url)
                    .query(&[
                        ("alt", "json"),
                        ("include-deleted", if include_deleted { "true" } else { "false" }),
                        ("updated-min", "0"),
                    ])
                    .json(&body),
            )
            .await?;
        let response = request.send().await?.error_for_status()?;
        let res = response.json::<FeedResponse<Track>>().await?;

        Ok(TrackPage {
            tracks: res.data.map(|d| d.items).unwrap_or_default(),
            next_page_token: res.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn get_stream_url(&self, nid: &str, device_id: &str) -> Result<String, ClientError> {
        let request = self
            .authorized(
                self.http
                    .get(&self.endpoints.stream_url)
                    .query(&[("opt", "hi"), ("net", "mob"), ("pt", "e"), ("mjck", nid)])
                    .header("X-Device-ID", device_id),
            )
            .await?;
        let response = request.send().await?;

        match response.status() {
            StatusCode::FOUND | StatusCode::SEE_OTHER | StatusCode::TEMPORARY_REDIRECT => response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| {
                    ClientError::UnexpectedResponse("redirect without location".to_string())
                }),
            status => Err(ClientError::UnexpectedResponse(format!(
                "stream url request for {} returned {}",
                nid, status
            ))),
        }
    }

    async fn get_registered_devices(&self) -> Result<Vec<Device>, ClientError> {
        let res: FeedResponse<Device> = self
            .get_json("devicemanagementinfo", &[("hl", "en_US")])
            .await?;
        Ok(res.data.map(|d| d.items).unwrap_or_default())
    }

    async fn delete_songs(&self, id: &str) -> Result<(), ClientError> {
        self.mutate(json!({ "delete": id })).await
    }

    async fn add_store_track(&self, store_id: &str) -> Result<(), ClientError> {
        self.mutate(json!({ "create": { "storeId": store_id, "trackType": 8 } }))
            .await
    }

    async fn get_artist_info(&self, artist_id: &str) -> Result<ArtistInfo, ClientError> {
        self.get_json(
            "fetchartist",
            &[
                ("nid", artist_id),
                ("include-albums", "true"),
                ("num-top-tracks", "0"),
                ("num-related-artists", "0"),
            ],
        )
        .await
    }

    async fn get_album_info(&self, album_id: &str) -> Result<AlbumInfo, ClientError> {
        self.get_json(
            "fetchalbum",
            &[("nid", album_id), ("include-tracks", "true")],
        )
        .await
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, ClientError> {
        // signed stream and image URLs need no credentials
        let response = Client::new().get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}
