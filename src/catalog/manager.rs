use async_trait::async_trait;
use reqwest::{Client, header};

use super::{ClientError, ManagerClient, Session};

/// HTTP client of the manager API, which serves the raw files of uploaded tracks.
pub struct MusicManager {
    http: Client,
    session: Session,
    base_url: String,
}

impl MusicManager {
    pub fn new(session: Session, base_url: String) -> Self {
        Self {
            http: Client::new(),
            session,
            base_url,
        }
    }
}

#[async_trait]
impl ManagerClient for MusicManager {
    async fn ensure_authenticated(&self) -> Result<(), ClientError> {
        self.session.ensure_authenticated().await
    }

    async fn download_song(&self, id: &str) -> Result<(String, Vec<u8>), ClientError> {
        let token = self.session.access_token().await?;
        let url = format!("{}/export", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("version", "2"), ("songid", id)])
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        let file_name = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(file_name_from_disposition)
            .unwrap_or_else(|| format!("{}.mp3", id));

        let audio = response.bytes().await?.to_vec();
        if audio.is_empty() {
            return Err(ClientError::UnexpectedResponse(format!(
                "empty download for {}",
                id
            )));
        }

        Ok((file_name, audio))
    }
}

fn file_name_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

