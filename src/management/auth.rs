use std::path::{Path, PathBuf};

use chrono::Utc;
use reqwest::Client;

use crate::{config::OAuthClient, types::Token};

/// An OAuth token bound to the credential file it was loaded from.
pub struct TokenManager {
    path: PathBuf,
    token: Token,
}

impl TokenManager {
    pub fn new(path: PathBuf, token: Token) -> Self {
        TokenManager { path, token }
    }

    pub async fn load(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            path: path.to_path_buf(),
            token,
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it is about to expire.
    pub async fn get_valid_token(&mut self, oauth: &OAuthClient) -> Result<String, String> {
        if self.is_expired() {
            let new_token = self.refresh_token(oauth).await?;
            self.token = new_token;
            let _ = self.persist().await;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + 240 >= self.token.obtained_at + self.token.expires_in
    }

    async fn refresh_token(&self, oauth: &OAuthClient) -> Result<Token, String> {
        if self.token.refresh_token.is_empty() {
            return Err("token expired and no refresh token is stored".to_string());
        }

        let client_id = oauth.client_id.clone().unwrap_or_default();
        let mut form = vec![
            ("grant_type", "refresh_token".to_string()),
            ("refresh_token", self.token.refresh_token.clone()),
            ("client_id", client_id),
        ];
        if let Some(secret) = &oauth.client_secret {
            form.push(("client_secret", secret.clone()));
        }

        let client = Client::new();
        let res = client
            .post(&oauth.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        let json: serde_json::Value = res.json().await.map_err(|e| e.to_string())?;

        let Some(access_token) = json["access_token"].as_str() else {
            return Err("token response carries no access_token".to_string());
        };

        Ok(Token {
            access_token: access_token.to_string(),
            // refresh responses may omit the refresh token; keep the old one then
            refresh_token: json["refresh_token"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| self.token.refresh_token.clone()),
            scope: json["scope"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| self.token.scope.clone()),
            expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}
