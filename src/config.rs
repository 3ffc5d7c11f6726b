//! Configuration management for tunesync.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a single [`Settings`] value that is built
//! once at startup and handed explicitly to the components that need it (cache
//! location, service URLs, rating sentinels, playback device type, OAuth clients).
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the data directory
//! 3. Application defaults (where applicable)

use std::{
    env,
    path::{Path, PathBuf},
};

/// Name of the application directory below the platform data directory.
pub const APP_DIR: &str = "tunesync";

/// Credential file of the catalog (mobile) client inside the credentials directory.
pub const MOBILE_CREDENTIALS: &str = "oauth.mobile.json";

/// Credential file of the manager client inside the credentials directory.
pub const MANAGER_CREDENTIALS: &str = "oauth.manager.json";

/// Credential file of the video platform client inside the credentials directory.
pub const YOUTUBE_CREDENTIALS: &str = "oauth.youtube.json";

/// Returns the default data directory of the application.
///
/// - Linux: `~/.local/share/tunesync`
/// - macOS: `~/Library/Application Support/tunesync`
/// - Windows: `%LOCALAPPDATA%/tunesync`
pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Loads environment variables from a `.env` file in the data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is not
/// an error: every setting has a default or is only required by the commands
/// that use it.
///
/// # Arguments
///
/// * `data_dir` - Overrides the platform data directory (the `--config` flag)
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the `.env`
/// file exists but cannot be parsed.
pub async fn load_env(data_dir: Option<&Path>) -> Result<(), String> {
    let dir = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_data_dir);
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Rating values the catalog uses to express likes and dislikes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingScale {
    pub thumbs_up: String,
    pub thumbs_down: String,
}

impl Default for RatingScale {
    fn default() -> Self {
        Self {
            thumbs_up: "5".to_string(),
            thumbs_down: "1".to_string(),
        }
    }
}

/// OAuth client registration used to refresh or obtain access tokens.
#[derive(Debug, Clone)]
pub struct OAuthClient {
    pub token_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

/// Endpoints of the music service.
#[derive(Debug, Clone)]
pub struct CatalogEndpoints {
    /// Base URL of the mobile catalog API (track feed, search, devices, ...).
    pub api_url: String,
    /// URL resolving store track ids to streaming URLs.
    pub stream_url: String,
    /// Base URL of the manager API serving uploaded tracks.
    pub manager_url: String,
}

/// Settings of the video platform integration.
#[derive(Debug, Clone)]
pub struct YoutubeSettings {
    pub api_url: String,
    pub auth_url: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_addr: String,
    pub oauth: OAuthClient,
}

/// All runtime configuration of the application.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub cache_path: PathBuf,
    pub credentials_dir: PathBuf,
    pub device_type: String,
    pub ratings: RatingScale,
    pub catalog: CatalogEndpoints,
    pub catalog_oauth: OAuthClient,
    pub youtube: YoutubeSettings,
}

impl Settings {
    /// Builds the settings from the current environment.
    ///
    /// Call [`load_env`] first so values from the `.env` file are visible.
    ///
    /// # Environment Variables
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TRACK_CACHE_PATH` | `<data dir>/cache/tracks.json` |
    /// | `CREDENTIALS_DIR` | `<data dir>/credentials` |
    /// | `DEVICE_TYPE` | `ANDROID` |
    /// | `THUMBS_UP_RATING` / `THUMBS_DOWN_RATING` | `5` / `1` |
    /// | `CATALOG_API_URL` | `https://mclients.googleapis.com/sj/v2.5` |
    /// | `CATALOG_STREAM_URL` | `https://mclients.googleapis.com/music/mplay` |
    /// | `MANAGER_API_URL` | `https://music.google.com/music` |
    /// | `OAUTH_TOKEN_URL` | `https://oauth2.googleapis.com/token` |
    /// | `OAUTH_CLIENT_ID` / `OAUTH_CLIENT_SECRET` | unset |
    /// | `YOUTUBE_API_URL` | `https://www.googleapis.com/youtube/v3` |
    /// | `YOUTUBE_AUTH_URL` | `https://accounts.google.com/o/oauth2/v2/auth` |
    /// | `YOUTUBE_REDIRECT_URI` | `http://localhost:12345/callback` |
    /// | `YOUTUBE_SCOPE` | `https://www.googleapis.com/auth/youtube` |
    /// | `YOUTUBE_SERVER_ADDRESS` | `127.0.0.1:12345` |
    /// | `YOUTUBE_CLIENT_ID` / `YOUTUBE_CLIENT_SECRET` | unset |
    pub fn from_env(data_dir: Option<&Path>) -> Self {
        let data_dir = data_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(default_data_dir);

        let cache_path = env::var("TRACK_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("cache/tracks.json"));
        let credentials_dir = env::var("CREDENTIALS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("credentials"));

        let token_url = var_or("OAUTH_TOKEN_URL", "https://oauth2.googleapis.com/token");

        Self {
            cache_path,
            credentials_dir,
            device_type: var_or("DEVICE_TYPE", "ANDROID"),
            ratings: RatingScale {
                thumbs_up: var_or("THUMBS_UP_RATING", "5"),
                thumbs_down: var_or("THUMBS_DOWN_RATING", "1"),
            },
            catalog: CatalogEndpoints {
                api_url: var_or("CATALOG_API_URL", "https://mclients.googleapis.com/sj/v2.5"),
                stream_url: var_or(
                    "CATALOG_STREAM_URL",
                    "https://mclients.googleapis.com/music/mplay",
                ),
                manager_url: var_or("MANAGER_API_URL", "https://music.google.com/music"),
            },
            catalog_oauth: OAuthClient {
                token_url: token_url.clone(),
                client_id: var_opt("OAUTH_CLIENT_ID"),
                client_secret: var_opt("OAUTH_CLIENT_SECRET"),
            },
            youtube: YoutubeSettings {
                api_url: var_or("YOUTUBE_API_URL", "https://www.googleapis.com/youtube/v3"),
                auth_url: var_or(
                    "YOUTUBE_AUTH_URL",
                    "https://accounts.google.com/o/oauth2/v2/auth",
                ),
                redirect_uri: var_or("YOUTUBE_REDIRECT_URI", "http://localhost:12345/callback"),
                scope: var_or("YOUTUBE_SCOPE", "https://www.googleapis.com/auth/youtube"),
                server_addr: var_or("YOUTUBE_SERVER_ADDRESS", "127.0.0.1:12345"),
                oauth: OAuthClient {
                    token_url,
                    client_id: var_opt("YOUTUBE_CLIENT_ID"),
                    client_secret: var_opt("YOUTUBE_CLIENT_SECRET"),
                },
            },
            data_dir,
        }
    }

    /// Path of a credential file inside the credentials directory.
    pub fn credentials_path(&self, file_name: &str) -> PathBuf {
        self.credentials_dir.join(file_name)
    }
}

fn var_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
