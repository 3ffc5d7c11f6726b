use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    catalog::{CatalogClient, ManagerClient, MobileClient, MusicManager, Session},
    config::{MANAGER_CREDENTIALS, MOBILE_CREDENTIALS, Settings, YOUTUBE_CREDENTIALS},
    error,
    management::{LibraryError, TrackCache, TrackLibrary},
    types::Track,
    youtube::{VideoClient, YoutubeClient},
};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub fn mobile_session(settings: &Settings) -> Session {
    Session::new(
        settings.credentials_path(MOBILE_CREDENTIALS),
        settings.catalog_oauth.clone(),
    )
}

pub fn manager_session(settings: &Settings) -> Session {
    Session::new(
        settings.credentials_path(MANAGER_CREDENTIALS),
        settings.catalog_oauth.clone(),
    )
}

pub fn youtube_session(settings: &Settings) -> Session {
    Session::new(
        settings.credentials_path(YOUTUBE_CREDENTIALS),
        settings.youtube.oauth.clone(),
    )
}

/// Authenticated catalog client; exits when the credentials are unusable.
pub async fn catalog_client(settings: &Settings) -> MobileClient {
    let client = match MobileClient::new(mobile_session(settings), settings.catalog.clone()) {
        Ok(client) => client,
        Err(e) => error!("Cannot create catalog client. Err: {}", e),
    };

    if let Err(e) = client.ensure_authenticated().await {
        error!(
            "Failed to login to the catalog. Check {} or run tunesync validate.\n Error: {}",
            settings.credentials_path(MOBILE_CREDENTIALS).display(),
            e
        );
    }

    client
}

/// Authenticated manager client; exits when the credentials are unusable.
pub async fn manager_client(settings: &Settings) -> MusicManager {
    let client = MusicManager::new(manager_session(settings), settings.catalog.manager_url.clone());

    if let Err(e) = client.ensure_authenticated().await {
        error!(
            "Failed to login to the manager. Check {} or run tunesync validate.\n Error: {}",
            settings.credentials_path(MANAGER_CREDENTIALS).display(),
            e
        );
    }

    client
}

/// Authenticated video platform client; exits when the credentials are unusable.
pub async fn youtube_client(settings: &Settings) -> YoutubeClient {
    let client = YoutubeClient::new(youtube_session(settings), settings.youtube.api_url.clone());

    if let Err(e) = client.ensure_authenticated().await {
        error!(
            "Failed to load video platform token. Please run tunesync auth\n Error: {}",
            e
        );
    }

    client
}

/// Tracks of the library, from the cache when there is one.
pub async fn load_tracks<C: CatalogClient>(client: &C, settings: &Settings) -> Vec<Track> {
    let mut library = TrackLibrary::new(client, TrackCache::new(settings.cache_path.clone()));

    let pb = spinner("Loading tracks...");
    let result = library.tracks().await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) => tracks,
        Err(LibraryError::Cache(e)) => error!(
            "Cannot read the track cache {}. Delete it and run tunesync refresh.\n Error: {}",
            settings.cache_path.display(),
            e
        ),
        Err(e) => error!("Cannot load tracks. Err: {}", e),
    }
}
