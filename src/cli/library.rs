use tabled::Table;

use super::common;
use crate::{
    catalog::{CatalogClient, ManagerClient, MobileClient, MusicManager},
    config::{Settings, YOUTUBE_CREDENTIALS},
    error, info,
    management::{TrackCache, TrackLibrary},
    success,
    sync::stats::{self, CHART_WIDTH},
    types::{UsageTableRow, VideoTableRow},
    utils, warning,
    youtube::{VideoClient, YoutubeClient},
};

pub async fn refresh(settings: &Settings) {
    let client = common::catalog_client(settings).await;
    let mut library = TrackLibrary::new(&client, TrackCache::new(settings.cache_path.clone()));

    let pb = common::spinner("Fetching track listing...");
    let result = library.refresh().await;
    pb.finish_and_clear();

    match result {
        Ok(count) => success!(
            "Cached {} tracks in {}",
            count,
            settings.cache_path.display()
        ),
        Err(e) => error!("Cannot refresh tracks. Err: {}", e),
    }
}

/// Checks every stored credential file without touching the library.
pub async fn validate(settings: &Settings) {
    let mut valid = true;

    info!("Testing catalog credentials ...");
    match MobileClient::new(common::mobile_session(settings), settings.catalog.clone()) {
        Ok(client) => {
            if let Err(e) = client.ensure_authenticated().await {
                warning!("Catalog credentials are invalid: {}", e);
                valid = false;
            }
        }
        Err(e) => {
            warning!("Cannot create catalog client: {}", e);
            valid = false;
        }
    }

    info!("Testing music manager credentials ...");
    let manager = MusicManager::new(
        common::manager_session(settings),
        settings.catalog.manager_url.clone(),
    );
    if let Err(e) = manager.ensure_authenticated().await {
        warning!("Music manager credentials are invalid: {}", e);
        valid = false;
    }

    if !valid {
        error!(
            "Credentials are invalid. Store fresh tokens in {}",
            settings.credentials_dir.display()
        );
    }

    let youtube = YoutubeClient::new(
        common::youtube_session(settings),
        settings.youtube.api_url.clone(),
    );
    if youtube.ensure_authenticated().await.is_err() {
        warning!(
            "No usable video platform token in {}. Run tunesync auth before exporting.",
            settings.credentials_path(YOUTUBE_CREDENTIALS).display()
        );
    }

    success!("Credentials are valid!");
}

pub async fn uploaded(settings: &Settings) {
    let client = common::catalog_client(settings).await;
    let tracks = common::load_tracks(&client, settings).await;

    let usage = stats::uploaded_usage(&tracks);
    let table = Table::new(vec![UsageTableRow {
        tracks: usage.total,
        uploaded: usage.uploaded,
        size: utils::format_gigabytes(usage.uploaded_bytes),
    }]);
    println!("{}", table);
}

pub async fn years(settings: &Settings) {
    let client = common::catalog_client(settings).await;
    let tracks = common::load_tracks(&client, settings).await;

    let by_year = stats::tracks_by_year(&tracks);
    if by_year.is_empty() {
        warning!("No track carries a release year.");
        return;
    }

    for line in stats::draw_chart(&by_year, CHART_WIDTH) {
        println!("{}", line);
    }
}

pub async fn genres(settings: &Settings) {
    let client = common::catalog_client(settings).await;
    let tracks = common::load_tracks(&client, settings).await;

    let by_genre = stats::tracks_by_genre(&tracks);
    if by_genre.is_empty() {
        warning!("No track carries a genre.");
        return;
    }

    for line in stats::draw_chart(&by_genre, CHART_WIDTH) {
        println!("{}", line);
    }
}

pub async fn videos(settings: &Settings) {
    let client = common::catalog_client(settings).await;
    let tracks = common::load_tracks(&client, settings).await;

    let rows: Vec<VideoTableRow> = stats::videos(&tracks)
        .into_iter()
        .map(|(track, video)| VideoTableRow {
            track: track.description(),
            kind: video.kind.clone(),
            id: video.id.clone(),
        })
        .collect();

    if rows.is_empty() {
        warning!("No track carries a video.");
        return;
    }

    let count = rows.len();
    println!("{}", Table::new(rows));

    let kinds: Vec<&str> = stats::video_kinds(&tracks).into_iter().collect();
    info!("{} videos of kinds: {}", count, kinds.join(", "));
}
