use std::path::PathBuf;

use super::common;
use crate::{
    config::Settings,
    error, info,
    management::global_tracks,
    organize::{FilterOptions, filter_tracks},
    success,
    sync::{DownloadError, Downloader},
    warning,
};

/// Where the tracks to download come from.
pub enum TrackSource {
    /// The user's library.
    Library,
    /// Store catalog albums, given directly or through their artists.
    Global {
        artist_ids: Vec<String>,
        album_ids: Vec<String>,
    },
}

pub async fn download(
    settings: &Settings,
    source: TrackSource,
    options: FilterOptions,
    destination: PathBuf,
    char_prefix: bool,
) {
    let catalog = common::catalog_client(settings).await;

    let tracks = match source {
        TrackSource::Library => common::load_tracks(&catalog, settings).await,
        TrackSource::Global {
            artist_ids,
            album_ids,
        } => {
            if artist_ids.is_empty() && album_ids.is_empty() {
                error!("Pass --artist-id or --album-id to download from the store catalog.");
            }

            let pb = common::spinner("Resolving store albums...");
            let result = global_tracks(&catalog, &artist_ids, &album_ids).await;
            pb.finish_and_clear();

            match result {
                Ok(tracks) => tracks,
                Err(e) => error!("Cannot resolve store tracks. Err: {}", e),
            }
        }
    };

    let tracks = filter_tracks(tracks, &options, &settings.ratings);
    if tracks.is_empty() {
        warning!("No tracks match the given filters.");
        return;
    }
    info!("{} tracks selected", tracks.len());

    let manager = common::manager_client(settings).await;
    let downloader = Downloader::new(
        &catalog,
        &manager,
        destination.clone(),
        settings.device_type.clone(),
    )
    .with_char_prefix(char_prefix);

    let report = match downloader.run(tracks).await {
        Ok(report) => report,
        Err(DownloadError::MissingDevice(kind)) => {
            error!("No registered {} devices found", kind)
        }
        Err(e) => error!("Download failed. Err: {}", e),
    };

    for file_name in &report.failed {
        warning!("Failed: {}", file_name.display());
    }
    success!(
        "Downloaded {} tracks to {} ({} already present, {} failed)",
        report.downloaded,
        destination.display(),
        report.skipped,
        report.failed.len()
    );
}
