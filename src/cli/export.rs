use super::common;
use crate::{
    config::Settings,
    error, info,
    organize::{FilterOptions, filter_tracks},
    success,
    sync::Exporter,
    warning,
};

/// Adds the videos of the library's tracks to the playlist `playlist_name`.
pub async fn to_youtube(settings: &Settings, playlist_name: &str, thumbs_up: bool) {
    let catalog = common::catalog_client(settings).await;
    let tracks = common::load_tracks(&catalog, settings).await;

    let options = FilterOptions {
        thumbs_up_only: thumbs_up,
        ..FilterOptions::default()
    };
    let tracks = filter_tracks(tracks, &options, &settings.ratings);
    info!("{} tracks", tracks.len());

    let client = common::youtube_client(settings).await;
    let report = match Exporter::new(&client).export(&tracks, playlist_name).await {
        Ok(report) => report,
        Err(e) => error!("Cannot export to playlist '{}'. Err: {}", playlist_name, e),
    };

    if !report.failed.is_empty() {
        warning!("{} videos could not be added", report.failed.len());
    }
    success!(
        "Added {} of {} videos to '{}'",
        report.added.len(),
        report.candidates,
        playlist_name
    );
}
