use super::common;
use crate::{config::Settings, info, success, sync::match_uploaded, warning};

pub async fn match_tracks(settings: &Settings) {
    let client = common::catalog_client(settings).await;
    let tracks = common::load_tracks(&client, settings).await;

    let report = match_uploaded(&client, &tracks).await;

    info!("{} uploads without a store match", report.unmatched.len());
    if !report.failed.is_empty() {
        warning!("{} uploads could not be replaced", report.failed.len());
    }
    success!("Replaced {} uploads with store tracks", report.matched.len());

    if !report.matched.is_empty() {
        info!("Run tunesync refresh to update the track cache.");
    }
}
