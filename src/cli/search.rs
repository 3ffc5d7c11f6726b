use tabled::Table;

use super::common;
use crate::{
    catalog::CatalogClient,
    config::Settings,
    error, info,
    types::{ArtistTableRow, TrackTableRow},
    warning,
};

/// Searches the store catalog, listing artist ids usable with `download --artist-id`.
pub async fn search(settings: &Settings, artist: Option<String>, query: Vec<String>) {
    let query = artist
        .iter()
        .cloned()
        .chain(query)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if query.is_empty() {
        error!("Nothing to search for. Pass --artist or a query.");
    }

    let client = common::catalog_client(settings).await;

    let pb = common::spinner(&format!("Searching for '{}'...", query));
    let result = client.search(&query).await;
    pb.finish_and_clear();

    let results = match result {
        Ok(results) => results,
        Err(e) => error!("Search failed. Err: {}", e),
    };

    if results.artist_hits.is_empty() && results.song_hits.is_empty() {
        warning!("No results for '{}'", query);
        return;
    }

    if !results.artist_hits.is_empty() {
        info!("Artists:");
        let rows: Vec<ArtistTableRow> = results
            .artist_hits
            .into_iter()
            .map(|a| ArtistTableRow {
                name: a.name,
                id: a.artist_id,
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if artist.is_none() && !results.song_hits.is_empty() {
        info!("Tracks:");
        let rows: Vec<TrackTableRow> = results
            .song_hits
            .iter()
            .map(|t| TrackTableRow {
                track: t.description(),
                album: t.album.clone().unwrap_or_default(),
                id: t.store_id.clone().or_else(|| t.nid.clone()).unwrap_or_default(),
            })
            .collect();
        println!("{}", Table::new(rows));
    }
}
