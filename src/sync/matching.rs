//! Replace uploaded tracks with their store counterparts.
//!
//! For every uploaded track the store catalog is searched for a hit with the
//! same artist, album and title. When one is found the upload is deleted from
//! the library and the store track is added in its place.

use crate::{
    catalog::CatalogClient,
    info,
    organize::filter::is_uploaded,
    success,
    types::Track,
    warning,
};

/// Search query for a track: artist and title, empty parts left out.
pub fn search_query(track: &Track) -> String {
    [track.artist.as_deref(), track.title.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased alphanumeric characters of a field, for comparison.
fn comparable(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn same_track(a: &Track, b: &Track) -> bool {
    comparable(a.artist.as_deref()) == comparable(b.artist.as_deref())
        && comparable(a.album.as_deref()) == comparable(b.album.as_deref())
        && comparable(a.title.as_deref()) == comparable(b.title.as_deref())
}

/// First search hit describing the same track as `expected`.
pub fn best_match<'a>(expected: &Track, hits: &'a [Track]) -> Option<&'a Track> {
    hits.iter().find(|hit| same_track(expected, hit))
}

#[derive(Debug, Default)]
pub struct MatchReport {
    /// Uploads replaced by a store track.
    pub matched: Vec<String>,
    /// Uploads without a usable store hit.
    pub unmatched: Vec<String>,
    /// Uploads whose search, deletion or replacement failed.
    pub failed: Vec<String>,
}

/// Replaces every uploaded track in `tracks` with a matching store track.
///
/// Tracks are processed in artist order. Remote failures are reported per track
/// and never abort the run.
pub async fn match_uploaded<C: CatalogClient>(client: &C, tracks: &[Track]) -> MatchReport {
    let mut uploaded: Vec<&Track> = tracks.iter().filter(|t| is_uploaded(t)).collect();
    uploaded.sort_by(|a, b| a.artist.cmp(&b.artist));

    let mut report = MatchReport::default();

    for track in uploaded {
        let description = track.description();

        let results = match client.search(&search_query(track)).await {
            Ok(results) => results,
            Err(e) => {
                warning!("search failed for '{}': {}", description, e);
                report.failed.push(description);
                continue;
            }
        };

        let Some((hit, store_id)) = best_match(track, &results.song_hits)
            .and_then(|hit| hit.store_id.as_deref().map(|id| (hit, id)))
        else {
            info!("no result for '{}'", description);
            report.unmatched.push(description);
            continue;
        };

        if let Err(e) = client.delete_songs(&track.id).await {
            warning!("failed to delete '{}': {}", description, e);
            report.failed.push(description);
            continue;
        }

        info!("adding '{}'", hit.description());
        if let Err(e) = client.add_store_track(store_id).await {
            warning!("failed to add '{}': {}", hit.description(), e);
            report.failed.push(description);
            continue;
        }

        success!("replaced '{}'", description);
        report.matched.push(description);
    }

    report
}
