//! Mirror the music videos of library tracks into a video playlist.
//!
//! One-directional "add if missing": videos already in the playlist are left
//! alone and nothing is ever removed.

use std::{collections::HashSet, time::Duration};

use crate::{
    catalog::ClientError,
    info,
    types::{Playlist, Track},
    warning,
    youtube::{VideoClient, playlist_items},
};

/// Kind of a track's primary video that refers to a video platform video.
pub const LIBRARY_VIDEO_KIND: &str = "sj#video";

const ERROR_DELAY: Duration = Duration::from_secs(1);

/// Video ids of the tracks that carry a platform video, in track order, without duplicates.
pub fn library_video_ids(tracks: &[Track]) -> Vec<String> {
    let mut seen = HashSet::new();
    tracks
        .iter()
        .filter_map(|t| t.primary_video.as_ref())
        .filter(|v| v.kind == LIBRARY_VIDEO_KIND)
        .filter(|v| seen.insert(v.id.clone()))
        .map(|v| v.id.clone())
        .collect()
}

#[derive(Debug, Default)]
pub struct ExportReport {
    pub playlist_id: String,
    /// Whether the playlist had to be created.
    pub created: bool,
    /// Items the playlist held before the export.
    pub existing: usize,
    /// Distinct videos found in the tracks.
    pub candidates: usize,
    pub added: Vec<String>,
    pub failed: Vec<String>,
}

pub struct Exporter<'a, V: VideoClient> {
    client: &'a V,
    error_delay: Duration,
}

impl<'a, V: VideoClient> Exporter<'a, V> {
    pub fn new(client: &'a V) -> Self {
        Self {
            client,
            error_delay: ERROR_DELAY,
        }
    }

    /// Pause after a failed insert before the next one.
    pub fn with_error_delay(mut self, error_delay: Duration) -> Self {
        self.error_delay = error_delay;
        self
    }

    /// First playlist titled `title`, created when none exists.
    pub async fn find_or_create_playlist(
        &self,
        title: &str,
    ) -> Result<(Playlist, bool), ClientError> {
        let playlists = self.client.get_playlists().await?;
        if let Some(playlist) = playlists.into_iter().find(|p| p.title() == title) {
            return Ok((playlist, false));
        }

        info!("Creating playlist '{}'", title);
        let playlist = self.client.create_playlist(title).await?;
        Ok((playlist, true))
    }

    /// Adds every video of `tracks` that `playlist_name` does not contain yet.
    ///
    /// Listing or creating the playlist fails the export; a failed insert is
    /// reported and the export continues with the next video.
    pub async fn export(
        &self,
        tracks: &[Track],
        playlist_name: &str,
    ) -> Result<ExportReport, ClientError> {
        let (playlist, created) = self.find_or_create_playlist(playlist_name).await?;

        let items = playlist_items(self.client, &playlist.id).await?;
        let mut existing: HashSet<String> = items
            .into_iter()
            .map(|item| item.snippet.resource_id.video_id)
            .collect();
        info!("Playlist has {} videos", existing.len());

        let video_ids = library_video_ids(tracks);
        info!("Music library has {} tracks with videos", video_ids.len());

        let mut report = ExportReport {
            playlist_id: playlist.id.clone(),
            created,
            existing: existing.len(),
            candidates: video_ids.len(),
            ..ExportReport::default()
        };

        for video_id in video_ids {
            if existing.contains(&video_id) {
                continue;
            }

            info!("Adding {}", video_id);
            match self.client.insert_playlist_item(&playlist.id, &video_id).await {
                Ok(()) => {
                    existing.insert(video_id.clone());
                    report.added.push(video_id);
                }
                Err(e) => {
                    warning!("Failed to add {}: {}", video_id, e);
                    report.failed.push(video_id);
                    tokio::time::sleep(self.error_delay).await;
                }
            }
        }

        Ok(report)
    }
}
