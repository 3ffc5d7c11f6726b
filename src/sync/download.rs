//! Mirror catalog tracks into a local directory.
//!
//! Every track goes through the same steps: derive its path, check whether a
//! complete file is already there, fetch it through the store path or the user
//! upload path, publish it atomically and tag it. A failing track is reported
//! and skipped; only a missing playback device aborts the whole run.

use std::{
    future::Future,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    catalog::{CatalogClient, ClientError, ManagerClient},
    info,
    organize::{naming::get_file_name, tagging::set_metadata},
    progress::ProgressTimer,
    types::{Device, Track},
    warning,
};

/// Files smaller than this share of the estimated size are treated as corrupt.
pub const MIN_SIZE_RATIO: f64 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("no registered {0} device found")]
    MissingDevice(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Remote(#[from] ClientError),
}

/// Terminal state of a single track.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Downloaded,
    Failed(String),
}

/// A track whose file has to be fetched.
#[derive(Debug, Clone)]
pub struct PlannedDownload {
    pub track: Track,
    /// Path relative to the destination directory.
    pub file_name: PathBuf,
    pub path: PathBuf,
}

/// Result of checking every track against the destination directory.
#[derive(Debug, Default)]
pub struct DownloadPlan {
    pub downloads: Vec<PlannedDownload>,
    /// Tracks already complete on disk.
    pub skipped: usize,
    /// Tracks whose local file could not be inspected, relative to the destination.
    pub failed: Vec<PathBuf>,
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    pub skipped: usize,
    pub downloaded: usize,
    pub failed: Vec<PathBuf>,
}

/// Id of the first registered device of `device_type`, without its `0x` prefix.
pub fn resolve_device_id(devices: &[Device], device_type: &str) -> Option<String> {
    devices
        .iter()
        .find(|d| d.kind == device_type)
        .map(|d| d.id.trim_start_matches(|c| c == '0' || c == 'x').to_string())
}

/// Decides whether the file at `path` has to be (re)downloaded.
///
/// A file smaller than half the estimated size is deleted and counts as missing.
/// Without a size estimate any existing file is accepted.
pub async fn should_download(track: &Track, path: &Path) -> Result<bool, std::io::Error> {
    let metadata = match async_fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e),
    };

    let Some(estimated_size) = track.estimated_size_bytes() else {
        return Ok(false);
    };

    let disk_size = metadata.len();
    let min_size = estimated_size as f64 * MIN_SIZE_RATIO;
    if (disk_size as f64) < min_size {
        warning!(
            "deleting {}, corrupt: {} > {}",
            path.display(),
            min_size,
            disk_size
        );
        async_fs::remove_file(path).await?;
        return Ok(true);
    }

    Ok(false)
}

/// Splits `tracks` into the downloads still needed, the files already present
/// and the tracks whose local path cannot be inspected.
pub async fn plan_downloads(
    tracks: Vec<Track>,
    destination: &Path,
    add_char_prefix: bool,
) -> DownloadPlan {
    let mut plan = DownloadPlan::default();

    for track in tracks {
        let file_name = get_file_name(&track, add_char_prefix);
        let path = destination.join(&file_name);
        match should_download(&track, &path).await {
            Ok(true) => plan.downloads.push(PlannedDownload {
                track,
                file_name,
                path,
            }),
            Ok(false) => plan.skipped += 1,
            Err(e) => {
                warning!("cannot check {}: {}", path.display(), e);
                plan.failed.push(file_name);
            }
        }
    }

    plan
}

/// Writes the bytes produced by `fetch` to `path` without ever exposing a partial file.
///
/// A temporary file is created next to `path` before `fetch` runs and renamed into
/// place once it is filled; on any failure it is removed.
pub async fn publish_atomically<F>(path: &Path, fetch: F) -> Result<(), DownloadError>
where
    F: Future<Output = Result<Vec<u8>, ClientError>>,
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = tempfile::Builder::new()
        .prefix(".tunesync-")
        .suffix(".part")
        .tempfile_in(dir)?;

    let bytes = fetch.await?;
    temp.write_all(&bytes)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub async fn download_store_track<C: CatalogClient>(
    catalog: &C,
    path: &Path,
    nid: &str,
    device_id: &str,
) -> Result<(), DownloadError> {
    publish_atomically(path, async {
        let stream_url = catalog.get_stream_url(nid, device_id).await?;
        catalog.fetch_url(&stream_url).await
    })
    .await
}

pub async fn download_user_track<M: ManagerClient>(
    manager: &M,
    path: &Path,
    id: &str,
) -> Result<(), DownloadError> {
    publish_atomically(path, async {
        let (_, audio) = manager.download_song(id).await?;
        Ok(audio)
    })
    .await
}

/// Downloads tracks one after another into a destination directory.
pub struct Downloader<'a, C: CatalogClient, M: ManagerClient> {
    catalog: &'a C,
    manager: &'a M,
    destination: PathBuf,
    device_type: String,
    add_char_prefix: bool,
}

impl<'a, C: CatalogClient, M: ManagerClient> Downloader<'a, C, M> {
    pub fn new(catalog: &'a C, manager: &'a M, destination: PathBuf, device_type: String) -> Self {
        Self {
            catalog,
            manager,
            destination,
            device_type,
            add_char_prefix: false,
        }
    }

    /// Buckets files below the first character of the artist (`W/Weeknd, The/...`).
    pub fn with_char_prefix(mut self, add_char_prefix: bool) -> Self {
        self.add_char_prefix = add_char_prefix;
        self
    }

    /// Resolves the playback device used for store downloads.
    pub async fn device_id(&self) -> Result<String, DownloadError> {
        let devices = self.catalog.get_registered_devices().await?;
        resolve_device_id(&devices, &self.device_type)
            .ok_or_else(|| DownloadError::MissingDevice(self.device_type.clone()))
    }

    /// Downloads every track of `tracks` that is missing or corrupt on disk.
    ///
    /// Fails before touching any file when no playback device is registered.
    /// Every other problem is confined to its track and ends up in the report.
    pub async fn run(&self, tracks: Vec<Track>) -> Result<DownloadReport, DownloadError> {
        let device_id = self.device_id().await?;

        let plan = plan_downloads(tracks, &self.destination, self.add_char_prefix).await;
        let mut report = DownloadReport {
            skipped: plan.skipped,
            failed: plan.failed,
            ..DownloadReport::default()
        };

        info!("Downloading {} tracks ...", plan.downloads.len());
        let mut progress = ProgressTimer::new(plan.downloads.len());

        for (index, planned) in plan.downloads.iter().enumerate() {
            match self.download_track(planned, &device_id).await {
                Outcome::Downloaded => report.downloaded += 1,
                Outcome::Failed(_) => report.failed.push(planned.file_name.clone()),
            }

            if let Some(line) = progress.progress(index + 1) {
                info!("{}", line);
            }
        }

        Ok(report)
    }

    /// Fetches one track, store path first when the track has a store id.
    pub async fn download_track(&self, planned: &PlannedDownload, device_id: &str) -> Outcome {
        if let Some(dir) = planned.path.parent() {
            if let Err(e) = async_fs::create_dir_all(dir).await {
                warning!("cannot create {}: {}", dir.display(), e);
                return Outcome::Failed(e.to_string());
            }
        }

        let track = &planned.track;
        if let Some(nid) = &track.nid {
            match download_store_track(self.catalog, &planned.path, nid, device_id).await {
                Ok(()) => return self.finish(planned).await,
                Err(e) => warning!(
                    "error getting store track {}, trying for user track: {}",
                    planned.file_name.display(),
                    e
                ),
            }
        }

        match download_user_track(self.manager, &planned.path, &track.id).await {
            Ok(()) => self.finish(planned).await,
            Err(e) => {
                warning!(
                    "error getting user track {}: {}",
                    planned.file_name.display(),
                    e
                );
                Outcome::Failed(e.to_string())
            }
        }
    }

    async fn finish(&self, planned: &PlannedDownload) -> Outcome {
        if let Err(e) = set_metadata(self.catalog, &planned.path, &planned.track).await {
            warning!("failed to tag {}: {}", planned.file_name.display(), e);
        }
        Outcome::Downloaded
    }
}
