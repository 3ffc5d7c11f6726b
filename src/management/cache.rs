use std::path::PathBuf;

use crate::types::Track;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cannot access track cache: {0}")]
    Io(#[from] std::io::Error),

    #[error("track cache is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// JSON snapshot of the whole remote track listing.
///
/// The file is read at most once per process; afterwards the in-memory copy is
/// served. There is no locking: one process, one thread of control.
pub struct TrackCache {
    path: PathBuf,
    tracks: Option<Vec<Track>>,
}

impl TrackCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path, tracks: None }
    }

    /// Returns the cached tracks, or `None` if nothing has been cached yet.
    pub async fn get(&mut self) -> Result<Option<&[Track]>, CacheError> {
        if self.tracks.is_none() {
            if !self.path.is_file() {
                return Ok(None);
            }

            let content = async_fs::read_to_string(&self.path).await?;
            let tracks: Vec<Track> = serde_json::from_str(&content)?;
            self.tracks = Some(tracks);
        }

        Ok(self.tracks.as_deref())
    }

    /// Replaces the snapshot on disk and in memory.
    pub async fn set(&mut self, tracks: Vec<Track>) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string(&tracks)?;
        async_fs::write(&self.path, json).await?;
        self.tracks = Some(tracks);
        Ok(())
    }
}
