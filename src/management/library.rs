use std::collections::VecDeque;

use super::cache::{CacheError, TrackCache};
use crate::{
    catalog::{CatalogClient, ClientError},
    types::Track,
};

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("failed to fetch the track listing: {0}")]
    Remote(#[from] ClientError),

    #[error("no cached track listing exists yet")]
    NoCache,
}

/// The user's track collection, served from the cache or the remote listing.
pub struct TrackLibrary<'c, C: CatalogClient> {
    client: &'c C,
    cache: TrackCache,
}

impl<'c, C: CatalogClient> TrackLibrary<'c, C> {
    pub fn new(client: &'c C, cache: TrackCache) -> Self {
        Self { client, cache }
    }

    /// Produces the current tracks.
    ///
    /// With `use_cache` and a non-empty snapshot the cached tracks are returned.
    /// Otherwise the remote listing is fetched page by page; the snapshot is
    /// replaced only after the last page was consumed.
    pub async fn get_tracks(&mut self, use_cache: bool) -> Result<TrackStream<'_, C>, LibraryError> {
        if use_cache {
            if let Some(tracks) = self.cache.get().await? {
                if !tracks.is_empty() {
                    return Ok(TrackStream::Cached(tracks.to_vec().into_iter()));
                }
            }
        }

        Ok(TrackStream::Remote(RemoteTracks::new(
            self.client,
            &mut self.cache,
        )))
    }

    /// Collects [`TrackLibrary::get_tracks`] with the cache enabled.
    pub async fn tracks(&mut self) -> Result<Vec<Track>, LibraryError> {
        self.get_tracks(true).await?.collect().await
    }

    /// Fetches the full remote listing, ignoring and then overwriting the cache.
    pub async fn refresh(&mut self) -> Result<usize, LibraryError> {
        let tracks = self.get_tracks(false).await?.collect().await?;
        Ok(tracks.len())
    }

    /// Number of cached tracks.
    pub async fn len(&mut self) -> Result<usize, LibraryError> {
        match self.cache.get().await? {
            Some(tracks) => Ok(tracks.len()),
            None => Err(LibraryError::NoCache),
        }
    }
}

/// Tracks produced by [`TrackLibrary::get_tracks`].
pub enum TrackStream<'a, C: CatalogClient> {
    Cached(std::vec::IntoIter<Track>),
    Remote(RemoteTracks<'a, C>),
}

impl<C: CatalogClient> TrackStream<'_, C> {
    /// Returns the next track, `None` once the sequence is exhausted.
    pub async fn next(&mut self) -> Option<Result<Track, LibraryError>> {
        match self {
            TrackStream::Cached(tracks) => tracks.next().map(Ok),
            TrackStream::Remote(remote) => remote.next().await,
        }
    }

    pub async fn collect(mut self) -> Result<Vec<Track>, LibraryError> {
        let mut tracks = Vec::new();
        while let Some(track) = self.next().await {
            tracks.push(track?);
        }
        Ok(tracks)
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, TrackStream::Cached(_))
    }
}

enum FetchState {
    Fetching(Option<String>),
    Exhausted,
    Done,
}

/// Lazily paginated remote listing that writes the cache once fully consumed.
pub struct RemoteTracks<'a, C: CatalogClient> {
    client: &'a C,
    cache: &'a mut TrackCache,
    buffer: VecDeque<Track>,
    fetched: Vec<Track>,
    state: FetchState,
}

impl<'a, C: CatalogClient> RemoteTracks<'a, C> {
    fn new(client: &'a C, cache: &'a mut TrackCache) -> Self {
        Self {
            client,
            cache,
            buffer: VecDeque::new(),
            fetched: Vec::new(),
            state: FetchState::Fetching(None),
        }
    }

    async fn next(&mut self) -> Option<Result<Track, LibraryError>> {
        loop {
            if let Some(track) = self.buffer.pop_front() {
                self.fetched.push(track.clone());
                return Some(Ok(track));
            }

            match &self.state {
                FetchState::Done => return None,
                FetchState::Exhausted => {
                    self.state = FetchState::Done;
                    let tracks = std::mem::take(&mut self.fetched);
                    return match self.cache.set(tracks).await {
                        Ok(()) => None,
                        Err(e) => Some(Err(e.into())),
                    };
                }
                FetchState::Fetching(token) => {
                    let page = match self.client.get_all_songs_page(token.as_deref(), false).await
                    {
                        Ok(page) => page,
                        Err(e) => {
                            self.state = FetchState::Done;
                            return Some(Err(e.into()));
                        }
                    };

                    self.buffer.extend(
                        page.tracks
                            .into_iter()
                            .filter(|t| !t.deleted.unwrap_or(false)),
                    );
                    self.state = match page.next_page_token {
                        Some(token) => FetchState::Fetching(Some(token)),
                        None => FetchState::Exhausted,
                    };
                }
            }
        }
    }
}

/// Resolves artist and album ids of the store catalog into their tracks.
///
/// Every artist contributes all of its albums; the tracks are returned album by
/// album in the order the ids were given.
pub async fn global_tracks<C: CatalogClient>(
    client: &C,
    artist_ids: &[String],
    album_ids: &[String],
) -> Result<Vec<Track>, ClientError> {
    let mut album_ids = album_ids.to_vec();
    for artist_id in artist_ids {
        let info = client.get_artist_info(artist_id).await?;
        album_ids.extend(info.albums.into_iter().map(|a| a.album_id));
    }

    let mut tracks = Vec::new();
    for album_id in &album_ids {
        let album = client.get_album_info(album_id).await?;
        tracks.extend(album.tracks);
    }

    Ok(tracks)
}
