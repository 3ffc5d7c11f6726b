use std::collections::HashMap;

use crate::{config::RatingScale, types::Track};

/// Whether a track was uploaded or matched by the user rather than bought in the store.
///
/// Uploaded tracks carry a client id without hyphens; store tracks carry none
/// or a hyphenated one.
pub fn is_uploaded(track: &Track) -> bool {
    track
        .client_id
        .as_deref()
        .is_some_and(|id| !id.contains('-'))
}

/// Criteria a track has to satisfy; unset criteria don't constrain anything.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Case-insensitive exact match on the album artist.
    pub artist: Option<String>,
    /// Case-insensitive exact match on the album title.
    pub album: Option<String>,
    pub thumbs_up_only: bool,
    pub skip_thumbs_down: bool,
    /// Minimum thumbs-up minus thumbs-down tally of the track's album.
    pub min_album_rating: Option<i32>,
}

/// Sums +1 per thumbs-up and -1 per thumbs-down track for every album id.
pub fn album_ratings(tracks: &[Track], ratings: &RatingScale) -> HashMap<String, i32> {
    let mut scores: HashMap<String, i32> = HashMap::new();
    for track in tracks {
        let Some(album_id) = track.album_id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };

        let score = scores.entry(album_id.to_string()).or_default();
        match track.rating.as_deref() {
            Some(r) if r == ratings.thumbs_up => *score += 1,
            Some(r) if r == ratings.thumbs_down => *score -= 1,
            _ => {}
        }
    }
    scores
}

enum Predicate {
    Artist(String),
    Album(String),
    ThumbsUp(String),
    NotThumbsDown(String),
    GoodAlbum {
        scores: HashMap<String, i32>,
        min_rating: i32,
    },
}

impl Predicate {
    fn matches(&self, track: &Track) -> bool {
        match self {
            Predicate::Artist(artist) => {
                track.album_artist.as_deref().unwrap_or_default().to_lowercase() == *artist
            }
            Predicate::Album(album) => {
                track.album.as_deref().unwrap_or_default().to_lowercase() == *album
            }
            Predicate::ThumbsUp(rating) => track.rating.as_deref() == Some(rating.as_str()),
            Predicate::NotThumbsDown(rating) => track.rating.as_deref() != Some(rating.as_str()),
            Predicate::GoodAlbum { scores, min_rating } => {
                match track.album_id.as_deref().filter(|id| !id.is_empty()) {
                    Some(album_id) => scores.get(album_id).copied().unwrap_or(0) >= *min_rating,
                    None => false,
                }
            }
        }
    }
}

/// Conjunction of the predicates selected by [`FilterOptions`].
pub struct TrackFilter {
    predicates: Vec<Predicate>,
}

impl TrackFilter {
    /// Builds the filter for a candidate set.
    ///
    /// Album tallies for the good-album criterion are computed over all of
    /// `candidates`, before any other criterion is applied.
    pub fn new(candidates: &[Track], options: &FilterOptions, ratings: &RatingScale) -> Self {
        let mut predicates = Vec::new();

        if let Some(artist) = &options.artist {
            predicates.push(Predicate::Artist(artist.to_lowercase()));
        }
        if let Some(album) = &options.album {
            predicates.push(Predicate::Album(album.to_lowercase()));
        }
        if options.thumbs_up_only {
            predicates.push(Predicate::ThumbsUp(ratings.thumbs_up.clone()));
        }
        if options.skip_thumbs_down {
            predicates.push(Predicate::NotThumbsDown(ratings.thumbs_down.clone()));
        }
        if let Some(min_rating) = options.min_album_rating {
            predicates.push(Predicate::GoodAlbum {
                scores: album_ratings(candidates, ratings),
                min_rating,
            });
        }

        Self { predicates }
    }

    pub fn matches(&self, track: &Track) -> bool {
        self.predicates.iter().all(|p| p.matches(track))
    }

    /// Keeps the matching tracks in their original order.
    pub fn apply(&self, tracks: Vec<Track>) -> Vec<Track> {
        tracks.into_iter().filter(|t| self.matches(t)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Filters `tracks` by `options`, computing album tallies over the same set.
pub fn filter_tracks(tracks: Vec<Track>, options: &FilterOptions, ratings: &RatingScale) -> Vec<Track> {
    let filter = TrackFilter::new(&tracks, options, ratings);
    filter.apply(tracks)
}
