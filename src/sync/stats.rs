//! Library statistics: upload usage, year and genre histograms, video listing.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    organize::filter::is_uploaded,
    types::{Track, Video},
    utils::justify_labels,
};

/// Width of the longest bar drawn by [`draw_chart`].
pub const CHART_WIDTH: usize = 50;

const BAR: &str = "▇";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct UploadUsage {
    pub total: usize,
    pub uploaded: usize,
    /// Sum of the estimated sizes of the uploaded tracks.
    pub uploaded_bytes: u64,
}

pub fn uploaded_usage(tracks: &[Track]) -> UploadUsage {
    tracks
        .iter()
        .fold(UploadUsage::default(), |mut usage, track| {
            usage.total += 1;
            if is_uploaded(track) {
                usage.uploaded += 1;
                usage.uploaded_bytes += track.estimated_size_bytes().unwrap_or(0);
            }
            usage
        })
}

/// Number of tracks per release year, ascending by year. Tracks without a year are left out.
pub fn tracks_by_year(tracks: &[Track]) -> Vec<(i32, usize)> {
    let mut counts = BTreeMap::new();
    for year in tracks.iter().filter_map(|t| t.year).filter(|y| *y != 0) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Number of tracks per genre, least common first; ties keep alphabetical order.
pub fn tracks_by_genre(tracks: &[Track]) -> Vec<(String, usize)> {
    let mut counts = BTreeMap::new();
    for genre in tracks
        .iter()
        .filter_map(|t| t.genre.as_deref())
        .filter(|g| !g.is_empty())
    {
        *counts.entry(genre.to_string()).or_insert(0) += 1;
    }

    let mut by_genre: Vec<(String, usize)> = counts.into_iter().collect();
    by_genre.sort_by_key(|(_, count)| *count);
    by_genre
}

/// Renders a horizontal bar chart, one line per entry.
///
/// Bars are scaled so the largest value spans `max_width` blocks; every
/// non-zero value gets at least one block.
pub fn draw_chart<L: ToString>(data: &[(L, usize)], max_width: usize) -> Vec<String> {
    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(0);
    if max_value == 0 {
        return Vec::new();
    }

    let labels: Vec<String> = data.iter().map(|(l, _)| l.to_string()).collect();
    let labels = justify_labels(&labels);

    labels
        .into_iter()
        .zip(data.iter().map(|(_, v)| *v))
        .map(|(label, value)| {
            let mut width = value * max_width / max_value;
            if value > 0 && width == 0 {
                width = 1;
            }
            format!("{} | {}", label, BAR.repeat(width))
        })
        .collect()
}

/// Tracks carrying a primary video, paired with it.
pub fn videos(tracks: &[Track]) -> Vec<(&Track, &Video)> {
    tracks
        .iter()
        .filter_map(|t| t.primary_video.as_ref().map(|v| (t, v)))
        .collect()
}

/// Distinct kinds of the primary videos in `tracks`.
pub fn video_kinds(tracks: &[Track]) -> BTreeSet<&str> {
    tracks
        .iter()
        .filter_map(|t| t.primary_video.as_ref())
        .map(|v| v.kind.as_str())
        .collect()
}
