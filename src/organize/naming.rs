//! Deterministic mapping of tracks to paths below the download destination.
//!
//! Regular albums land in `<artist>/[<year>] <album>/<NN> - <title>.mp3`,
//! compilations in `<album> [<year>]/<NN> - <artist> - <title>.mp3`. With the
//! character prefix enabled everything is bucketed below the first letter of the
//! sortable artist (`W/Weeknd, The/...`) or `VA-<letter>` for compilations.

use std::path::PathBuf;

use unicode_normalization::UnicodeNormalization;

use crate::types::Track;

/// Album artist marking a compilation.
pub const VARIOUS_ARTISTS: &str = "Various Artists";

const UNKNOWN_ARTIST: &str = "Unknown artist";
const UNNAMED_TRACK: &str = "Unnamed track";

const INVALID_CHARS: [char; 9] = ['"', '<', '>', '|', ':', '*', '?', '\\', '/'];

/// Known misspellings in the catalog.
const ARTIST_FIXES: &[(&str, &str)] = &[("Christoper Titus", "Christopher Titus")];

fn fix_artist(artist: &str) -> &str {
    ARTIST_FIXES
        .iter()
        .find(|(wrong, _)| *wrong == artist)
        .map(|(_, right)| *right)
        .unwrap_or(artist)
}

/// Reduces a name to characters that are safe in a path segment on every platform.
///
/// Compatibility decomposition first, then everything outside ASCII is dropped,
/// surrounding whitespace trimmed and reserved and control characters removed.
pub fn clean_file_name(value: &str) -> String {
    let ascii: String = value.nfkd().filter(char::is_ascii).collect();
    ascii
        .trim()
        .chars()
        .filter(|c| !INVALID_CHARS.contains(c) && (*c as u32) >= 0x20)
        .collect()
}

/// Moves a leading English article to the end of the name.
///
/// "The Strokes" becomes "Strokes, The", "A Perfect Circle" becomes
/// "Perfect Circle, A"; other names are returned unchanged.
pub fn get_sortable_artist(artist: &str) -> String {
    for article in ["the", "a", "an"] {
        let len = article.len();
        let Some(head) = artist.get(..=len) else {
            continue;
        };

        if head.to_lowercase() == format!("{} ", article) {
            return format!("{}, {}", &artist[len + 1..], &artist[..len]);
        }
    }

    artist.to_string()
}

/// First character of a name, uppercased, or `#` when it is a digit.
pub fn get_path_char(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_numeric() => "#".to_string(),
        Some(c) => c.to_uppercase().collect(),
        None => "#".to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Relative path of a track's audio file.
pub fn get_file_name(track: &Track, add_char_prefix: bool) -> PathBuf {
    let album_artist = non_empty(track.album_artist.as_deref());
    let is_compilation = album_artist == Some(VARIOUS_ARTISTS);

    let artist = match album_artist {
        Some(artist) if !is_compilation => artist,
        _ => non_empty(track.artist.as_deref()).unwrap_or(UNKNOWN_ARTIST),
    };
    let mut artist = clean_file_name(fix_artist(artist))
        .trim_end_matches('.')
        .to_string();
    if artist.is_empty() {
        artist = UNKNOWN_ARTIST.to_string();
    }

    let mut title = clean_file_name(non_empty(track.title.as_deref()).unwrap_or(UNNAMED_TRACK));
    if title.is_empty() {
        title = UNNAMED_TRACK.to_string();
    }

    let track_number = track.track_number.unwrap_or(0);
    let year = track.year.filter(|y| *y != 0);
    let album = clean_file_name(track.album.as_deref().unwrap_or_default())
        .trim_end_matches('.')
        .to_string();

    let (path_char, segments) = if is_compilation {
        let album = get_sortable_artist(&album).trim_end_matches('.').to_string();
        let path_char = format!("VA-{}", get_path_char(&album));
        let file = format!("{:02} - {} - {}.mp3", track_number, artist, title);
        let album_dir = match year {
            Some(year) => format!("{} [{}]", album, year),
            None => album,
        };
        (path_char, vec![album_dir, file])
    } else {
        let artist = get_sortable_artist(&artist).trim_end_matches('.').to_string();
        let path_char = get_path_char(&artist);
        let file = format!("{:02} - {}.mp3", track_number, title);
        let segments = match (year, album.is_empty()) {
            (Some(year), false) => vec![artist, format!("[{}] {}", year, album), file],
            (None, false) => vec![artist, album, file],
            (_, true) => vec![artist, format!("{}.mp3", title)],
        };
        (path_char, segments)
    };

    let mut path = PathBuf::new();
    if add_char_prefix {
        path.push(path_char);
    }
    for segment in segments.iter().filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}
