mod common;

use std::path::PathBuf;

use common::album_track;
use tunesync::organize::naming::*;
use tunesync::types::Track;

// Helper function to create a compilation track
fn compilation_track(artist: &str, album: &str, title: &str, track_number: u32, year: Option<i32>) -> Track {
    Track {
        id: "c1".to_string(),
        artist: Some(artist.to_string()),
        album_artist: Some(VARIOUS_ARTISTS.to_string()),
        album: Some(album.to_string()),
        title: Some(title.to_string()),
        track_number: Some(track_number),
        year,
        ..Track::default()
    }
}

#[test]
fn test_get_file_name_with_char_prefix() {
    let track = album_track("t1", "The Weeknd", "Starboy", "Starboy (feat. Daft Punk)", 1, 2016);

    assert_eq!(
        get_file_name(&track, true),
        PathBuf::from("W/Weeknd, The/[2016] Starboy/01 - Starboy (feat. Daft Punk).mp3")
    );
}

#[test]
fn test_get_file_name_without_char_prefix() {
    let track = album_track("t1", "The Weeknd", "Starboy", "Starboy (feat. Daft Punk)", 1, 2016);

    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Weeknd, The/[2016] Starboy/01 - Starboy (feat. Daft Punk).mp3")
    );
}

#[test]
fn test_get_file_name_is_deterministic() {
    let track = album_track("t1", "Daft Punk", "Discovery", "One More Time", 1, 2001);

    assert_eq!(get_file_name(&track, true), get_file_name(&track, true));
    assert_eq!(get_file_name(&track, false), get_file_name(&track, false));
}

#[test]
fn test_get_file_name_album_without_year() {
    let mut track = album_track("t1", "The Strokes", "Is This It", "Barely Legal", 5, 0);
    track.year = None;
    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Strokes, The/Is This It/05 - Barely Legal.mp3")
    );

    // a zero year counts as missing
    track.year = Some(0);
    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Strokes, The/Is This It/05 - Barely Legal.mp3")
    );
}

#[test]
fn test_get_file_name_without_album() {
    let mut track = album_track("t1", "Anberlin", "", "Paperthin Hymn", 3, 2005);
    track.album = None;

    assert_eq!(
        get_file_name(&track, true),
        PathBuf::from("A/Anberlin/Paperthin Hymn.mp3")
    );
}

#[test]
fn test_get_file_name_compilation() {
    let track = compilation_track("Daft Punk", "The Best Hits", "One More Time", 3, Some(2001));

    assert_eq!(
        get_file_name(&track, true),
        PathBuf::from("VA-B/Best Hits, The [2001]/03 - Daft Punk - One More Time.mp3")
    );
    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Best Hits, The [2001]/03 - Daft Punk - One More Time.mp3")
    );
}

#[test]
fn test_get_file_name_compilation_without_year() {
    let track = compilation_track("Moby", "Chillout", "Porcelain", 12, None);

    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Chillout/12 - Moby - Porcelain.mp3")
    );
}

#[test]
fn test_get_file_name_defaults_for_missing_fields() {
    let track = Track {
        id: "t1".to_string(),
        ..Track::default()
    };

    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Unknown artist/Unnamed track.mp3")
    );
    assert_eq!(
        get_file_name(&track, true),
        PathBuf::from("U/Unknown artist/Unnamed track.mp3")
    );
}

#[test]
fn test_get_file_name_falls_back_to_track_artist() {
    let mut track = album_track("t1", "", "Homework", "Da Funk", 4, 1997);
    track.album_artist = Some(String::new());
    track.artist = Some("Daft Punk".to_string());

    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Daft Punk/[1997] Homework/04 - Da Funk.mp3")
    );
}

#[test]
fn test_get_file_name_numeric_artist() {
    let track = album_track("t1", "2Pac", "All Eyez on Me", "Ambitionz Az a Ridah", 1, 1996);

    assert_eq!(
        get_file_name(&track, true),
        PathBuf::from("#/2Pac/[1996] All Eyez on Me/01 - Ambitionz Az a Ridah.mp3")
    );
}

#[test]
fn test_get_file_name_removes_invalid_characters() {
    let track = album_track("t1", "AC/DC", "Live: 1991", "What? \"Who\" <*>|Now", 7, 1992);

    let file_name = get_file_name(&track, false);
    assert_eq!(
        file_name,
        PathBuf::from("ACDC/[1992] Live 1991/07 - What Who Now.mp3")
    );

    // one directory per layout level, no segment introduced by a stray slash
    assert_eq!(file_name.components().count(), 3);
}

#[test]
fn test_get_file_name_strips_trailing_periods() {
    let track = album_track("t1", "Mr. T.", "Vol. 1...", "Intro.", 1, 2000);

    assert_eq!(
        get_file_name(&track, false),
        PathBuf::from("Mr. T/[2000] Vol. 1/01 - Intro..mp3")
    );
}

#[test]
fn test_get_file_name_applies_artist_fixes() {
    let track = album_track("t1", "Christoper Titus", "Love Is Evol", "Intro", 1, 2013);

    assert_eq!(
        get_file_name(&track, true),
        PathBuf::from("C/Christopher Titus/[2013] Love Is Evol/01 - Intro.mp3")
    );
}

#[test]
fn test_clean_file_name() {
    assert_eq!(clean_file_name("  Beyoncé  "), "Beyonce");
    assert_eq!(clean_file_name("Sigur Rós"), "Sigur Ros");
    assert_eq!(clean_file_name("a\tb\u{1}c"), "abc");
    assert_eq!(clean_file_name("\"<>|:*?\\/"), "");
    assert_eq!(clean_file_name("東京"), "");
}

#[test]
fn test_get_sortable_artist() {
    assert_eq!(get_sortable_artist("The Strokes"), "Strokes, The");
    assert_eq!(get_sortable_artist("Anberlin"), "Anberlin");
    assert_eq!(get_sortable_artist("A Perfect Circle"), "Perfect Circle, A");
    assert_eq!(get_sortable_artist("An Horse"), "Horse, An");
    assert_eq!(get_sortable_artist("the xx"), "xx, the");

    // articles must be followed by a space
    assert_eq!(get_sortable_artist("Theory of a Deadman"), "Theory of a Deadman");
    assert_eq!(get_sortable_artist("A"), "A");
    assert_eq!(get_sortable_artist(""), "");
}

#[test]
fn test_get_path_char() {
    assert_eq!(get_path_char("2pac"), "#");
    assert_eq!(get_path_char("blink-182"), "B");
    assert_eq!(get_path_char("Weeknd, The"), "W");
    assert_eq!(get_path_char(""), "#");
}
