//! Write catalog metadata into the ID3 tag of a downloaded file.

use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{Tag, TagLike, Version};

use crate::{
    catalog::{CatalogClient, ClientError},
    types::Track,
};

pub const COVER_DESCRIPTION: &str = "Cover";

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("cannot write tag: {0}")]
    Id3(#[from] id3::Error),

    #[error("cannot fetch cover art: {0}")]
    Cover(#[from] ClientError),
}

/// Overwrites a text frame when there is a value and leaves it alone otherwise.
fn set_text_opt(tag: &mut Tag, id: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        tag.set_text(id, value);
    }
}

/// Applies the text frames of `track` to `tag`.
///
/// Year (TDRC), title (TIT2), track number (TRCK), lead performer (TPE1, the
/// album artist falling back to the track artist) and album (TALB).
pub fn apply_text_frames(tag: &mut Tag, track: &Track) {
    set_text_opt(
        tag,
        "TDRC",
        track.year.filter(|y| *y != 0).map(|y| y.to_string()),
    );
    set_text_opt(tag, "TIT2", track.title.clone());
    set_text_opt(
        tag,
        "TRCK",
        track.track_number.filter(|n| *n != 0).map(|n| n.to_string()),
    );
    set_text_opt(
        tag,
        "TPE1",
        track.album_artist.clone().or_else(|| track.artist.clone()),
    );
    set_text_opt(tag, "TALB", track.album.clone());
}

pub fn has_cover(tag: &Tag) -> bool {
    tag.pictures().next().is_some()
}

/// Tags the file at `path` with the metadata of `track`.
///
/// Cover art is downloaded from the first album art reference, and only when the
/// file has no picture yet.
pub async fn set_metadata<C: CatalogClient>(
    client: &C,
    path: &Path,
    track: &Track,
) -> Result<(), TagError> {
    // Load existing tag if possible; otherwise start fresh.
    let mut tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());

    apply_text_frames(&mut tag, track);

    if !has_cover(&tag) {
        if let Some(art) = track.album_art_ref.first() {
            let data = client.fetch_url(&art.url).await?;
            let _ = tag.add_frame(Picture {
                mime_type: "image/jpeg".to_string(),
                picture_type: PictureType::CoverFront,
                description: COVER_DESCRIPTION.to_string(),
                data,
            });
        }
    }

    tag.write_to_path(path, Version::Id3v24)?;
    Ok(())
}
