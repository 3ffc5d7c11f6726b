pub mod filter;
pub mod naming;
pub mod tagging;

pub use filter::{FilterOptions, TrackFilter, album_ratings, filter_tracks, is_uploaded};
pub use naming::{get_file_name, get_path_char, get_sortable_artist};
pub use tagging::set_metadata;
