//! # CLI Module
//!
//! Command implementations of the `tunesync` binary. Each command builds the
//! clients it needs from the [`Settings`](crate::config::Settings), drives the
//! library code and presents the result with the crate's output macros,
//! `indicatif` spinners and `tabled` tables.
//!
//! ## Commands
//!
//! ### Library
//!
//! - [`refresh`] - Fetches the full track listing and overwrites the cache
//! - [`validate`] - Checks the stored credentials of every client
//! - [`uploaded`] - Number and size of uploaded tracks
//! - [`years`] / [`genres`] - Histograms of the library
//! - [`videos`] - Tracks carrying a music video
//!
//! ### Catalog
//!
//! - [`search`] - Searches the store catalog for artists and tracks
//! - [`match_tracks`] - Replaces uploads with their store counterparts
//! - [`download`] - Mirrors library or store tracks into a directory
//!
//! ### Video platform
//!
//! - [`auth`] - Authorizes the video platform with the PKCE flow
//! - [`to_youtube`] - Adds liked tracks' videos to a playlist
//!
//! ## Error Handling
//!
//! Authentication failures, an unreadable cache and a missing playback device
//! terminate the program through `error!` with exit status 1. Failures of a
//! single track, match or video are reported with `warning!` and the command
//! carries on.
//!
//! ## Usage
//!
//! ```bash
//! tunesync validate
//! tunesync refresh
//! tunesync download --thumbs-up --min-album-rating 2 --char-prefix ~/Music
//! tunesync export --thumbs-up to-youtube "Liked videos"
//! ```

mod auth;
mod common;
mod download;
mod export;
mod library;
mod matching;
mod search;

pub use auth::auth;
pub use download::TrackSource;
pub use download::download;
pub use export::to_youtube;
pub use library::genres;
pub use library::refresh;
pub use library::uploaded;
pub use library::validate;
pub use library::videos;
pub use library::years;
pub use matching::match_tracks;
pub use search::search;
