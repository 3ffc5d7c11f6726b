mod auth;
mod cache;
mod library;

pub use auth::TokenManager;
pub use cache::CacheError;
pub use cache::TrackCache;
pub use library::LibraryError;
pub use library::RemoteTracks;
pub use library::TrackLibrary;
pub use library::TrackStream;
pub use library::global_tracks;
