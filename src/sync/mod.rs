//! Operations that act on the library as a whole: downloading it, replacing
//! uploads with store tracks, exporting videos and computing statistics.

pub mod download;
pub mod export;
pub mod matching;
pub mod stats;

pub use download::{DownloadError, DownloadPlan, DownloadReport, Downloader};
pub use export::{ExportReport, Exporter};
pub use matching::{MatchReport, match_uploaded};
