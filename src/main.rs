use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use tunesync::{cli, config, error, organize::FilterOptions};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Data directory holding `.env`, credentials and the track cache
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch the full track listing and overwrite the cache
    Refresh,

    /// Check the stored credentials
    Validate,

    /// Authorize with the video platform
    Auth,

    /// Show how many tracks were uploaded and their size
    Uploaded,

    /// Replace uploaded tracks with matching store tracks
    MatchTracks,

    /// Chart the library by release year
    Years,

    /// Chart the library by genre
    Genres,

    /// List tracks carrying a music video
    Videos,

    /// Search the store catalog
    Search(SearchOptions),

    /// Export tracks to another service
    Export(ExportOptions),

    /// Download tracks into a directory
    Download(DownloadOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search for an artist and list its id
    #[clap(long)]
    artist: Option<String>,

    /// Free-text query
    query: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// Only export thumbs-up tracks
    #[clap(long)]
    thumbs_up: bool,

    #[command(subcommand)]
    command: ExportSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ExportSubcommand {
    /// Add the tracks' music videos to a playlist
    ToYoutube(ToYoutubeOptions),
}

#[derive(Parser, Debug, Clone)]
pub struct ToYoutubeOptions {
    /// Title of the playlist, created when missing
    playlist_name: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOptions {
    /// Only tracks of this album artist
    #[clap(long)]
    artist: Option<String>,

    /// Download all albums of a store artist; can be repeated
    #[clap(long, action = ArgAction::Append)]
    artist_id: Vec<String>,

    /// Only tracks of this album
    #[clap(long)]
    album: Option<String>,

    /// Download a store album; can be repeated
    #[clap(long, action = ArgAction::Append)]
    album_id: Vec<String>,

    /// Only thumbs-up tracks
    #[clap(long)]
    thumbs_up: bool,

    /// Leave out thumbs-down tracks
    #[clap(long)]
    skip_thumbs_down: bool,

    /// Download from the store catalog (--artist-id/--album-id) instead of the library
    #[clap(long)]
    global: bool,

    /// Only albums whose thumbs-up minus thumbs-down tally reaches this value
    #[clap(long)]
    min_album_rating: Option<i32>,

    /// Bucket files below the first letter of the artist
    #[clap(long)]
    char_prefix: bool,

    /// Target directory
    destination: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let data_dir = cli.config.as_deref();
    if let Err(e) = config::load_env(data_dir).await {
        error!("Cannot load environment. Err: {}", e);
    }
    let settings = config::Settings::from_env(data_dir);

    match cli.command {
        Command::Refresh => cli::refresh(&settings).await,
        Command::Validate => cli::validate(&settings).await,
        Command::Auth => cli::auth(&settings).await,
        Command::Uploaded => cli::uploaded(&settings).await,
        Command::MatchTracks => cli::match_tracks(&settings).await,
        Command::Years => cli::years(&settings).await,
        Command::Genres => cli::genres(&settings).await,
        Command::Videos => cli::videos(&settings).await,
        Command::Search(opt) => cli::search(&settings, opt.artist, opt.query).await,
        Command::Export(opt) => match opt.command {
            ExportSubcommand::ToYoutube(t) => {
                cli::to_youtube(&settings, &t.playlist_name, opt.thumbs_up).await
            }
        },
        Command::Download(opt) => {
            let source = if opt.global {
                cli::TrackSource::Global {
                    artist_ids: opt.artist_id,
                    album_ids: opt.album_id,
                }
            } else {
                cli::TrackSource::Library
            };
            let options = FilterOptions {
                artist: opt.artist,
                album: opt.album,
                thumbs_up_only: opt.thumbs_up,
                skip_thumbs_down: opt.skip_thumbs_down,
                min_album_rating: opt.min_album_rating,
            };
            cli::download(&settings, source, options, opt.destination, opt.char_prefix).await
        }
        Command::Completions(_) => {}
    }
}
