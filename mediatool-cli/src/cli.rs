// mediatool-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use mediatool_core::HwAccelMode;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "mediatool: thumbnails, audio/subtitle tracks and metadata via ffmpeg",
    long_about = "Runs single ffmpeg/ffprobe operations through the mediatool-core library. \
                  Defaults can also be set with MEDIATOOL_* environment variables; \
                  command-line flags take precedence."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the ffmpeg binary
    #[arg(long, global = true, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary
    #[arg(long, global = true, value_name = "PATH")]
    pub ffprobe: Option<PathBuf>,

    /// Hardware decoding: auto (probe ffmpeg once), always or never
    #[arg(long, global = true, value_name = "MODE")]
    pub hwaccel: Option<HwAccelMode>,

    /// Method passed to -hwaccel (e.g. cuda, vaapi, videotoolbox)
    #[arg(long, global = true, value_name = "METHOD")]
    pub hwaccel_method: Option<String>,

    /// Kill ffmpeg/ffprobe if it runs longer than this many seconds
    #[arg(long, global = true, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Captures a single frame as an image
    Thumbnail(ThumbnailArgs),
    /// Extracts an audio track as 16 kHz mono 16-bit PCM
    Audio(TrackArgs),
    /// Extracts a subtitle track; the format follows DEST's extension
    Subtitle(TrackArgs),
    /// Prints ffprobe's format and stream metadata
    Probe(ProbeArgs),
    /// Shows the ffmpeg/ffprobe versions and hardware decoding status
    Info,
}

#[derive(Args, Debug)]
pub struct ThumbnailArgs {
    /// Input media file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Image file to write (overwritten if it exists)
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Seek position, HH:MM:SS[.fraction] (default 00:03:01)
    #[arg(short = 't', long = "at", value_name = "TIMESTAMP")]
    pub timestamp: Option<String>,
}

#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Input media file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// File to write (overwritten if it exists)
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Index among streams of this type (0 = first audio/subtitle track)
    #[arg(short, long = "stream", value_name = "N")]
    pub stream: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input media file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Pretty-print the JSON document
    #[arg(long, default_value_t = false, conflicts_with = "summary")]
    pub pretty: bool,

    /// Print a short human-readable summary instead of JSON
    #[arg(long, default_value_t = false)]
    pub summary: bool,
}
