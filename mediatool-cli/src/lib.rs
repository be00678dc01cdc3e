// mediatool-cli/src/lib.rs
//
// Library portion of the mediatool CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ProbeArgs, ThumbnailArgs, TrackArgs};
pub use error::{CliResult, EXIT_FAILURE, error_line, hint_for};

use commands::extract::{TrackKind, run_thumbnail, run_track};
use commands::info::run_info;
use commands::probe::run_probe;
use mediatool_core::MediaToolInvoker;

/// Runs the parsed command against real ffmpeg/ffprobe processes.
pub fn run(cli: &Cli) -> CliResult<()> {
    let config = config::build_config(cli)?;
    let invoker = MediaToolInvoker::new(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Thumbnail(args) => run_thumbnail(&invoker, args),
        Commands::Audio(args) => run_track(&invoker, TrackKind::Audio, args),
        Commands::Subtitle(args) => run_track(&invoker, TrackKind::Subtitle, args),
        Commands::Probe(args) => run_probe(&invoker, args, &mut out),
        Commands::Info => run_info(&invoker, &mut out),
    }
}
