// ============================================================================
// mediatool-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger backend for the `log` facade
//
// The core library only emits through `log`; this module installs the backend
// for the binary. Lines go to stderr so that `probe` output on stdout stays
// machine-readable.
//
// USAGE:
// - default: info and above
// - -v/--verbose: debug and above
// - RUST_LOG=<filter>: env_logger filter syntax, applied on top
//
// AI-ASSISTANT-INFO: Logger initialization

use log::LevelFilter;
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};

/// Log level for the given verbosity flag.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn level_label(level: log::Level, color: bool) -> String {
    let label = match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    };
    if !color {
        return label.to_string();
    }
    match level {
        log::Level::Error => label.bright_red().to_string(),
        log::Level::Warn => label.yellow().to_string(),
        log::Level::Info => label.green().to_string(),
        log::Level::Debug => label.blue().to_string(),
        log::Level::Trace => label.magenta().to_string(),
    }
}

/// Installs the global logger. Safe to call once per process.
pub fn init(verbose: bool) {
    let level = level_for(verbose);
    let color = std::io::stderr().is_terminal();

    let mut builder = env_logger::Builder::new();
    builder
        .format(move |buf, record| {
            let time = chrono::Local::now().format("%H:%M:%S").to_string();
            let time = if color { time.dimmed().to_string() } else { time };
            writeln!(
                buf,
                "{} {} {}",
                time,
                level_label(record.level(), color),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env();

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
    log::debug!("Logger initialized with level: {}", level);
}
