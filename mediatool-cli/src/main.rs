// mediatool-cli/src/main.rs
//
// Entry point for the `mediatool` binary.
//
// Parses arguments (clap exits with code 2 on usage errors), installs the
// logger, runs the selected command and maps the outcome to an exit code:
// 0 on success, 1 on any failure.

use clap::Parser;
use mediatool_cli::{Cli, EXIT_FAILURE, error_line, hint_for, logging, run};
use std::io::IsTerminal;
use std::process;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{}", error_line(&e, std::io::stderr().is_terminal()));
        if let Some(hint) = hint_for(&e) {
            log::info!("{}", hint);
        }
        process::exit(EXIT_FAILURE);
    }
}
