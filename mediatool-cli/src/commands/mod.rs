//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command. The
//! functions are generic over the core `CommandRunner` so they can be driven
//! by a scripted runner in tests.

/// `thumbnail`, `audio` and `subtitle`: single-file extraction commands.
pub mod extract;

/// `info`: binary versions and hardware decoding status.
pub mod info;

/// `probe`: ffprobe metadata as JSON or a short summary.
pub mod probe;
