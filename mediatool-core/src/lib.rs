//! Core library for running ffmpeg and ffprobe media operations.
//!
//! This crate wraps the two external binaries behind `MediaToolInvoker`:
//! thumbnail capture, audio track extraction to 16 kHz mono PCM, subtitle
//! track extraction, and JSON metadata probing. Hardware decoding is added to
//! ffmpeg commands according to an `auto`/`always`/`never` policy.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mediatool_core::{InvokerConfig, MediaOperationRequest, MediaToolInvoker};
//!
//! let config = InvokerConfig::from_env().unwrap();
//! let invoker = MediaToolInvoker::new(config).unwrap();
//!
//! let thumb = MediaOperationRequest::with_paths("/media/show.mkv", "/tmp/show.jpg")
//!     .timestamp("00:01:30");
//! if !invoker.extract_thumbnail(&thumb) {
//!     eprintln!("thumbnail failed, see log");
//! }
//!
//! match invoker.try_probe_metadata(&MediaOperationRequest::new("/media/show.mkv")) {
//!     Ok(meta) => println!("{} audio streams", meta.audio_streams().count()),
//!     Err(e) => eprintln!("probe failed: {e}"),
//! }
//! ```
//!
//! Tests and embedders without real binaries can swap in
//! `MockCommandRunner` via `MediaToolInvoker::with_runner`.

pub mod cancellation;
pub mod config;
pub mod error;
pub mod external;
pub mod hardware_decode;
pub mod invoker;
pub mod media;
pub mod utils;

// Re-exports for public API
pub use cancellation::CancellationToken;
pub use config::{InvokerConfig, InvokerConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use external::{
    CommandOutput, CommandRunner, Invocation, MockCommandRunner, MockOutcome, ProcessRunner,
    check_dependency,
};
pub use hardware_decode::{HardwareDecodePolicy, HardwareDecoding, HwAccelMode};
pub use invoker::MediaToolInvoker;
pub use media::{
    FormatInfo, MediaMetadata, MediaOperation, MediaOperationRequest, StreamInfo, StreamType,
};
pub use utils::{format_bytes, format_duration, parse_timestamp, validate_timestamp};
