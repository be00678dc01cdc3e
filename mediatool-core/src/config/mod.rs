//! Configuration structures and constants for the mediatool-core library.
//!
//! `InvokerConfig` says which binaries to run, whether to request hardware
//! decoding, the default thumbnail position and an optional per-process
//! timeout. It can be built in code (see `InvokerConfigBuilder`) or read from
//! `MEDIATOOL_*` environment variables.

mod builder;
pub mod utils;

use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg_builder::DEFAULT_THUMBNAIL_TIMESTAMP;
use crate::hardware_decode::{DEFAULT_HWACCEL_METHOD, HwAccelMode};
use crate::utils::validate_timestamp;

use std::path::PathBuf;
use std::time::Duration;

pub use builder::InvokerConfigBuilder;

// Environment variable names

pub const ENV_FFMPEG: &str = "MEDIATOOL_FFMPEG";
pub const ENV_FFPROBE: &str = "MEDIATOOL_FFPROBE";
pub const ENV_HWACCEL: &str = "MEDIATOOL_HWACCEL";
pub const ENV_HWACCEL_METHOD: &str = "MEDIATOOL_HWACCEL_METHOD";
pub const ENV_THUMBNAIL_TIMESTAMP: &str = "MEDIATOOL_THUMBNAIL_TIMESTAMP";
pub const ENV_TIMEOUT_SECS: &str = "MEDIATOOL_TIMEOUT_SECS";

/// Main configuration structure for `MediaToolInvoker`.
///
/// # Examples
///
/// ```rust
/// use mediatool_core::config::InvokerConfigBuilder;
/// use mediatool_core::HwAccelMode;
/// use std::time::Duration;
///
/// let config = InvokerConfigBuilder::new()
///     .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
///     .hwaccel_mode(HwAccelMode::Never)
///     .timeout(Duration::from_secs(120))
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    /// Transcoder binary
    pub ffmpeg_path: PathBuf,

    /// Prober binary
    pub ffprobe_path: PathBuf,

    pub hwaccel_mode: HwAccelMode,

    /// Value passed to `-hwaccel` (default `cuda`)
    pub hwaccel_method: String,

    /// Thumbnail seek position used when a request has none
    pub default_timestamp: String,

    /// Kill an external process that runs longer than this
    pub timeout: Option<Duration>,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: ffmpeg_sidecar::paths::ffmpeg_path(),
            ffprobe_path: ffmpeg_sidecar::ffprobe::ffprobe_path(),
            hwaccel_mode: HwAccelMode::default(),
            hwaccel_method: DEFAULT_HWACCEL_METHOD.to_string(),
            default_timestamp: DEFAULT_THUMBNAIL_TIMESTAMP.to_string(),
            timeout: None,
        }
    }
}

impl InvokerConfig {
    /// Defaults overridden by any `MEDIATOOL_*` variables that are set.
    ///
    /// An unparseable `MEDIATOOL_HWACCEL` is an error; an unparseable
    /// `MEDIATOOL_TIMEOUT_SECS` is logged and ignored.
    pub fn from_env() -> CoreResult<Self> {
        let defaults = Self::default();
        let mut builder = InvokerConfigBuilder::new()
            .ffmpeg_path(utils::get_env_path(ENV_FFMPEG, defaults.ffmpeg_path))
            .ffprobe_path(utils::get_env_path(ENV_FFPROBE, defaults.ffprobe_path));

        if let Some(mode) = utils::get_env_string(ENV_HWACCEL) {
            builder = builder.hwaccel_mode(mode.parse()?);
        }
        if let Some(method) = utils::get_env_string(ENV_HWACCEL_METHOD) {
            builder = builder.hwaccel_method(method);
        }
        if let Some(ts) = utils::get_env_string(ENV_THUMBNAIL_TIMESTAMP) {
            builder = builder.default_timestamp(ts);
        }
        if let Some(secs) = utils::get_env_u64(ENV_TIMEOUT_SECS) {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let config = builder.build();
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values that can never work.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg path is empty".to_string()));
        }
        if self.ffprobe_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffprobe path is empty".to_string()));
        }
        if self.hwaccel_method.trim().is_empty() {
            return Err(CoreError::Config("hardware acceleration method is empty".to_string()));
        }
        validate_timestamp(&self.default_timestamp)
            .map_err(|e| CoreError::Config(format!("default thumbnail timestamp: {e}")))?;
        if self.timeout == Some(Duration::ZERO) {
            return Err(CoreError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
