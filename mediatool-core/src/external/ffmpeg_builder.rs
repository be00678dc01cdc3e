//! FFmpeg command builder utilities
//!
//! This module builds the ffmpeg argument lists for the three extraction
//! operations. Hardware acceleration here means hardware DECODING only
//! (`-hwaccel <method>` before the input); nothing is re-encoded on the GPU.

use super::Invocation;
use std::path::Path;

/// Default seek position for thumbnail capture.
pub const DEFAULT_THUMBNAIL_TIMESTAMP: &str = "00:03:01";

/// PCM output settings for extracted audio (16-bit LE, mono, 16 kHz).
pub const AUDIO_CODEC: &str = "pcm_s16le";
pub const AUDIO_CHANNELS: &str = "1";
pub const AUDIO_SAMPLE_RATE: &str = "16000";

/// Builder for the common prefix of an `ffmpeg` invocation.
///
/// The prefix is emitted in a fixed order: `-hwaccel`, then
/// `-hide_banner -loglevel warning`, then `-y`. Callers append the input and
/// output options to the returned `Invocation`.
pub struct FfmpegCommandBuilder<'a> {
    program: &'a Path,
    hwaccel: Option<&'a str>,
    quiet: bool,
    overwrite: bool,
}

impl<'a> FfmpegCommandBuilder<'a> {
    #[must_use]
    pub fn new(program: &'a Path) -> Self {
        Self {
            program,
            hwaccel: None,
            quiet: false,
            overwrite: false,
        }
    }

    /// Requests hardware decoding with the given method (e.g. `cuda`).
    #[must_use]
    pub fn with_hardware_accel(mut self, method: Option<&'a str>) -> Self {
        self.hwaccel = method;
        self
    }

    /// Hides the banner and limits ffmpeg's own logging to warnings.
    #[must_use]
    pub fn with_quiet_logging(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Overwrites an existing output file without asking.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn build(self) -> Invocation {
        let mut inv = Invocation::new(self.program);
        if let Some(method) = self.hwaccel {
            inv.args(["-hwaccel", method]);
        }
        if self.quiet {
            inv.args(["-hide_banner", "-loglevel", "warning"]);
        }
        if self.overwrite {
            inv.arg("-y");
        }
        inv
    }
}

/// `ffmpeg [-hwaccel M] -y -i SRC -ss TS -vframes 1 -f image2 DEST`
#[must_use]
pub fn build_thumbnail_invocation(
    ffmpeg: &Path,
    hwaccel: Option<&str>,
    source: &Path,
    dest: &Path,
    timestamp: &str,
) -> Invocation {
    let mut inv = FfmpegCommandBuilder::new(ffmpeg)
        .with_hardware_accel(hwaccel)
        .with_overwrite(true)
        .build();
    inv.arg("-i").arg(source);
    inv.args(["-ss", timestamp]);
    inv.args(["-vframes", "1"]);
    inv.args(["-f", "image2"]);
    inv.arg(dest);
    inv
}

/// `ffmpeg [-hwaccel M] -hide_banner -loglevel warning -y -i SRC [-map 0:a:N] -acodec pcm_s16le -ac 1 -ar 16000 DEST`
#[must_use]
pub fn build_audio_invocation(
    ffmpeg: &Path,
    hwaccel: Option<&str>,
    source: &Path,
    dest: &Path,
    stream_index: Option<u32>,
) -> Invocation {
    let mut inv = FfmpegCommandBuilder::new(ffmpeg)
        .with_hardware_accel(hwaccel)
        .with_quiet_logging(true)
        .with_overwrite(true)
        .build();
    inv.arg("-i").arg(source);
    if let Some(index) = stream_index {
        inv.args(["-map".to_string(), format!("0:a:{index}")]);
    }
    inv.args(["-acodec", AUDIO_CODEC]);
    inv.args(["-ac", AUDIO_CHANNELS]);
    inv.args(["-ar", AUDIO_SAMPLE_RATE]);
    inv.arg(dest);
    inv
}

/// `ffmpeg [-hwaccel M] -hide_banner -loglevel warning -y -i SRC [-map 0:s:N] DEST`
///
/// The subtitle format is left to ffmpeg, which picks it from DEST's extension.
#[must_use]
pub fn build_subtitle_invocation(
    ffmpeg: &Path,
    hwaccel: Option<&str>,
    source: &Path,
    dest: &Path,
    stream_index: Option<u32>,
) -> Invocation {
    let mut inv = FfmpegCommandBuilder::new(ffmpeg)
        .with_hardware_accel(hwaccel)
        .with_quiet_logging(true)
        .with_overwrite(true)
        .build();
    inv.arg("-i").arg(source);
    if let Some(index) = stream_index {
        inv.args(["-map".to_string(), format!("0:s:{index}")]);
    }
    inv.arg(dest);
    inv
}
