//! Hardware decoding detection and configuration.
//!
//! Whether `-hwaccel <method>` goes on an ffmpeg command line is decided by a
//! `HwAccelMode`. In `Auto` mode the answer comes from a one-off capability
//! probe (`ffmpeg -hide_banner -hwaccels`) whose result is cached for the
//! lifetime of the owning `HardwareDecodePolicy`.
//!
//! **Important**: This module is ONLY for hardware DECODING, not encoding.

use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::{CommandRunner, Invocation};

use once_cell::sync::OnceCell;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default hardware decoding method passed to `-hwaccel`.
pub const DEFAULT_HWACCEL_METHOD: &str = "cuda";

/// When to request hardware decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HwAccelMode {
    /// Probe ffmpeg once and use the method only if it is compiled in.
    #[default]
    Auto,
    /// Always pass `-hwaccel`, without probing.
    Always,
    /// Never pass `-hwaccel`.
    Never,
}

impl FromStr for HwAccelMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(HwAccelMode::Auto),
            "always" | "on" | "true" | "1" => Ok(HwAccelMode::Always),
            "never" | "off" | "false" | "0" => Ok(HwAccelMode::Never),
            other => Err(CoreError::Config(format!(
                "Unknown hardware acceleration mode '{other}' (expected auto, always or never)"
            ))),
        }
    }
}

impl fmt::Display for HwAccelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HwAccelMode::Auto => "auto",
            HwAccelMode::Always => "always",
            HwAccelMode::Never => "never",
        })
    }
}

/// Represents hardware decoding capabilities reported by ffmpeg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareDecoding {
    /// Methods listed by `ffmpeg -hwaccels`, in the order printed
    pub methods: Vec<String>,
}

impl HardwareDecoding {
    /// Queries ffmpeg's compiled-in hardware acceleration methods.
    pub fn detect<R: CommandRunner + ?Sized>(runner: &R, ffmpeg: &Path) -> CoreResult<Self> {
        let invocation = build_hwaccels_invocation(ffmpeg);
        let output = runner.run(&invocation, None)?;
        if !output.success() {
            return Err(command_failed_error(
                invocation.program_name(),
                output.exit_code,
                output.stderr_lossy().trim(),
            ));
        }
        Ok(Self {
            methods: parse_hwaccels(&output.stdout_lossy()),
        })
    }

    #[must_use]
    pub fn supports(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }

    /// Logs the detected methods at info level.
    pub fn log_capabilities(&self) {
        if self.methods.is_empty() {
            log::info!("Hardware decoding: None");
        } else {
            log::info!("Hardware decoding methods: {}", self.methods.join(", "));
        }
    }
}

/// `ffmpeg -hide_banner -hwaccels`
#[must_use]
pub fn build_hwaccels_invocation(ffmpeg: &Path) -> Invocation {
    let mut inv = Invocation::new(ffmpeg);
    inv.args(["-hide_banner", "-hwaccels"]);
    inv
}

/// Parses the method list printed by `ffmpeg -hwaccels`.
///
/// The output is a header line ending in `:` followed by one method per line.
/// Each line is taken as a whole token, so `cuda` does not match `cudafoo`.
#[must_use]
pub fn parse_hwaccels(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .filter(|line| !line.contains(char::is_whitespace))
        .map(str::to_string)
        .collect()
}

/// Decides, once, whether `-hwaccel <method>` should be added to commands.
#[derive(Debug)]
pub struct HardwareDecodePolicy {
    mode: HwAccelMode,
    method: String,
    available: OnceCell<bool>,
}

impl HardwareDecodePolicy {
    pub fn new(mode: HwAccelMode, method: impl Into<String>) -> Self {
        Self {
            mode,
            method: method.into(),
            available: OnceCell::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> HwAccelMode {
        self.mode
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the method to pass to `-hwaccel`, or `None` for software decoding.
    ///
    /// In `Auto` mode the first call runs the capability probe; later calls
    /// reuse the cached answer. A failed probe counts as "not available".
    pub fn resolve<R: CommandRunner + ?Sized>(&self, runner: &R, ffmpeg: &Path) -> Option<&str> {
        let enabled = match self.mode {
            HwAccelMode::Always => true,
            HwAccelMode::Never => false,
            HwAccelMode::Auto => *self
                .available
                .get_or_init(|| self.probe(runner, ffmpeg)),
        };
        enabled.then_some(self.method.as_str())
    }

    /// Cached probe result, if the probe has run.
    #[must_use]
    pub fn cached_availability(&self) -> Option<bool> {
        self.available.get().copied()
    }

    fn probe<R: CommandRunner + ?Sized>(&self, runner: &R, ffmpeg: &Path) -> bool {
        match HardwareDecoding::detect(runner, ffmpeg) {
            Ok(caps) => {
                caps.log_capabilities();
                let supported = caps.supports(&self.method);
                if supported {
                    log::info!("Hardware decoding: using {}", self.method);
                } else {
                    log::warn!(
                        "ffmpeg does not list '{}' as a hardware decoding method; falling back to software decoding",
                        self.method
                    );
                }
                supported
            }
            Err(e) => {
                log::warn!(
                    "Hardware decoding probe failed ({}); falling back to software decoding",
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{MockCommandRunner, MockOutcome};

    const HWACCELS: &str = "Hardware acceleration methods:\nvdpau\ncuda\nvaapi\n\n";

    #[test]
    fn parses_method_list() {
        assert_eq!(parse_hwaccels(HWACCELS), vec!["vdpau", "cuda", "vaapi"]);
        assert!(parse_hwaccels("Hardware acceleration methods:\n").is_empty());
    }

    #[test]
    fn supports_is_exact() {
        let caps = HardwareDecoding {
            methods: vec!["cudafoo".to_string()],
        };
        assert!(!caps.supports("cuda"));
    }

    #[test]
    fn mode_from_str() {
        assert_eq!("AUTO".parse::<HwAccelMode>().unwrap(), HwAccelMode::Auto);
        assert_eq!("always".parse::<HwAccelMode>().unwrap(), HwAccelMode::Always);
        assert_eq!("off".parse::<HwAccelMode>().unwrap(), HwAccelMode::Never);
        assert!("gpu".parse::<HwAccelMode>().is_err());
    }

    #[test]
    fn auto_probes_once_and_caches() {
        let runner = MockCommandRunner::always(MockOutcome::exit(0).with_stdout(HWACCELS));
        let policy = HardwareDecodePolicy::new(HwAccelMode::Auto, "cuda");

        assert_eq!(policy.cached_availability(), None);
        for _ in 0..3 {
            assert_eq!(policy.resolve(&runner, Path::new("ffmpeg")), Some("cuda"));
        }
        assert_eq!(runner.call_count(), 1);
        assert_eq!(policy.cached_availability(), Some(true));
    }

    #[test]
    fn auto_falls_back_when_method_missing() {
        let runner = MockCommandRunner::always(
            MockOutcome::exit(0).with_stdout("Hardware acceleration methods:\nvaapi\n"),
        );
        let policy = HardwareDecodePolicy::new(HwAccelMode::Auto, "cuda");
        assert_eq!(policy.resolve(&runner, Path::new("ffmpeg")), None);
        assert_eq!(policy.cached_availability(), Some(false));
    }

    #[test]
    fn auto_treats_probe_failure_as_unavailable() {
        let runner = MockCommandRunner::always(MockOutcome::launch_failure());
        let policy = HardwareDecodePolicy::new(HwAccelMode::Auto, "cuda");
        assert_eq!(policy.resolve(&runner, Path::new("ffmpeg")), None);
        assert_eq!(policy.resolve(&runner, Path::new("ffmpeg")), None);
        assert_eq!(runner.call_count(), 1);
    }

    #[test]
    fn always_and_never_do_not_probe() {
        let runner = MockCommandRunner::new();
        let always = HardwareDecodePolicy::new(HwAccelMode::Always, "cuda");
        let never = HardwareDecodePolicy::new(HwAccelMode::Never, "cuda");
        assert_eq!(always.resolve(&runner, Path::new("ffmpeg")), Some("cuda"));
        assert_eq!(never.resolve(&runner, Path::new("ffmpeg")), None);
        assert_eq!(runner.call_count(), 0);
    }
}
