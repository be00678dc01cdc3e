// ============================================================================
// mediatool-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for InvokerConfig
//
// Fluent construction of InvokerConfig. Unset fields keep the values from
// InvokerConfig::default(); validation is left to InvokerConfig::validate so
// that the builder itself never fails.

use std::path::PathBuf;
use std::time::Duration;

use super::InvokerConfig;
use crate::hardware_decode::HwAccelMode;

/// Builder for creating InvokerConfig instances.
#[derive(Debug, Clone, Default)]
pub struct InvokerConfigBuilder {
    config: InvokerConfig,
}

impl InvokerConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = path.into();
        self
    }

    #[must_use]
    pub fn ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_path = path.into();
        self
    }

    #[must_use]
    pub fn hwaccel_mode(mut self, mode: HwAccelMode) -> Self {
        self.config.hwaccel_mode = mode;
        self
    }

    #[must_use]
    pub fn hwaccel_method(mut self, method: impl Into<String>) -> Self {
        self.config.hwaccel_method = method.into();
        self
    }

    #[must_use]
    pub fn default_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.config.default_timestamp = timestamp.into();
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    #[must_use]
    pub fn build(self) -> InvokerConfig {
        self.config
    }
}
