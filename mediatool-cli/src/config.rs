// mediatool-cli/src/config.rs
//
// Builds the core `InvokerConfig` for a CLI run: MEDIATOOL_* environment
// variables first, then any global flags given on the command line.

use crate::cli::Cli;
use crate::error::CliResult;

use mediatool_core::InvokerConfig;
use std::time::Duration;

/// Resolves the invoker configuration for this invocation.
pub fn build_config(cli: &Cli) -> CliResult<InvokerConfig> {
    let mut config = InvokerConfig::from_env()?;

    if let Some(path) = &cli.ffmpeg {
        config.ffmpeg_path = path.clone();
    }
    if let Some(path) = &cli.ffprobe {
        config.ffprobe_path = path.clone();
    }
    if let Some(mode) = cli.hwaccel {
        config.hwaccel_mode = mode;
    }
    if let Some(method) = &cli.hwaccel_method {
        config.hwaccel_method = method.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Some(Duration::from_secs(secs));
    }

    config.validate()?;
    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}
