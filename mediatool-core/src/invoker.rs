// ============================================================================
// mediatool-core/src/invoker.rs
// ============================================================================
//
// MEDIA TOOL INVOKER: Thumbnail, Audio, Subtitle and Metadata Operations
//
// Each operation validates its request, builds one ffmpeg/ffprobe invocation,
// runs it through the configured CommandRunner and interprets the result.
// There is no retry and no state carried between calls apart from the cached
// hardware decoding probe.
//
// Every operation is exposed twice:
// - `try_*` returns the typed `CoreResult`, for callers that want the reason
// - the plain method logs the error and returns `bool` / `Option`
//
// AI-ASSISTANT-INFO: Entry point for the four media operations

use crate::config::InvokerConfig;
use crate::error::{CoreError, CoreResult, command_failed_error, require_path};
use crate::external::ffmpeg_builder::{
    build_audio_invocation, build_subtitle_invocation, build_thumbnail_invocation,
};
use crate::external::ffprobe_executor::probe_media;
use crate::external::{CommandRunner, Invocation, ProcessRunner, check_dependency};
use crate::hardware_decode::HardwareDecodePolicy;
use crate::media::{MediaMetadata, MediaOperation, MediaOperationRequest};
use crate::utils::validate_timestamp;

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Runs ffmpeg/ffprobe operations through a `CommandRunner`.
///
/// `MediaToolInvoker` is `Send + Sync`; one instance can serve concurrent
/// callers, each call spawning its own process.
///
/// # Examples
///
/// ```rust,no_run
/// use mediatool_core::{InvokerConfig, MediaOperationRequest, MediaToolInvoker};
///
/// let invoker = MediaToolInvoker::new(InvokerConfig::default()).unwrap();
/// let ok = invoker.extract_audio_track(
///     &MediaOperationRequest::with_paths("movie.mkv", "movie.wav").stream_index(1),
/// );
/// if let Some(meta) = invoker.probe_metadata(&MediaOperationRequest::new("movie.mkv")) {
///     println!("{} streams, audio extracted: {ok}", meta.streams.len());
/// }
/// ```
#[derive(Debug)]
pub struct MediaToolInvoker<R: CommandRunner = ProcessRunner> {
    runner: R,
    config: InvokerConfig,
    hw_decode: HardwareDecodePolicy,
}

impl MediaToolInvoker<ProcessRunner> {
    /// Creates an invoker that spawns real processes, honouring `config.timeout`.
    pub fn new(config: InvokerConfig) -> CoreResult<Self> {
        let runner = ProcessRunner::new().with_timeout(config.timeout);
        Self::with_runner(config, runner)
    }
}

impl<R: CommandRunner> MediaToolInvoker<R> {
    /// Creates an invoker on top of a caller-supplied runner.
    ///
    /// `config.timeout` is only enforced by runners that implement it.
    pub fn with_runner(config: InvokerConfig, runner: R) -> CoreResult<Self> {
        config.validate()?;
        let hw_decode = HardwareDecodePolicy::new(config.hwaccel_mode, config.hwaccel_method.clone());
        Ok(Self {
            runner,
            config,
            hw_decode,
        })
    }

    #[must_use]
    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// The `-hwaccel` method in effect, running the capability probe if needed.
    pub fn hardware_decoding(&self) -> Option<&str> {
        self.hw_decode.resolve(&self.runner, &self.config.ffmpeg_path)
    }

    #[must_use]
    pub fn hardware_decode_policy(&self) -> &HardwareDecodePolicy {
        &self.hw_decode
    }

    /// Runs `-version` on the configured ffmpeg and ffprobe, in that order.
    pub fn check_dependencies(&self) -> Vec<(&Path, CoreResult<String>)> {
        [&self.config.ffmpeg_path, &self.config.ffprobe_path]
            .into_iter()
            .map(|program| {
                (
                    program.as_path(),
                    check_dependency(&self.runner, program),
                )
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Thumbnail
    // ------------------------------------------------------------------------

    /// Captures one frame at the request's timestamp (or the configured
    /// default) into the destination image.
    pub fn try_extract_thumbnail(&self, request: &MediaOperationRequest) -> CoreResult<()> {
        let (source, dest) = self.require_paths(request)?;
        let timestamp = request
            .timestamp
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.config.default_timestamp);
        validate_timestamp(timestamp)?;

        let invocation = build_thumbnail_invocation(
            &self.config.ffmpeg_path,
            self.hardware_decoding(),
            &source,
            &dest,
            timestamp,
        );
        self.run_extraction(MediaOperation::Thumbnail, &invocation, request, &dest)
    }

    /// Like `try_extract_thumbnail`, logging any failure and returning `false`.
    pub fn extract_thumbnail(&self, request: &MediaOperationRequest) -> bool {
        recover(MediaOperation::Thumbnail, request, self.try_extract_thumbnail(request)).is_some()
    }

    // ------------------------------------------------------------------------
    // Audio
    // ------------------------------------------------------------------------

    /// Extracts an audio stream as 16 kHz mono 16-bit PCM. Without a stream
    /// index ffmpeg picks its default audio stream.
    pub fn try_extract_audio_track(&self, request: &MediaOperationRequest) -> CoreResult<()> {
        let (source, dest) = self.require_paths(request)?;
        let invocation = build_audio_invocation(
            &self.config.ffmpeg_path,
            self.hardware_decoding(),
            &source,
            &dest,
            request.stream_index,
        );
        self.run_extraction(MediaOperation::AudioTrack, &invocation, request, &dest)
    }

    pub fn extract_audio_track(&self, request: &MediaOperationRequest) -> bool {
        recover(MediaOperation::AudioTrack, request, self.try_extract_audio_track(request)).is_some()
    }

    // ------------------------------------------------------------------------
    // Subtitle
    // ------------------------------------------------------------------------

    /// Extracts a subtitle stream; the output format follows the destination's extension.
    pub fn try_extract_subtitle_track(&self, request: &MediaOperationRequest) -> CoreResult<()> {
        let (source, dest) = self.require_paths(request)?;
        let invocation = build_subtitle_invocation(
            &self.config.ffmpeg_path,
            self.hardware_decoding(),
            &source,
            &dest,
            request.stream_index,
        );
        self.run_extraction(MediaOperation::SubtitleTrack, &invocation, request, &dest)
    }

    pub fn extract_subtitle_track(&self, request: &MediaOperationRequest) -> bool {
        recover(
            MediaOperation::SubtitleTrack,
            request,
            self.try_extract_subtitle_track(request),
        )
        .is_some()
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    /// Runs ffprobe and parses its JSON. A destination on the request is ignored.
    pub fn try_probe_metadata(&self, request: &MediaOperationRequest) -> CoreResult<MediaMetadata> {
        let source = require_path(Some(&request.source), "Source")?;
        probe_media(
            &self.runner,
            &self.config.ffprobe_path,
            &source,
            request.cancel.as_ref(),
        )
    }

    /// `None` means the probe failed; an empty document is still `Some`.
    pub fn probe_metadata(&self, request: &MediaOperationRequest) -> Option<MediaMetadata> {
        recover(MediaOperation::Probe, request, self.try_probe_metadata(request))
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn require_paths(&self, request: &MediaOperationRequest) -> CoreResult<(PathBuf, PathBuf)> {
        let source = require_path(Some(&request.source), "Source")?;
        let dest = require_path(request.destination.as_ref(), "Destination")?;
        Ok((source, dest))
    }

    fn run_extraction(
        &self,
        operation: MediaOperation,
        invocation: &Invocation,
        request: &MediaOperationRequest,
        dest: &Path,
    ) -> CoreResult<()> {
        log::debug!("Running {}: {}", operation, invocation);
        let start = Instant::now();

        let output = self.runner.run(invocation, request.cancel.as_ref())?;
        if !output.success() {
            return Err(command_failed_error(
                invocation.program_name(),
                output.exit_code,
                output.stderr_lossy().trim(),
            ));
        }

        log::info!(
            "{} finished in {:.2}s: {} -> {}",
            operation,
            start.elapsed().as_secs_f64(),
            request.source.display(),
            dest.display()
        );
        Ok(())
    }
}

/// Converts an operation error into `None`, logging one line that says which
/// kind of failure it was.
fn recover<T>(
    operation: MediaOperation,
    request: &MediaOperationRequest,
    result: CoreResult<T>,
) -> Option<T> {
    let err = match result {
        Ok(value) => return Some(value),
        Err(err) => err,
    };
    let source = request.source.display();

    match &err {
        CoreError::InvalidArgument(msg) => {
            log::warn!("Rejected {} request: {}", operation, msg);
        }
        CoreError::ProcessLaunchFailure { program, source: io_err } => {
            log::error!(
                "{} of '{}' failed: could not start {}: {}",
                operation,
                source,
                program,
                io_err
            );
        }
        CoreError::ProcessExitFailure { .. } => {
            log::error!("{} of '{}' failed: {}", operation, source, err);
        }
        CoreError::OutputParseFailure(msg) => {
            log::error!("{} of '{}' returned unusable output: {}", operation, source, msg);
        }
        CoreError::Cancelled(_) => {
            log::warn!("{} of '{}' was cancelled", operation, source);
        }
        CoreError::TimedOut { .. } => {
            log::error!("{} of '{}' did not finish: {}", operation, source, err);
        }
        _ => {
            log::error!("{} of '{}' failed: {}", operation, source, err);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InvokerConfigBuilder;
    use crate::external::{MockCommandRunner, MockOutcome};
    use crate::hardware_decode::HwAccelMode;

    fn invoker(mode: HwAccelMode, runner: MockCommandRunner) -> MediaToolInvoker<MockCommandRunner> {
        let config = InvokerConfigBuilder::new()
            .ffmpeg_path("ffmpeg")
            .ffprobe_path("ffprobe")
            .hwaccel_mode(mode)
            .build();
        MediaToolInvoker::with_runner(config, runner).unwrap()
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn invoker_is_send_and_sync() {
        assert_send_sync::<MediaToolInvoker<ProcessRunner>>();
        assert_send_sync::<MediaToolInvoker<MockCommandRunner>>();
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = InvokerConfigBuilder::new().ffmpeg_path("").build();
        let err = MediaToolInvoker::with_runner(config, MockCommandRunner::new()).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn thumbnail_uses_default_timestamp_and_hwaccel() {
        let runner = MockCommandRunner::always(MockOutcome::exit(0));
        let inv = invoker(HwAccelMode::Always, runner);

        assert!(inv.extract_thumbnail(&MediaOperationRequest::with_paths("in.mkv", "out.jpg")));

        let args = inv.runner().received_args();
        assert_eq!(args.len(), 1);
        assert_eq!(
            args[0],
            [
                "-hwaccel", "cuda", "-y", "-i", "in.mkv", "-ss", "00:03:01", "-vframes", "1",
                "-f", "image2", "out.jpg"
            ]
        );
    }

    #[test]
    fn empty_timestamp_falls_back_to_default() {
        let runner = MockCommandRunner::always(MockOutcome::exit(0));
        let inv = invoker(HwAccelMode::Never, runner);
        let req = MediaOperationRequest::with_paths("in.mkv", "out.jpg").timestamp("");
        assert!(inv.extract_thumbnail(&req));
        assert!(inv.runner().received_args()[0].contains(&"00:03:01".to_string()));
    }

    #[test]
    fn bad_timestamp_never_spawns() {
        let inv = invoker(HwAccelMode::Auto, MockCommandRunner::new());
        let req = MediaOperationRequest::with_paths("in.mkv", "out.jpg").timestamp("3m");
        let err = inv.try_extract_thumbnail(&req).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
        assert_eq!(inv.runner().call_count(), 0);
    }

    #[test]
    fn missing_destination_never_spawns_or_probes() {
        let inv = invoker(HwAccelMode::Auto, MockCommandRunner::new());
        let req = MediaOperationRequest::new("in.mkv");
        assert!(!inv.extract_thumbnail(&req));
        assert!(!inv.extract_audio_track(&req));
        assert!(!inv.extract_subtitle_track(&req));
        assert_eq!(inv.runner().call_count(), 0);
        assert_eq!(inv.hardware_decode_policy().cached_availability(), None);
    }

    #[test]
    fn exit_failure_carries_stderr() {
        let runner = MockCommandRunner::always(
            MockOutcome::exit(1).with_stderr("Stream map '0:s:4' matches no streams.\n"),
        );
        let inv = invoker(HwAccelMode::Never, runner);
        let req = MediaOperationRequest::with_paths("in.mkv", "out.srt").stream_index(4);
        match inv.try_extract_subtitle_track(&req).unwrap_err() {
            CoreError::ProcessExitFailure { program, code, stderr } => {
                assert_eq!(program, "ffmpeg");
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "Stream map '0:s:4' matches no streams.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn killed_process_is_failure() {
        let inv = invoker(HwAccelMode::Never, MockCommandRunner::always(MockOutcome::signalled()));
        assert!(!inv.extract_audio_track(&MediaOperationRequest::with_paths("in.mkv", "out.wav")));
    }

    #[test]
    fn probe_ignores_destination_and_hwaccel() {
        let runner = MockCommandRunner::always(
            MockOutcome::exit(0).with_stdout(r#"{"format":{},"streams":[]}"#),
        );
        let inv = invoker(HwAccelMode::Auto, runner);
        let req = MediaOperationRequest::with_paths("in.mkv", "ignored.json");
        assert!(inv.probe_metadata(&req).is_some());

        let calls = inv.runner().received_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program(), Path::new("ffprobe"));
        assert_eq!(inv.hardware_decode_policy().cached_availability(), None);
    }

    #[test]
    fn check_dependencies_reports_each_binary() {
        let runner = MockCommandRunner::new();
        runner.push("-version", MockOutcome::exit(0).with_stdout("ffmpeg version 7.0\n"));
        runner.push("-version", MockOutcome::launch_failure());
        let inv = invoker(HwAccelMode::Never, runner);

        let deps = inv.check_dependencies();
        assert_eq!(deps[0].0, Path::new("ffmpeg"));
        assert_eq!(deps[0].1.as_deref().unwrap(), "ffmpeg version 7.0");
        assert!(matches!(deps[1].1, Err(CoreError::ProcessLaunchFailure { .. })));
    }

    #[test]
    fn cancelled_request_reports_cancelled() {
        let token = crate::CancellationToken::new();
        token.cancel();
        let inv = invoker(HwAccelMode::Never, MockCommandRunner::always(MockOutcome::exit(0)));
        let req = MediaOperationRequest::with_paths("in.mkv", "out.wav").cancel_token(token);
        assert!(matches!(
            inv.try_extract_audio_track(&req),
            Err(CoreError::Cancelled(_))
        ));
        assert!(!inv.extract_audio_track(&req));
    }
}
