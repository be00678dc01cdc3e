//! Implementation of the `probe` subcommand.
//!
//! Prints ffprobe's document as compact JSON (default), pretty JSON, or a short
//! summary listing each stream with the per-type index that `audio -s N` and
//! `subtitle -s N` expect.

use crate::cli::ProbeArgs;
use crate::error::CliResult;

use mediatool_core::{
    CommandRunner, MediaMetadata, MediaOperationRequest, MediaToolInvoker, StreamType,
    format_bytes, format_duration,
};
use std::collections::HashMap;
use std::io::{self, Write};

pub fn run_probe<R: CommandRunner, W: Write>(
    invoker: &MediaToolInvoker<R>,
    args: &ProbeArgs,
    out: &mut W,
) -> CliResult<()> {
    let metadata = invoker.try_probe_metadata(&MediaOperationRequest::new(&args.source))?;

    // Serializing an already-parsed document can only fail on the write side.
    if args.summary {
        write_summary(&metadata, out)?;
    } else if args.pretty {
        serde_json::to_writer_pretty(&mut *out, &metadata).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        serde_json::to_writer(&mut *out, &metadata).map_err(io::Error::from)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Human-readable summary of a probe result.
pub fn write_summary<W: Write>(metadata: &MediaMetadata, out: &mut W) -> io::Result<()> {
    let format = &metadata.format;
    if let Some(name) = &format.filename {
        writeln!(out, "File:     {name}")?;
    }
    writeln!(
        out,
        "Format:   {}",
        format.format_name.as_deref().unwrap_or("unknown")
    )?;
    if let Some(secs) = metadata.duration_secs() {
        writeln!(out, "Duration: {}", format_duration(secs))?;
    }
    if let Some(bytes) = metadata.size_bytes() {
        writeln!(out, "Size:     {}", format_bytes(bytes))?;
    }

    writeln!(out, "Streams:  {}", metadata.streams.len())?;
    let mut per_type: HashMap<StreamType, u32> = HashMap::new();
    for stream in &metadata.streams {
        let kind = stream.stream_type();
        let slot = per_type.entry(kind).or_insert(0);
        let type_index = *slot;
        *slot += 1;

        write!(
            out,
            "  #{:<2} {:<10} {}",
            stream.index,
            kind.to_string(),
            stream.codec_name.as_deref().unwrap_or("-")
        )?;
        if let Some(lang) = stream.language() {
            write!(out, " [{lang}]")?;
        }
        if let Some(title) = stream.title() {
            write!(out, " \"{title}\"")?;
        }
        if matches!(kind, StreamType::Audio | StreamType::Subtitle) {
            write!(out, " (-s {type_index})")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediatool_core::{
        CoreError, HwAccelMode, InvokerConfigBuilder, MockCommandRunner, MockOutcome,
    };
    use std::path::PathBuf;

    const DOC: &str = r#"{
        "format": {"filename": "in.mkv", "format_name": "matroska,webm",
                   "duration": "3725.5", "size": "2097152", "probe_score": 100},
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "hevc"},
            {"index": 1, "codec_type": "audio", "codec_name": "opus", "tags": {"language": "jpn"}},
            {"index": 2, "codec_type": "audio", "codec_name": "aac", "tags": {"language": "eng"}},
            {"index": 3, "codec_type": "subtitle", "codec_name": "ass", "tags": {"title": "Signs"}}
        ]
    }"#;

    fn invoker(stdout: &str) -> MediaToolInvoker<MockCommandRunner> {
        let config = InvokerConfigBuilder::new()
            .ffmpeg_path("ffmpeg")
            .ffprobe_path("ffprobe")
            .hwaccel_mode(HwAccelMode::Never)
            .build();
        let runner = MockCommandRunner::always(MockOutcome::exit(0).with_stdout(stdout));
        MediaToolInvoker::with_runner(config, runner).unwrap()
    }

    fn args(pretty: bool, summary: bool) -> ProbeArgs {
        ProbeArgs {
            source: PathBuf::from("in.mkv"),
            pretty,
            summary,
        }
    }

    #[test]
    fn json_output_keeps_unknown_keys() {
        let mut out = Vec::new();
        run_probe(&invoker(DOC), &args(false, false), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["format"]["probe_score"], 100);
        assert_eq!(value["streams"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn pretty_output_is_multiline() {
        let mut out = Vec::new();
        run_probe(&invoker(DOC), &args(true, false), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().lines().count() > 1);
    }

    #[test]
    fn summary_lists_per_type_indices() {
        let mut out = Vec::new();
        run_probe(&invoker(DOC), &args(false, true), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Format:   matroska,webm"));
        assert!(text.contains("Duration: 01:02:05"));
        assert!(text.contains("Size:     2.00 MiB"));
        assert!(text.contains("opus [jpn] (-s 0)"));
        assert!(text.contains("aac [eng] (-s 1)"));
        assert!(text.contains("ass \"Signs\" (-s 0)"));
    }

    #[test]
    fn empty_document_summary() {
        let mut out = Vec::new();
        run_probe(&invoker(r#"{"format":{},"streams":[]}"#), &args(false, true), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Format:   unknown\nStreams:  0\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_stdout_write_is_io_error() {
        for (pretty, summary) in [(false, false), (true, false), (false, true)] {
            let err = run_probe(&invoker(DOC), &args(pretty, summary), &mut BrokenPipe).unwrap_err();
            match err {
                CoreError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
                other => panic!("expected Io error, got {other:?}"),
            }
        }
    }
}
