use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::path::Path;
use tempfile::tempdir;

const ENV_VARS: [&str; 7] = [
    "RUST_LOG",
    "MEDIATOOL_FFMPEG",
    "MEDIATOOL_FFPROBE",
    "MEDIATOOL_HWACCEL",
    "MEDIATOOL_HWACCEL_METHOD",
    "MEDIATOOL_THUMBNAIL_TIMESTAMP",
    "MEDIATOOL_TIMEOUT_SECS",
];

// Helper function to get the path to the compiled binary, isolated from the
// caller's MEDIATOOL_* settings
fn mediatool_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mediatool").expect("Failed to find mediatool binary");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_usage_errors_exit_with_2() {
    mediatool_cmd().assert().code(2);
    mediatool_cmd().args(["thumbnail", "in.mkv"]).assert().code(2);
    mediatool_cmd()
        .args(["audio", "in.mkv", "out.wav", "--stream", "abc"])
        .assert()
        .code(2);
    mediatool_cmd()
        .args(["probe", "in.mkv", "--hwaccel", "sometimes"])
        .assert()
        .code(2);
}

#[test]
fn test_empty_destination_is_rejected() {
    mediatool_cmd()
        .args(["subtitle", "in.mkv", ""])
        .assert()
        .failure();
}

#[test]
fn test_missing_ffprobe_exits_with_1() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("no-such-ffprobe");

    mediatool_cmd()
        .arg("probe")
        .arg("in.mkv")
        .arg("--ffprobe")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(contains("Failed to launch"));
    Ok(())
}

#[test]
fn test_bad_timestamp_exits_with_1() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let dest = dir.path().join("t.jpg");

    mediatool_cmd()
        .args(["thumbnail", "in.mkv"])
        .arg(&dest)
        .args(["--at", "1:2", "--hwaccel", "never"])
        .assert()
        .code(1)
        .stderr(contains("HH:MM:SS"));
    assert!(!dest.exists());
    Ok(())
}

#[test]
fn test_error_is_printed_with_logging_off() {
    mediatool_cmd()
        .env("RUST_LOG", "off")
        .args(["thumbnail", "in.mkv", "out.jpg", "--at", "1:2", "--hwaccel", "never"])
        .assert()
        .code(1)
        .stderr(contains("Error: Invalid argument"));
}

#[test]
fn test_invalid_env_hwaccel_exits_with_1() {
    mediatool_cmd()
        .env("MEDIATOOL_HWACCEL", "maybe")
        .arg("info")
        .assert()
        .code(1)
        .stderr(contains("Unknown hardware acceleration mode"));
}

#[cfg(unix)]
mod fake_binaries {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }

    /// ffmpeg stand-in: answers -version and -hwaccels, otherwise records its
    /// arguments into the last one (the destination).
    fn fake_ffmpeg(dir: &Path) -> PathBuf {
        write_script(
            dir,
            "ffmpeg",
            r#"case "$1" in
  -version) echo "ffmpeg version 7.1-fake"; exit 0 ;;
esac
if [ "$2" = "-hwaccels" ]; then
  printf 'Hardware acceleration methods:\nvaapi\n'; exit 0
fi
for last; do :; done
printf '%s ' "$@" > "$last""#,
        )
    }

    fn fake_ffprobe(dir: &Path) -> PathBuf {
        write_script(
            dir,
            "ffprobe",
            r#"if [ "$1" = "-version" ]; then echo "ffprobe version 7.1-fake"; exit 0; fi
echo '{"format":{"filename":"in.mkv","format_name":"matroska,webm","duration":"61.0"},"streams":[{"index":0,"codec_type":"video","codec_name":"h264"},{"index":1,"codec_type":"audio","codec_name":"flac","tags":{"language":"eng"}}]}'"#,
        )
    }

    #[test]
    fn test_thumbnail_writes_destination() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let ffmpeg = fake_ffmpeg(dir.path());
        let dest = dir.path().join("thumb.jpg");

        mediatool_cmd()
            .arg("--ffmpeg")
            .arg(&ffmpeg)
            .args(["thumbnail", "in.mkv"])
            .arg(&dest)
            .assert()
            .success();

        // Auto mode probed, found no cuda, and fell back to software decoding
        let recorded = fs::read_to_string(&dest)?;
        assert!(recorded.starts_with("-y -i in.mkv -ss 00:03:01 -vframes 1 -f image2"));
        Ok(())
    }

    #[test]
    fn test_audio_uses_configured_hwaccel_method() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let ffmpeg = fake_ffmpeg(dir.path());
        let dest = dir.path().join("track.wav");

        mediatool_cmd()
            .env("MEDIATOOL_FFMPEG", &ffmpeg)
            .env("MEDIATOOL_HWACCEL_METHOD", "vaapi")
            .args(["audio", "in.mkv"])
            .arg(&dest)
            .args(["-s", "1"])
            .assert()
            .success();

        let recorded = fs::read_to_string(&dest)?;
        assert!(recorded.starts_with("-hwaccel vaapi -hide_banner -loglevel warning -y -i in.mkv"));
        assert!(recorded.contains("-map 0:a:1 -acodec pcm_s16le -ac 1 -ar 16000"));
        Ok(())
    }

    #[test]
    fn test_failed_extraction_exits_with_1() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let ffmpeg = write_script(
            dir.path(),
            "ffmpeg",
            "echo \"Stream map '0:s:9' matches no streams.\" >&2\nexit 1",
        );

        mediatool_cmd()
            .arg("--ffmpeg")
            .arg(&ffmpeg)
            .args(["subtitle", "in.mkv", "out.srt", "-s", "9", "--hwaccel", "never"])
            .assert()
            .code(1)
            .stderr(contains("matches no streams"))
            .stderr(contains("probe --summary"));
        Ok(())
    }

    #[test]
    fn test_probe_prints_json_and_summary() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let ffprobe = fake_ffprobe(dir.path());

        let output = mediatool_cmd()
            .arg("--ffprobe")
            .arg(&ffprobe)
            .args(["probe", "in.mkv"])
            .output()?;
        assert!(output.status.success());
        let doc: serde_json::Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(doc["format"]["format_name"], "matroska,webm");
        assert_eq!(doc["streams"][1]["codec_name"], "flac");

        mediatool_cmd()
            .arg("--ffprobe")
            .arg(&ffprobe)
            .args(["probe", "in.mkv", "--summary"])
            .assert()
            .success()
            .stdout(contains("Duration: 00:01:01"))
            .stdout(contains("flac [eng] (-s 0)"));
        Ok(())
    }

    #[test]
    fn test_info_reports_binaries() -> Result<(), Box<dyn Error>> {
        let dir = tempdir()?;
        let ffmpeg = fake_ffmpeg(dir.path());
        let ffprobe = fake_ffprobe(dir.path());

        mediatool_cmd()
            .arg("--ffmpeg")
            .arg(&ffmpeg)
            .arg("--ffprobe")
            .arg(&ffprobe)
            .args(["info", "--hwaccel-method", "vaapi"])
            .assert()
            .success()
            .stdout(contains("ffmpeg version 7.1-fake"))
            .stdout(contains("ffprobe version 7.1-fake"))
            .stdout(contains("Decoding with: -hwaccel vaapi"));
        Ok(())
    }
}
