//! Utility functions for formatting and timestamp handling.
//!
//! These are shared by the invoker (timestamp validation for thumbnail capture)
//! and by front ends that want to print a probed file's duration or size.

use crate::error::{CoreError, CoreResult};

/// Renders a duration in seconds as `HH:MM:SS`, truncating fractions.
/// Hours are not wrapped at 24. Negative or non-finite input gives `--:--:--`.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--:--".to_string();
    }
    let whole = seconds.trunc() as u64;
    format!("{:02}:{:02}:{:02}", whole / 3600, whole / 60 % 60, whole % 60)
}

/// Renders a byte count with binary units, two decimals above 1 KiB.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Parses a seek position into seconds.
///
/// Accepts `HH:MM:SS` with an optional `.fraction` on the seconds. Hours may
/// have any number of digits; minutes and seconds are exactly two digits and
/// below 60. Signs, exponents and whitespace are rejected since the value is
/// passed straight to ffmpeg's `-ss`.
pub fn parse_timestamp(timestamp: &str) -> CoreResult<f64> {
    let invalid = || {
        CoreError::InvalidArgument(format!(
            "Timestamp '{timestamp}' is not in HH:MM:SS format"
        ))
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let mut fields = timestamp.split(':');
    let (Some(hh), Some(mm), Some(rest), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(invalid());
    };
    let (ss, frac) = match rest.split_once('.') {
        Some((ss, frac)) => (ss, Some(frac)),
        None => (rest, None),
    };

    if !digits(hh) || !digits(mm) || !digits(ss) || mm.len() != 2 || ss.len() != 2 {
        return Err(invalid());
    }
    if frac.is_some_and(|f| !digits(f)) {
        return Err(invalid());
    }

    let hours: u64 = hh.parse().map_err(|_| invalid())?;
    let minutes: u64 = mm.parse().map_err(|_| invalid())?;
    let seconds: f64 = rest.parse().map_err(|_| invalid())?;
    if minutes >= 60 || seconds >= 60.0 {
        return Err(invalid());
    }
    Ok(hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds)
}

/// Checks a seek position without keeping the parsed value.
pub fn validate_timestamp(timestamp: &str) -> CoreResult<()> {
    parse_timestamp(timestamp).map(|_| ())
}
