//! Structured form of ffprobe's `-show_format -show_streams` JSON.
//!
//! Only a few keys are typed. Everything else ffprobe reports is kept in the
//! flattened `properties` maps so the document survives a round trip intact.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stream kinds as reported in ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    Attachment,
    Data,
    Unknown,
}

impl From<&str> for StreamType {
    fn from(s: &str) -> Self {
        match s {
            "video" => StreamType::Video,
            "audio" => StreamType::Audio,
            "subtitle" => StreamType::Subtitle,
            "attachment" => StreamType::Attachment,
            "data" => StreamType::Data,
            _ => StreamType::Unknown,
        }
    }
}

impl fmt::Display for StreamType {
    /// Uses ffprobe's own `codec_type` spelling.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamType::Video => "video",
            StreamType::Audio => "audio",
            StreamType::Subtitle => "subtitle",
            StreamType::Attachment => "attachment",
            StreamType::Data => "data",
            StreamType::Unknown => "unknown",
        })
    }
}

/// One entry of the `streams` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Absolute stream index within the container
    pub index: u32,

    /// `video`, `audio`, `subtitle`, ... as reported by ffprobe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    /// Every other key ffprobe emitted for this stream
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl StreamInfo {
    #[must_use]
    pub fn stream_type(&self) -> StreamType {
        self.codec_type
            .as_deref()
            .map_or(StreamType::Unknown, StreamType::from)
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.tags.get("language").map(String::as_str)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.tags.get("title").map(String::as_str)
    }
}

/// The `format` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormatInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_streams: Option<u32>,

    /// Duration in seconds, as the decimal string ffprobe prints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Size in bytes, as a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// Complete probe result: container format plus all streams.
///
/// `format` must be present in the JSON; a missing `streams` array is read as
/// an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub format: FormatInfo,

    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

impl MediaMetadata {
    /// Streams of one type, in container order. The position in this iterator
    /// is the per-type index used by `-map 0:a:N` / `-map 0:s:N`.
    pub fn streams_of(&self, kind: StreamType) -> impl Iterator<Item = &StreamInfo> {
        self.streams.iter().filter(move |s| s.stream_type() == kind)
    }

    pub fn video_streams(&self) -> impl Iterator<Item = &StreamInfo> {
        self.streams_of(StreamType::Video)
    }

    pub fn audio_streams(&self) -> impl Iterator<Item = &StreamInfo> {
        self.streams_of(StreamType::Audio)
    }

    pub fn subtitle_streams(&self) -> impl Iterator<Item = &StreamInfo> {
        self.streams_of(StreamType::Subtitle)
    }

    #[must_use]
    pub fn duration_secs(&self) -> Option<f64> {
        self.format
            .duration
            .as_deref()
            .and_then(|d| d.parse::<f64>().ok())
    }

    #[must_use]
    pub fn size_bytes(&self) -> Option<u64> {
        self.format.size.as_deref().and_then(|s| s.parse::<u64>().ok())
    }
}
