//! Media request and metadata types
//!
//! This module holds the data that flows in and out of the invoker: the
//! request describing one operation and the structured ffprobe document.

pub mod info;
pub mod request;

// Re-export commonly used types
pub use info::{FormatInfo, MediaMetadata, StreamInfo, StreamType};
pub use request::{MediaOperation, MediaOperationRequest};
