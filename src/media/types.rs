use serde::{Deserialize, Serialize};
use std::fmt;

/// The media service uploads images and videos through different endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Anything that is not `video/*` is uploaded as an image
    pub fn of(content_type: &str) -> Self {
        if content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file picked in the admin form, not yet uploaded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::of(&self.content_type)
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedMedia {
    /// Durable, publicly fetchable URL
    pub url: String,
    pub kind: MediaKind,
}
