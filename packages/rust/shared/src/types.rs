//! Data-model types shared by the extractors and validators.

use serde::{Deserialize, Serialize};

use crate::diagnostic::ContentError;

// ---------------------------------------------------------------------------
// Article excerpts
// ---------------------------------------------------------------------------

/// One caller-supplied excerpt boundary pair.
///
/// `None` for `from` means "start of the article"; `None` for `to` means
/// "end of the article".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl ExcerptRequest {
    /// Request bounded by two anchors.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

/// A successfully located excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptSpan {
    /// `article[start_index..end_index]`, anchors included.
    pub content: String,
    /// Byte offset of the start anchor.
    pub start_index: usize,
    /// Byte offset immediately after the end anchor.
    pub end_index: usize,
}

/// Result of extracting a single excerpt: the span or the reason it failed.
pub type ExtractedExcerpt = std::result::Result<ExcerptSpan, ContentError>;

/// One bundled excerpt plus the surrounding material that was left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsedExcerpt {
    /// Excerpt text; empty when extraction failed.
    pub content: String,
    /// Trimmed text between the previous excerpt and this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed_before: Option<String>,
    /// Trimmed text after the final excerpt. Only set on the last one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed_after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ContentError>,
}

impl CollapsedExcerpt {
    /// A failed slot: empty content carrying the extraction error.
    pub fn failed(error: ContentError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Video excerpts
// ---------------------------------------------------------------------------

/// A slice of a video transcript between two timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoExcerpt {
    /// Start, in seconds.
    pub from: u32,
    /// End (exclusive), in seconds. `None` means "to the end of the video".
    pub to: Option<u32>,
    /// Transcript lines whose marker falls in `[from, to)`.
    pub transcript: String,
}

/// Result of extracting a video excerpt.
pub type VideoExcerptResult = std::result::Result<VideoExcerpt, ContentError>;

// ---------------------------------------------------------------------------
// Segments
// ---------------------------------------------------------------------------

/// Segment type names used by the ordering rules.
pub mod segment_type {
    pub const TEXT: &str = "text";
    pub const CHAT: &str = "chat";
    pub const ARTICLE_EXCERPT: &str = "article-excerpt";
    pub const VIDEO_EXCERPT: &str = "video-excerpt";
}

/// Minimal projection of a lesson segment for ordering checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRef {
    #[serde(rename = "type")]
    pub segment_type: String,
    /// 1-based line the segment header appears on.
    pub line: usize,
}

impl SegmentRef {
    pub fn new(segment_type: impl Into<String>, line: usize) -> Self {
        Self {
            segment_type: segment_type.into(),
            line,
        }
    }
}
