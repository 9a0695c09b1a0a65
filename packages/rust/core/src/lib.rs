//! Excerpt extraction and lesson-structure validation for lenscheck.
//!
//! This crate holds the article and video excerpt extractors, the segment
//! ordering rules, and the file-level check pipeline that ties them to the
//! directive rules in `lenscheck-markdown`. Everything here is pure: callers
//! read files and pass text in.

pub mod bundle;
pub mod check;
pub mod excerpt;
pub mod ordering;
pub mod video;

pub use bundle::bundle_article_with_collapsed;
pub use excerpt::{extract_article_excerpt, extract_article_range};
pub use ordering::{CHAT_PRECEDENCE, PrecedenceRule, validate_chat_precedence, validate_precedence};
pub use video::{extract_video_excerpt, extract_video_range, parse_timestamp};
