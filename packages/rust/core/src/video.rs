//! Timestamp-based video transcript excerpts.
//!
//! Transcripts are plain text with one spoken line per row, each starting
//! with a timestamp marker:
//!
//! ```text
//! 0:00 - Welcome to the course.
//! 1:30 - The first key point is alignment.
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use lenscheck_shared::{ContentError, VideoExcerpt, VideoExcerptResult};

/// Parse `M:SS`, `MM:SS` or `H:MM:SS` into seconds.
///
/// Seconds (and minutes in the three-part form) are exactly two digits
/// below 60. Anything else, including overflow, is `None`.
pub fn parse_timestamp(text: &str) -> Option<u32> {
    let parts: Vec<&str> = text.trim().split(':').collect();

    match parts.as_slice() {
        [minutes, seconds] => {
            let minutes = number(minutes)?;
            let seconds = sexagesimal(seconds)?;
            minutes.checked_mul(60)?.checked_add(seconds)
        }
        [hours, minutes, seconds] => {
            let hours = number(hours)?;
            let minutes = sexagesimal(minutes)?;
            let seconds = sexagesimal(seconds)?;
            hours
                .checked_mul(3600)?
                .checked_add(minutes * 60)?
                .checked_add(seconds)
        }
        _ => None,
    }
}

fn number(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// A two-digit field in `00..=59`.
fn sexagesimal(part: &str) -> Option<u32> {
    if part.len() != 2 {
        return None;
    }
    number(part).filter(|n| *n < 60)
}

/// Timestamp marker at the start of a transcript line, in seconds.
fn line_marker(line: &str) -> Option<u32> {
    static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\s*\[?(\d+(?::\d{2}){1,2})\]?(?:[\s\-|:,]|$)").expect("valid regex")
    });

    MARKER_RE
        .captures(line)
        .and_then(|caps| parse_timestamp(caps.get(1)?.as_str()))
}

/// Extract the transcript lines in `[from, to)`.
#[instrument(skip_all, fields(file = %file.display(), from = from_ts, to = to_ts))]
pub fn extract_video_excerpt(
    transcript: &str,
    from_ts: &str,
    to_ts: &str,
    file: &Path,
) -> VideoExcerptResult {
    extract_video_range(transcript, from_ts, Some(to_ts), file)
}

/// Extract the transcript from `from_ts` up to `to_ts`, or to the end when
/// `to_ts` is `None`.
///
/// Both timestamps must appear as line markers in the transcript. Lines
/// without a marker belong to the marked line above them.
pub fn extract_video_range(
    transcript: &str,
    from_ts: &str,
    to_ts: Option<&str>,
    file: &Path,
) -> VideoExcerptResult {
    let from = parse_or_report(from_ts, "from", file)?;
    let to = to_ts
        .map(|ts| parse_or_report(ts, "to", file))
        .transpose()?;

    let markers: Vec<(Option<u32>, &str)> = transcript
        .lines()
        .map(|line| (line_marker(line), line))
        .collect();
    let has_marker = |seconds: u32| markers.iter().any(|(m, _)| *m == Some(seconds));

    if !has_marker(from) {
        return Err(not_found(from_ts, "from", file));
    }
    if let (Some(to), Some(to_ts)) = (to, to_ts) {
        if !has_marker(to) {
            return Err(not_found(to_ts, "to", file));
        }
        if from >= to {
            return Err(ContentError::error(
                file,
                None,
                format!("from timestamp {from_ts} is after to timestamp {to_ts}"),
            )
            .with_suggestion("Swap the timestamps or pick a later 'to' time"));
        }
    }

    let mut current: Option<u32> = None;
    let mut selected: Vec<&str> = Vec::new();
    for (marker, line) in &markers {
        if marker.is_some() {
            current = *marker;
        }
        let in_range = current.is_some_and(|t| t >= from && to.is_none_or(|end| t < end));
        if in_range && !line.trim().is_empty() {
            selected.push(line);
        }
    }

    debug!(from, ?to, lines = selected.len(), "video excerpt extracted");

    Ok(VideoExcerpt {
        from,
        to,
        transcript: selected.join("\n"),
    })
}

fn parse_or_report(ts: &str, which: &str, file: &Path) -> Result<u32, ContentError> {
    parse_timestamp(ts).ok_or_else(|| {
        ContentError::error(file, None, format!("invalid {which} timestamp \"{ts}\""))
            .with_suggestion("Use MM:SS or H:MM:SS, e.g. 1:30 or 1:02:45")
    })
}

fn not_found(ts: &str, which: &str, file: &Path) -> ContentError {
    ContentError::error(
        file,
        None,
        format!("{which} timestamp {ts} not found in transcript"),
    )
    .with_suggestion("Use a timestamp that starts one of the transcript lines")
}
