//! Anchor-based article excerpts.
//!
//! An excerpt is the span from a start anchor to an end anchor, both
//! included. Anchors are matched case-insensitively and must be unique
//! within their search scope: the whole article for the start anchor, the
//! text from the start anchor onward for the end anchor.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use tracing::{debug, instrument};

use lenscheck_shared::{ContentError, ExcerptSpan, ExtractedExcerpt};

/// Longest anchor text quoted verbatim in a diagnostic.
const ANCHOR_PREVIEW_CHARS: usize = 60;

/// Which end of the excerpt an anchor marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorRole {
    Start,
    End,
}

impl AnchorRole {
    fn label(self) -> &'static str {
        match self {
            AnchorRole::Start => "start anchor",
            AnchorRole::End => "end anchor",
        }
    }

    /// Where the anchor was searched, for messages.
    fn scope(self) -> &'static str {
        match self {
            AnchorRole::Start => "",
            AnchorRole::End => " after start anchor",
        }
    }
}

/// Extract the excerpt between two anchors, both included.
#[instrument(skip_all, fields(file = %file.display()))]
pub fn extract_article_excerpt(
    article: &str,
    from_anchor: &str,
    to_anchor: &str,
    file: &Path,
) -> ExtractedExcerpt {
    extract_article_range(article, Some(from_anchor), Some(to_anchor), file)
}

/// Extract an excerpt where either anchor may be absent.
///
/// A missing start anchor means the start of the article; a missing end
/// anchor means its end.
pub fn extract_article_range(
    article: &str,
    from_anchor: Option<&str>,
    to_anchor: Option<&str>,
    file: &Path,
) -> ExtractedExcerpt {
    let start_index = match from_anchor {
        Some(anchor) => locate_unique(article, anchor, AnchorRole::Start, file)?.0,
        None => 0,
    };

    let end_index = match to_anchor {
        Some(anchor) => {
            let (_, relative_end) =
                locate_unique(&article[start_index..], anchor, AnchorRole::End, file)?;
            start_index + relative_end
        }
        None => article.len(),
    };

    debug!(start_index, end_index, "excerpt located");

    Ok(ExcerptSpan {
        content: article[start_index..end_index].to_string(),
        start_index,
        end_index,
    })
}

/// Byte range of the single case-insensitive occurrence of `anchor`.
fn locate_unique(
    haystack: &str,
    anchor: &str,
    role: AnchorRole,
    file: &Path,
) -> Result<(usize, usize), ContentError> {
    if anchor.trim().is_empty() {
        return Err(ContentError::error(file, None, format!("{} is empty", role.label()))
            .with_suggestion("Give the anchor a distinctive phrase from the article"));
    }

    let pattern = anchor_pattern(anchor).map_err(|e| {
        ContentError::error(
            file,
            None,
            format!("{} \"{}\" could not be searched: {e}", role.label(), preview(anchor)),
        )
        .with_suggestion("Use a shorter anchor phrase")
    })?;

    let matches = find_overlapping(&pattern, haystack, 2);
    match matches.as_slice() {
        [] => Err(ContentError::error(
            file,
            None,
            format!("{} not found{}: \"{}\"", role.label(), role.scope(), preview(anchor)),
        )
        .with_suggestion("Copy the anchor text exactly from the article (case is ignored)")),
        [only] => Ok(*only),
        _ => Err(ContentError::error(
            file,
            None,
            format!(
                "{} found multiple times{} (ambiguous): \"{}\"",
                role.label(),
                role.scope(),
                preview(anchor)
            ),
        )
        .with_suggestion("Lengthen the anchor so it matches exactly one place")),
    }
}

fn anchor_pattern(anchor: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(anchor))
        .case_insensitive(true)
        .build()
}

/// Up to `limit` matches of `pattern`, allowing overlaps.
fn find_overlapping(pattern: &Regex, haystack: &str, limit: usize) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut pos = 0;

    while found.len() < limit {
        let Some(m) = pattern.find_at(haystack, pos) else {
            break;
        };
        found.push((m.start(), m.end()));
        // Step one character past the match start
        let step = haystack[m.start()..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        pos = m.start() + step;
        if pos > haystack.len() {
            break;
        }
    }

    found
}

fn preview(anchor: &str) -> String {
    if anchor.chars().count() <= ANCHOR_PREVIEW_CHARS {
        return anchor.to_string();
    }
    let head: String = anchor.chars().take(ANCHOR_PREVIEW_CHARS).collect();
    format!("{head}...")
}
