//! Ordering rules over a lesson's segment sequence.

use std::path::Path;

use tracing::{debug, instrument};

use lenscheck_shared::{ContentError, SegmentRef, segment_type};

/// "Every `segment` must directly follow one of `allowed_predecessors`."
#[derive(Debug, Clone, Copy)]
pub struct PrecedenceRule {
    pub segment: &'static str,
    /// Display name of the constrained segment in messages.
    pub segment_label: &'static str,
    pub allowed_predecessors: &'static [&'static str],
    /// Display names of the allowed predecessors in messages.
    pub predecessor_labels: &'static [&'static str],
    pub suggestion: &'static str,
}

/// A chat needs something to discuss: text or an article excerpt right
/// before it.
pub const CHAT_PRECEDENCE: PrecedenceRule = PrecedenceRule {
    segment: segment_type::CHAT,
    segment_label: "Chat",
    allowed_predecessors: &[segment_type::TEXT, segment_type::ARTICLE_EXCERPT],
    predecessor_labels: &["Text", "article-excerpt"],
    suggestion: "Add a Text segment before the Chat that introduces what to discuss",
};

/// Check every chat segment's predecessor.
#[instrument(skip_all, fields(file = %file.display(), segments = segments.len()))]
pub fn validate_chat_precedence(segments: &[SegmentRef], file: &Path) -> Vec<ContentError> {
    validate_precedence(segments, &CHAT_PRECEDENCE, file)
}

/// Check `rule` across the whole sequence, collecting every violation.
pub fn validate_precedence(
    segments: &[SegmentRef],
    rule: &PrecedenceRule,
    file: &Path,
) -> Vec<ContentError> {
    let mut diagnostics = Vec::new();
    let required = rule.predecessor_labels.join(" or ");

    for (i, segment) in segments.iter().enumerate() {
        if segment.segment_type != rule.segment {
            continue;
        }

        let previous = i.checked_sub(1).map(|p| &segments[p]);
        let found = match previous {
            Some(prev)
                if rule
                    .allowed_predecessors
                    .iter()
                    .any(|allowed| *allowed == prev.segment_type) =>
            {
                continue;
            }
            Some(prev) => format!("it follows a '{}' segment", prev.segment_type),
            None => "it is the first segment".to_string(),
        };

        debug!(line = segment.line, %found, "precedence violation");
        diagnostics.push(
            ContentError::error(
                file,
                Some(segment.line),
                format!(
                    "{} segment must be preceded by a {required} segment, but {found}",
                    rule.segment_label
                ),
            )
            .with_suggestion(rule.suggestion),
        );
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(kind: &str, line: usize) -> SegmentRef {
        SegmentRef::new(kind, line)
    }

    fn file() -> &'static Path {
        Path::new("lenses/alignment.md")
    }

    #[test]
    fn lone_chat_is_error_at_its_line() {
        let diags = validate_chat_precedence(&[seg("chat", 10)], file());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, Some(10));
        assert!(diags[0].is_error());
        assert!(diags[0].message.contains("Chat"));
        assert!(diags[0].message.contains("Text"));
        assert!(diags[0].message.contains("article-excerpt"));
        assert!(diags[0].message.contains("first segment"));
    }

    #[test]
    fn text_chat_pairs_are_valid() {
        let segments = [seg("text", 1), seg("chat", 2), seg("text", 3), seg("chat", 4)];
        assert!(validate_chat_precedence(&segments, file()).is_empty());
    }

    #[test]
    fn article_excerpt_before_chat_is_valid() {
        let segments = [seg("article-excerpt", 1), seg("chat", 5)];
        assert!(validate_chat_precedence(&segments, file()).is_empty());
    }

    #[test]
    fn collects_all_violations() {
        let segments = [
            seg("chat", 10),
            seg("text", 20),
            seg(segment_type::VIDEO_EXCERPT, 30),
            seg("chat", 40),
        ];
        let diags = validate_chat_precedence(&segments, file());
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].line, Some(10));
        assert_eq!(diags[1].line, Some(40));
        assert!(diags[1].message.contains("video-excerpt"));
    }

    #[test]
    fn consecutive_chats() {
        let segments = [seg("text", 1), seg("chat", 2), seg("chat", 3)];
        let diags = validate_chat_precedence(&segments, file());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, Some(3));
        assert!(diags[0].message.contains("follows a 'chat' segment"));
    }

    #[test]
    fn empty_and_chatless_sequences() {
        assert!(validate_chat_precedence(&[], file()).is_empty());
        let segments = [seg(segment_type::VIDEO_EXCERPT, 1), seg("question", 2)];
        assert!(validate_chat_precedence(&segments, file()).is_empty());
    }
}
