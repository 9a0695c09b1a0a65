//! Stray-directive detection for content where directives do not render.

use std::path::Path;

use tracing::{debug, instrument};

use lenscheck_shared::ContentError;

use crate::capabilities::{self, DirectiveForm};
use crate::syntax;

/// Warn about the first directive found in non-article content.
///
/// Lesson prose and chat instructions are rendered without the directive
/// extension, so `:::note` and friends show up verbatim. Only names the
/// dialect knows (supported or not) count. Returns at most one diagnostic,
/// attributed to `line` plus the offset of the offending line.
#[instrument(skip_all, fields(file = %file.display(), line = line))]
pub fn detect_directives_in_non_article(
    content: &str,
    file: &Path,
    line: usize,
) -> Vec<ContentError> {
    let mut in_fence = false;

    for (index, text) in content.lines().enumerate() {
        if syntax::is_code_fence(text) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(written) = first_known_directive(text) {
            debug!(directive = %written, offset = index, "directive in non-article content");
            return vec![
                ContentError::warning(
                    file,
                    Some(line + index),
                    format!(
                        "directive '{written}' found in non-article content; directives only render in article files"
                    ),
                )
                .with_suggestion("Move this content into an article or remove the directive syntax"),
            ];
        }
    }

    Vec::new()
}

fn first_known_directive(line: &str) -> Option<String> {
    if let Some(open) = syntax::container_open(line) {
        if capabilities::is_known(open.name) {
            return Some(DirectiveForm::Container.syntax(open.name));
        }
    }

    syntax::directive_openings(line)
        .into_iter()
        .find(|(_, name)| capabilities::is_known(name))
        .map(|(form, name)| form.syntax(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lenscheck_shared::Severity;

    fn detect(content: &str) -> Vec<ContentError> {
        detect_directives_in_non_article(content, Path::new("lessons/intro.md"), 10)
    }

    #[test]
    fn span_records_base_line() {
        let fields = crate::test_support::SpanFields::capture(|| detect("plain text"));
        assert!(fields.iter().any(|(k, v)| k == "line" && v == "10"), "{fields:?}");
    }

    #[test]
    fn plain_prose_is_clean() {
        assert!(detect("Just some text.\nWith a ratio 3:1 and a link https://x.org/a[b].").is_empty());
    }

    #[test]
    fn container_directive_is_reported() {
        let diags = detect("Intro.\n:::note\nBody\n:::\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].line, Some(11));
        assert!(diags[0].message.contains(":::note"));
        assert!(diags[0].message.contains("non-article"));
    }

    #[test]
    fn only_first_directive_is_reported() {
        let diags = detect(":footnote[a]\n::footnote[b]\n:::collapse\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, Some(10));
    }

    #[test]
    fn unsupported_names_count_too() {
        let diags = detect("Remember :tip[this].");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains(":tip[...]"));
    }

    #[test]
    fn typos_are_not_reported() {
        assert!(detect(":fotnote[x]\n:::nte\n").is_empty());
    }

    #[test]
    fn fenced_code_and_urls_are_ignored() {
        let content = "```\n:::note\n```\nSee https:note[x] or mailto:footnote[y].";
        assert!(detect(content).is_empty());
    }

    #[test]
    fn unclosed_bracket_still_counts() {
        let diags = detect("Text with :footnote[never closed");
        assert_eq!(diags.len(), 1);
    }
}
