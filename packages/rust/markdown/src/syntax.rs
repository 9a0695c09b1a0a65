//! Line-level recognizers for directive syntax.
//!
//! Everything here works on a single line and knows nothing about names:
//! deciding whether `:foo[bar]` is a directive or just prose is the caller's
//! job.

use std::sync::LazyLock;

use regex::Regex;

use crate::capabilities::DirectiveForm;

/// A directive-shaped span found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DirectiveMatch<'a> {
    pub form: DirectiveForm,
    pub name: &'a str,
    /// Raw text between the braces, if an attribute block was present.
    /// A block after `]` wins over one before `[`.
    pub attr: Option<&'a str>,
    /// Another `{...}` directly follows the captured block.
    pub extra_attrs: bool,
}

/// Opening or closing line of a fenced code block.
pub(crate) fn is_code_fence(line: &str) -> bool {
    static FENCE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*(?:```|~~~)").expect("valid regex"));

    FENCE_RE.is_match(line)
}

/// `:::` or `:::{attr}`. Returns `Some(None)` for a bare close and
/// `Some(Some(attr))` for a close carrying an attribute block.
pub(crate) fn container_close(line: &str) -> Option<Option<&str>> {
    static CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\s*:::\s*(?:\{([^}]*)\})?\s*$").expect("valid regex")
    });

    CLOSE_RE
        .captures(line)
        .map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// `:::name` optionally followed by `{attr}`.
pub(crate) fn container_open(line: &str) -> Option<DirectiveMatch<'_>> {
    static OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^\s*:::([A-Za-z][\w-]*)\s*(?:\{([^}]*)\}(\s*\{[^}]*\})?)?")
            .expect("valid regex")
    });

    let caps = OPEN_RE.captures(line)?;
    Some(DirectiveMatch {
        form: DirectiveForm::Container,
        name: caps.get(1)?.as_str(),
        attr: caps.get(2).map(|m| m.as_str()),
        extra_attrs: caps.get(3).is_some(),
    })
}

/// `::name[text]` at the start of the line.
pub(crate) fn leaf_directive(line: &str) -> Option<DirectiveMatch<'_>> {
    static LEAF_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(&format!(r"^\s*::{BRACKETED}")).expect("valid regex")
    });

    let caps = LEAF_RE.captures(line)?;
    bracketed_match(DirectiveForm::Leaf, &caps)
}

/// Every complete `:name[text]` inside the line, skipping leaf markers and
/// URL schemes.
pub(crate) fn text_directives(line: &str) -> Vec<DirectiveMatch<'_>> {
    static TEXT_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(&format!(":{BRACKETED}")).expect("valid regex")
    });

    TEXT_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if !is_inline_position(line, whole.start()) {
                return None;
            }
            bracketed_match(DirectiveForm::Text, &caps)
        })
        .collect()
}

/// `name{pre}{extra}[text]{post}{extra}` after the marker. Groups: 1 name,
/// 2 pre-bracket attr, 3 extra pre block, 4 post-bracket attr, 5 extra post
/// block.
const BRACKETED: &str =
    r"([A-Za-z][\w-]*)(?:\{([^}]*)\}(\{[^}]*\})?)?\[[^\]]*\](?:\{([^}]*)\}(\{[^}]*\})?)?";

fn bracketed_match<'a>(
    form: DirectiveForm,
    caps: &regex::Captures<'a>,
) -> Option<DirectiveMatch<'a>> {
    Some(DirectiveMatch {
        form,
        name: caps.get(1)?.as_str(),
        attr: caps.get(4).or_else(|| caps.get(2)).map(|m| m.as_str()),
        extra_attrs: caps.get(3).is_some() || caps.get(5).is_some(),
    })
}

/// A `::name[` or `:name[` whose bracket is never closed on this line.
pub(crate) fn unclosed_bracket(line: &str) -> Option<(DirectiveForm, &str)> {
    static UNCLOSED_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r":([A-Za-z][\w-]*)(?:\{[^}]*\})?\[[^\]]*$").expect("valid regex")
    });

    // The pattern runs to end of line, so a rejected candidate (a URL, say)
    // would swallow any later one: retry just past each rejected colon.
    let mut pos = 0;
    while let Some(caps) = UNCLOSED_RE.captures_at(line, pos) {
        let start = caps.get(0)?.start();
        let name = caps.get(1)?.as_str();
        if let Some(form) = classify_marker(line, start) {
            return Some((form, name));
        }
        pos = start + 1;
    }
    None
}

/// Every `::name[` / `:name[` opening on the line, closed or not.
pub(crate) fn directive_openings(line: &str) -> Vec<(DirectiveForm, &str)> {
    static OPENING_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r":([A-Za-z][\w-]*)(?:\{[^}]*\})?\[").expect("valid regex")
    });

    OPENING_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            let name = caps.get(1)?.as_str();
            classify_marker(line, start).map(|form| (form, name))
        })
        .collect()
}

/// Decide whether the `:` at byte `colon` starts a leaf marker (`::` at line
/// start), an inline marker, or neither.
fn classify_marker(line: &str, colon: usize) -> Option<DirectiveForm> {
    if colon > 0 && line.as_bytes()[colon - 1] == b':' {
        let prefix = &line[..colon - 1];
        if prefix.trim().is_empty() {
            return Some(DirectiveForm::Leaf);
        }
        return None;
    }
    is_inline_position(line, colon).then_some(DirectiveForm::Text)
}

/// An inline `:` must not continue a longer marker and must not be the colon
/// of a URL scheme like `https:`.
fn is_inline_position(line: &str, colon: usize) -> bool {
    static SCHEME_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)(?:https?|ftp|mailto|tel)$").expect("valid regex")
    });

    let before = &line[..colon];
    if before.ends_with(':') {
        return false;
    }
    !SCHEME_RE.is_match(before)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences() {
        assert!(is_code_fence("```"));
        assert!(is_code_fence("```python"));
        assert!(is_code_fence("  ~~~"));
        assert!(!is_code_fence("`inline`"));
    }

    #[test]
    fn close_markers() {
        assert_eq!(container_close(":::"), Some(None));
        assert_eq!(container_close(":::  "), Some(None));
        assert_eq!(container_close(":::{open}"), Some(Some("open")));
        assert_eq!(container_close(":::note"), None);
    }

    #[test]
    fn open_marker_with_attribute() {
        let m = container_open(":::collapse{open}").expect("matches");
        assert_eq!(m.name, "collapse");
        assert_eq!(m.attr, Some("open"));

        let m = container_open(":::note").expect("matches");
        assert_eq!(m.attr, None);
    }

    #[test]
    fn leaf_post_bracket_attribute_wins() {
        let m = leaf_directive("::footnote{a}[text]{b}").expect("matches");
        assert_eq!(m.form, DirectiveForm::Leaf);
        assert_eq!(m.attr, Some("b"));

        let m = leaf_directive("::footnote{a}[text]").expect("matches");
        assert_eq!(m.attr, Some("a"));
    }

    #[test]
    fn second_attribute_block_is_flagged() {
        let m = container_open(":::collapse{open}{x}").expect("matches");
        assert_eq!(m.attr, Some("open"));
        assert!(m.extra_attrs);
        assert!(!container_open(":::collapse{open}").expect("matches").extra_attrs);

        assert!(leaf_directive("::footnote[text]{a}{b}").expect("matches").extra_attrs);
        assert!(!leaf_directive("::footnote{a}[text]{b}").expect("matches").extra_attrs);

        let found = text_directives("See :collapse{open}{x}[more] here.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attr, Some("open"));
        assert!(found[0].extra_attrs);
    }

    #[test]
    fn text_directives_in_prose() {
        let found = text_directives("See :footnote[a source] and :collapse[more]{open}.");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "footnote");
        assert_eq!(found[1].name, "collapse");
        assert_eq!(found[1].attr, Some("open"));
    }

    #[test]
    fn text_directives_skip_urls_and_leaf_markers() {
        assert!(text_directives("Visit https:example[x] now").is_empty());
        assert!(text_directives("Mail MAILTO:someone[x]").is_empty());
        assert!(text_directives("::footnote[leaf]").is_empty());
    }

    #[test]
    fn unclosed_brackets() {
        assert_eq!(
            unclosed_bracket("::footnote[never closed"),
            Some((DirectiveForm::Leaf, "footnote"))
        );
        assert_eq!(
            unclosed_bracket("text :collapse[open ended"),
            Some((DirectiveForm::Text, "collapse"))
        );
        assert_eq!(unclosed_bracket("text :collapse[closed]"), None);
        assert_eq!(unclosed_bracket("see http:foo[bar"), None);
        assert_eq!(
            unclosed_bracket("see http:foo[bar then :footnote[oops"),
            Some((DirectiveForm::Text, "footnote"))
        );
    }

    #[test]
    fn openings_cover_both_forms() {
        let found = directive_openings("intro :footnote[x] and :note[y");
        assert_eq!(
            found,
            vec![(DirectiveForm::Text, "footnote"), (DirectiveForm::Text, "note")]
        );
        assert_eq!(
            directive_openings("::footnote[x]"),
            vec![(DirectiveForm::Leaf, "footnote")]
        );
    }
}
