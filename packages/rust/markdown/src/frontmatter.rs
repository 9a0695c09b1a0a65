//! YAML frontmatter splitting.
//!
//! Content files start with an optional `---` delimited block. The checkers
//! only look at the body, but diagnostics must carry file line numbers, so
//! the split also reports where the body starts.

/// A content file split into frontmatter and body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Text between the `---` delimiters, without them.
    pub frontmatter: Option<&'a str>,
    pub body: &'a str,
    /// 1-based file line of the body's first line.
    pub body_start_line: usize,
}

/// Split `text` into frontmatter and body.
///
/// A file whose opening `---` is never closed has no frontmatter.
pub fn split_frontmatter(text: &str) -> SplitDocument<'_> {
    let no_frontmatter = SplitDocument {
        frontmatter: None,
        body: text,
        body_start_line: 1,
    };

    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return no_frontmatter;
    };
    if first.trim_end() != "---" {
        return no_frontmatter;
    }

    let fm_start = first.len();
    let mut offset = fm_start;
    for (index, line) in lines.enumerate() {
        if line.trim_end() == "---" {
            let body_offset = offset + line.len();
            return SplitDocument {
                frontmatter: Some(&text[fm_start..offset]),
                body: &text[body_offset..],
                // opening delimiter + frontmatter lines + closing delimiter
                body_start_line: index + 3,
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_frontmatter_and_counts_lines() {
        let text = "---\ntitle: Intro\nauthor: A\n---\n:::note\nBody\n:::\n";
        let doc = split_frontmatter(text);
        assert_eq!(doc.frontmatter, Some("title: Intro\nauthor: A\n"));
        assert_eq!(doc.body, ":::note\nBody\n:::\n");
        assert_eq!(doc.body_start_line, 5);
    }

    #[test]
    fn empty_frontmatter() {
        let doc = split_frontmatter("---\n---\nBody");
        assert_eq!(doc.frontmatter, Some(""));
        assert_eq!(doc.body, "Body");
        assert_eq!(doc.body_start_line, 3);
    }

    #[test]
    fn no_frontmatter() {
        let doc = split_frontmatter("# Title\n\nText");
        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.body_start_line, 1);
        assert_eq!(doc.body, "# Title\n\nText");
    }

    #[test]
    fn unterminated_frontmatter_is_body() {
        let doc = split_frontmatter("---\ntitle: x\nno end");
        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.body_start_line, 1);
    }

    #[test]
    fn crlf_delimiters() {
        let doc = split_frontmatter("---\r\ntitle: x\r\n---\r\nBody\r\n");
        assert_eq!(doc.frontmatter, Some("title: x\r\n"));
        assert_eq!(doc.body, "Body\r\n");
        assert_eq!(doc.body_start_line, 4);
    }

    #[test]
    fn empty_input() {
        let doc = split_frontmatter("");
        assert_eq!(doc.body, "");
        assert_eq!(doc.body_start_line, 1);
    }
}
