//! Directive validation for article bodies.
//!
//! A single pass over the body, one line at a time, with a stack of open
//! container directives. Every problem becomes a [`ContentError`]; the scan
//! never stops early.

use std::path::Path;

use tracing::{debug, instrument};

use lenscheck_shared::ContentError;

use crate::capabilities::{
    self, DirectiveCapability, DirectiveForm, OPEN_ATTRIBUTE, TYPO_DISTANCE,
};
use crate::distance::{closest_match, levenshtein};
use crate::syntax::{self, DirectiveMatch};

/// An open container directive.
#[derive(Debug, Clone)]
struct StackFrame {
    name: String,
    line: usize,
    has_content: bool,
    attr: Option<String>,
}

impl StackFrame {
    fn syntax(&self) -> String {
        match &self.attr {
            Some(attr) => format!(":::{}{{{attr}}}", self.name),
            None => format!(":::{}", self.name),
        }
    }
}

/// What a directive name turned out to be.
#[derive(Debug, Clone, Copy)]
enum Resolution {
    Supported(DirectiveCapability),
    Unsupported,
    Typo(&'static str),
    /// Not a directive at all, just prose that happens to contain a colon.
    Prose,
}

fn resolve(name: &str, form: DirectiveForm) -> Resolution {
    if capabilities::is_unsupported(name) {
        return Resolution::Unsupported;
    }
    if let Some(cap) = capabilities::capability(name) {
        return Resolution::Supported(cap);
    }
    // Prefer a name that accepts the form as written.
    let suggestion = closest_match(name, capabilities::names_for_form(form), TYPO_DISTANCE)
        .or_else(|| closest_match(name, capabilities::supported_names(), TYPO_DISTANCE));
    match suggestion {
        Some(suggestion) => Resolution::Typo(suggestion),
        None => Resolution::Prose,
    }
}

/// Validate directive usage in an article body.
///
/// `body_start_line` is the 1-based file line of the body's first line, so
/// diagnostics point into the original file even when frontmatter was
/// stripped.
#[instrument(skip_all, fields(file = %file.display(), body_start_line = body_start_line))]
pub fn validate_directives(body: &str, file: &Path, body_start_line: usize) -> Vec<ContentError> {
    let mut scanner = Scanner {
        file,
        stack: Vec::new(),
        diagnostics: Vec::new(),
    };
    let mut in_fence = false;

    for (index, line) in body.lines().enumerate() {
        let line_no = body_start_line + index;

        if syntax::is_code_fence(line) {
            in_fence = !in_fence;
            scanner.mark_content();
            continue;
        }
        if in_fence {
            if !line.trim().is_empty() {
                scanner.mark_content();
            }
            continue;
        }

        scanner.scan_line(line, line_no);
    }

    scanner.finish()
}

struct Scanner<'f> {
    file: &'f Path,
    stack: Vec<StackFrame>,
    diagnostics: Vec<ContentError>,
}

impl Scanner<'_> {
    fn scan_line(&mut self, line: &str, line_no: usize) {
        if let Some(close_attr) = syntax::container_close(line) {
            self.close_container(close_attr, line_no);
            return;
        }

        if let Some(open) = syntax::container_open(line) {
            self.mark_content();
            self.open_container(open, line_no);
            return;
        }

        if line.trim().is_empty() {
            return;
        }
        self.mark_content();

        if let Some(leaf) = syntax::leaf_directive(line) {
            self.check_directive(leaf, line_no);
        }
        for text in syntax::text_directives(line) {
            self.check_directive(text, line_no);
        }
        if let Some((form, name)) = syntax::unclosed_bracket(line) {
            self.check_unclosed_bracket(form, name, line_no);
        }
    }

    fn mark_content(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.has_content = true;
        }
    }

    fn open_container(&mut self, open: DirectiveMatch<'_>, line_no: usize) {
        if matches!(resolve(open.name, open.form), Resolution::Prose) {
            return;
        }
        self.check_directive(open, line_no);
        debug!(name = open.name, line = line_no, depth = self.stack.len(), "container opened");
        self.stack.push(StackFrame {
            name: open.name.to_string(),
            line: line_no,
            has_content: false,
            attr: open.attr.map(str::to_string),
        });
    }

    fn close_container(&mut self, close_attr: Option<&str>, line_no: usize) {
        let frame = self.stack.pop();

        if let Some(attr) = close_attr {
            let target = frame
                .as_ref()
                .map(|f| format!("':::{}{{{attr}}}'", f.name))
                .unwrap_or_else(|| "the opening marker".to_string());
            self.push(
                ContentError::error(
                    self.file,
                    Some(line_no),
                    format!("attribute '{{{attr}}}' on closing marker has no effect"),
                )
                .with_suggestion(format!("Move it to the opening marker: {target}")),
            );
        }

        let Some(frame) = frame else {
            self.push(
                ContentError::error(
                    self.file,
                    Some(line_no),
                    "closing marker ':::' without an open container directive",
                )
                .with_suggestion("Remove the stray ':::' or add the missing opening marker"),
            );
            return;
        };

        if !frame.has_content {
            self.push(
                ContentError::warning(
                    self.file,
                    Some(frame.line),
                    format!("empty container directive '{}'", frame.syntax()),
                )
                .with_suggestion("Add content between the markers or remove the directive"),
            );
        }
    }

    fn check_directive(&mut self, m: DirectiveMatch<'_>, line_no: usize) {
        let written = format!("{}{}", m.form.marker(), m.name);

        match resolve(m.name, m.form) {
            Resolution::Unsupported => {
                self.push(
                    ContentError::error(
                        self.file,
                        Some(line_no),
                        format!("unsupported {} directive '{written}'", m.form),
                    )
                    .with_suggestion(format!(
                        "Supported {} directives: {}",
                        m.form,
                        capabilities::supported_syntax_list(m.form)
                    )),
                );
            }
            Resolution::Supported(cap) => {
                if !cap.allows(m.form) {
                    self.push(
                        ContentError::warning(
                            self.file,
                            Some(line_no),
                            format!("'{}' cannot be used as a {} directive", m.name, m.form),
                        )
                        .with_suggestion(format!(
                            "Use {}",
                            capabilities::allowed_syntax(m.name, cap)
                        )),
                    );
                }
                if let Some(attr) = m.attr {
                    if let Some(diag) = self.check_attribute(&written, cap, attr, line_no) {
                        self.push(diag);
                    }
                }
                if m.extra_attrs {
                    let keep = if cap.open { "{open}" } else { "no block" };
                    self.push(
                        ContentError::warning(
                            self.file,
                            Some(line_no),
                            format!(
                                "multiple attribute blocks on '{written}'; only one is supported"
                            ),
                        )
                        .with_suggestion(format!("Keep {keep} and remove the extra blocks")),
                    );
                }
            }
            Resolution::Typo(suggestion) => {
                self.push(
                    ContentError::error(
                        self.file,
                        Some(line_no),
                        format!("unknown directive '{written}'"),
                    )
                    .with_suggestion(format!(
                        "Did you mean '{}{suggestion}'?",
                        m.form.marker()
                    )),
                );
            }
            Resolution::Prose => {}
        }
    }

    fn check_attribute(
        &self,
        written: &str,
        cap: DirectiveCapability,
        raw: &str,
        line_no: usize,
    ) -> Option<ContentError> {
        let attr = raw.trim();

        if attr.is_empty() {
            return Some(
                ContentError::warning(
                    self.file,
                    Some(line_no),
                    format!("empty attribute block '{{}}' on '{written}'"),
                )
                .with_suggestion("Remove the empty {} or use {open}"),
            );
        }

        if attr == OPEN_ATTRIBUTE {
            if cap.open {
                return None;
            }
            return Some(
                ContentError::warning(
                    self.file,
                    Some(line_no),
                    format!("'{written}' does not support {{open}}"),
                )
                .with_suggestion("Remove {open}"),
            );
        }

        if is_open_near_miss(attr) {
            return Some(
                ContentError::warning(
                    self.file,
                    Some(line_no),
                    format!("unrecognized attribute '{{{attr}}}' on '{written}'"),
                )
                .with_suggestion("Did you mean {open}?"),
            );
        }

        let suggestion = if cap.open {
            "The only supported attribute is {open}".to_string()
        } else {
            format!("'{written}' takes no attributes; remove the block")
        };
        Some(
            ContentError::warning(
                self.file,
                Some(line_no),
                format!("unrecognized attribute '{{{attr}}}' on '{written}'"),
            )
            .with_suggestion(suggestion),
        )
    }

    fn check_unclosed_bracket(&mut self, form: DirectiveForm, name: &str, line_no: usize) {
        let relevant = capabilities::is_known(name)
            || closest_match(name, capabilities::supported_names(), TYPO_DISTANCE).is_some();
        if !relevant {
            return;
        }

        self.push(
            ContentError::error(
                self.file,
                Some(line_no),
                format!("unclosed bracket in '{}{name}[' directive", form.marker()),
            )
            .with_suggestion("Add the closing ']' on the same line"),
        );
    }

    fn push(&mut self, diagnostic: ContentError) {
        self.diagnostics.push(diagnostic);
    }

    fn finish(mut self) -> Vec<ContentError> {
        let leftover = std::mem::take(&mut self.stack);
        for frame in leftover {
            self.push(
                ContentError::error(
                    self.file,
                    Some(frame.line),
                    format!("unclosed container directive '{}'", frame.syntax()),
                )
                .with_suggestion("Add a closing ':::' line after the directive's content"),
            );
        }

        debug!(diagnostics = self.diagnostics.len(), "directive scan complete");
        self.diagnostics
    }
}

/// Case variants, `open=value`, and small typos of `open`.
fn is_open_near_miss(attr: &str) -> bool {
    let lower = attr.to_lowercase();
    if lower == OPEN_ATTRIBUTE {
        return true;
    }
    if let Some((key, _)) = lower.split_once('=') {
        if key.trim() == OPEN_ATTRIBUTE {
            return true;
        }
    }
    levenshtein(&lower, OPEN_ATTRIBUTE) <= TYPO_DISTANCE
}
