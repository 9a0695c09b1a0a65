//! The directive dialect: which names exist and which forms they take.
//!
//! Both tables are fixed. Names are case-sensitive.

use std::fmt;

/// Names within this edit distance of a supported directive get a
/// "did you mean" suggestion. Not normalized by name length.
pub const TYPO_DISTANCE: usize = 2;

/// The single attribute the dialect understands.
pub const OPEN_ATTRIBUTE: &str = "open";

/// Syntactic form a directive occurrence takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveForm {
    /// `:::name` ... `:::`
    Container,
    /// `::name[text]` on its own line
    Leaf,
    /// `:name[text]` inside prose
    Text,
}

impl DirectiveForm {
    pub const ALL: [DirectiveForm; 3] = [
        DirectiveForm::Container,
        DirectiveForm::Leaf,
        DirectiveForm::Text,
    ];

    /// How an author writes `name` in this form.
    pub fn syntax(self, name: &str) -> String {
        match self {
            DirectiveForm::Container => format!(":::{name}"),
            DirectiveForm::Leaf => format!("::{name}[...]"),
            DirectiveForm::Text => format!(":{name}[...]"),
        }
    }

    /// The marker written before the name.
    pub fn marker(self) -> &'static str {
        match self {
            DirectiveForm::Container => ":::",
            DirectiveForm::Leaf => "::",
            DirectiveForm::Text => ":",
        }
    }
}

impl fmt::Display for DirectiveForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveForm::Container => f.write_str("container"),
            DirectiveForm::Leaf => f.write_str("leaf"),
            DirectiveForm::Text => f.write_str("inline"),
        }
    }
}

/// Forms and attributes a supported directive accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveCapability {
    pub container: bool,
    pub leaf: bool,
    pub text: bool,
    /// Accepts the `{open}` attribute.
    pub open: bool,
}

impl DirectiveCapability {
    pub fn allows(&self, form: DirectiveForm) -> bool {
        match form {
            DirectiveForm::Container => self.container,
            DirectiveForm::Leaf => self.leaf,
            DirectiveForm::Text => self.text,
        }
    }
}

const SUPPORTED: &[(&str, DirectiveCapability)] = &[
    (
        "note",
        DirectiveCapability {
            container: true,
            leaf: false,
            text: false,
            open: false,
        },
    ),
    (
        "collapse",
        DirectiveCapability {
            container: true,
            leaf: false,
            text: true,
            open: true,
        },
    ),
    (
        "footnote",
        DirectiveCapability {
            container: false,
            leaf: true,
            text: true,
            open: false,
        },
    ),
];

/// Names that look like directives from other Markdown dialects but are
/// rejected here.
const UNSUPPORTED: &[&str] = &[
    "warning",
    "tip",
    "info",
    "caution",
    "danger",
    "important",
    "details",
    "aside",
];

/// Capability of a supported directive.
pub fn capability(name: &str) -> Option<DirectiveCapability> {
    SUPPORTED
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, cap)| *cap)
}

/// All supported directive names, in table order.
pub fn supported_names() -> impl Iterator<Item = &'static str> {
    SUPPORTED.iter().map(|(name, _)| *name)
}

pub fn is_unsupported(name: &str) -> bool {
    UNSUPPORTED.contains(&name)
}

/// Supported or deliberately unsupported.
pub fn is_known(name: &str) -> bool {
    capability(name).is_some() || is_unsupported(name)
}

/// Supported directive names that accept `form`, in table order.
pub fn names_for_form(form: DirectiveForm) -> Vec<&'static str> {
    SUPPORTED
        .iter()
        .filter(|(_, cap)| cap.allows(form))
        .map(|(name, _)| *name)
        .collect()
}

/// Comma-separated syntax list of the supported directives for `form`,
/// e.g. `:::note, :::collapse`.
pub fn supported_syntax_list(form: DirectiveForm) -> String {
    names_for_form(form)
        .into_iter()
        .map(|name| form.syntax(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Syntax of every form `name` does accept, joined with " or ".
pub fn allowed_syntax(name: &str, cap: DirectiveCapability) -> String {
    DirectiveForm::ALL
        .into_iter()
        .filter(|form| cap.allows(*form))
        .map(|form| form.syntax(name))
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(capability("note").is_some());
        assert!(capability("Note").is_none());
    }

    #[test]
    fn supported_and_unsupported_are_disjoint() {
        for name in supported_names() {
            assert!(!is_unsupported(name), "{name} is in both tables");
        }
    }

    #[test]
    fn form_lists() {
        assert_eq!(names_for_form(DirectiveForm::Container), vec!["note", "collapse"]);
        assert_eq!(names_for_form(DirectiveForm::Leaf), vec!["footnote"]);
        assert_eq!(
            supported_syntax_list(DirectiveForm::Text),
            ":collapse[...], :footnote[...]"
        );
    }

    #[test]
    fn allowed_syntax_joins_forms() {
        let cap = capability("collapse").expect("collapse is supported");
        assert_eq!(allowed_syntax("collapse", cap), ":::collapse or :collapse[...]");
    }

    #[test]
    fn known_names() {
        assert!(is_known("footnote"));
        assert!(is_known("warning"));
        assert!(!is_known("nte"));
    }
}
