//! Content diagnostics.
//!
//! Every checker in lenscheck reports problems as [`ContentError`] values and
//! keeps going, so a single pass surfaces everything wrong with a file. The
//! caller decides what to do with them: error-severity diagnostics block
//! publishing, warnings never do.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Severity level for a content diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stylistic or likely-unintended issue. Does not block publishing.
    Warning,
    /// Structural defect that should block publishing.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A single problem found in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentError {
    /// File the problem was found in.
    pub file: PathBuf,
    /// 1-based line number, when the problem can be pinned to a line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Human-readable description of the problem.
    pub message: String,
    /// How the author can fix it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub severity: Severity,
}

impl ContentError {
    /// Create an error-severity diagnostic.
    pub fn error(file: impl AsRef<Path>, line: Option<usize>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, file, line, message)
    }

    /// Create a warning-severity diagnostic.
    pub fn warning(
        file: impl AsRef<Path>,
        line: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, file, line, message)
    }

    fn new(
        severity: Severity,
        file: impl AsRef<Path>,
        line: Option<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            line,
            message: message.into(),
            suggestion: None,
            severity,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        write!(f, ": {}: {}", self.severity, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

/// Count `(errors, warnings)` in a slice of diagnostics.
pub fn count_by_severity(diagnostics: &[ContentError]) -> (usize, usize) {
    diagnostics.iter().fold((0, 0), |(errors, warnings), d| match d.severity {
        Severity::Error => (errors + 1, warnings),
        Severity::Warning => (errors, warnings + 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_line_and_suggestion() {
        let diag = ContentError::error("articles/intro.md", Some(12), "Unclosed container")
            .with_suggestion("Add ':::' to close it");
        assert_eq!(
            diag.to_string(),
            "articles/intro.md:12: error: Unclosed container (Add ':::' to close it)"
        );
    }

    #[test]
    fn display_without_line() {
        let diag = ContentError::warning("lessons/a.md", None, "Something odd");
        assert_eq!(diag.to_string(), "lessons/a.md: warning: Something odd");
    }

    #[test]
    fn severity_serializes_lowercase() {
        let diag = ContentError::warning("a.md", Some(1), "msg");
        let json = serde_json::to_value(&diag).expect("serialize");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["line"], 1);
        assert!(json.get("suggestion").is_none());
    }

    #[test]
    fn severity_counts() {
        let diags = vec![
            ContentError::error("a.md", None, "e1"),
            ContentError::warning("a.md", None, "w1"),
            ContentError::error("a.md", None, "e2"),
        ];
        assert_eq!(count_by_severity(&diags), (2, 1));
        assert!(diags[0].is_error());
        assert!(diags[1].is_warning());
    }
}
