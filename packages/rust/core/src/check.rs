//! File-level checks: frontmatter split, then the directive rules that apply
//! to the kind of file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use lenscheck_markdown::{detect_directives_in_non_article, split_frontmatter, validate_directives};
use lenscheck_shared::{ContentError, count_by_severity};

/// How a content file is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    /// Directives render here and are validated.
    Article,
    /// Directives would show up verbatim; any use is flagged.
    NonArticle,
}

/// A file's text, already read by the caller.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub kind: ContentKind,
}

/// Diagnostics gathered across a batch of files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub files_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    pub diagnostics: Vec<ContentError>,
}

impl CheckReport {
    /// Fold one file's diagnostics into the report.
    pub fn add_file(&mut self, diagnostics: Vec<ContentError>) {
        let (errors, warnings) = count_by_severity(&diagnostics);
        self.files_checked += 1;
        self.errors += errors;
        self.warnings += warnings;
        self.diagnostics.extend(diagnostics);
    }

    /// Whether publishing should be blocked.
    pub fn has_blocking(&self, fail_on_warnings: bool) -> bool {
        self.errors > 0 || (fail_on_warnings && self.warnings > 0)
    }
}

/// Progress callback for batch checks.
pub trait CheckProgress {
    /// Called after each file is checked.
    fn file_checked(&self, path: &Path, current: usize, total: usize);
    /// Called when the batch completes.
    fn done(&self, report: &CheckReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl CheckProgress for SilentProgress {
    fn file_checked(&self, _path: &Path, _current: usize, _total: usize) {}
    fn done(&self, _report: &CheckReport) {}
}

/// Validate the directives in an article file.
pub fn check_article(text: &str, file: &Path) -> Vec<ContentError> {
    let doc = split_frontmatter(text);
    validate_directives(doc.body, file, doc.body_start_line)
}

/// Flag directive syntax in a file where it does not render.
pub fn check_non_article(text: &str, file: &Path) -> Vec<ContentError> {
    let doc = split_frontmatter(text);
    detect_directives_in_non_article(doc.body, file, doc.body_start_line)
}

pub fn check_source(source: &SourceFile) -> Vec<ContentError> {
    match source.kind {
        ContentKind::Article => check_article(&source.text, &source.path),
        ContentKind::NonArticle => check_non_article(&source.text, &source.path),
    }
}

/// Check a batch of files, in order.
#[instrument(skip_all, fields(files = sources.len()))]
pub fn check_sources(sources: &[SourceFile], progress: &dyn CheckProgress) -> CheckReport {
    let mut report = CheckReport::default();

    for (i, source) in sources.iter().enumerate() {
        report.add_file(check_source(source));
        progress.file_checked(&source.path, i + 1, sources.len());
    }

    info!(
        files = report.files_checked,
        errors = report.errors,
        warnings = report.warnings,
        "check complete"
    );
    progress.done(&report);
    report
}
