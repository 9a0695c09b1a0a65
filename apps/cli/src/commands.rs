//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use walkdir::WalkDir;

use lenscheck_core::check::{self, CheckProgress, CheckReport, ContentKind, SourceFile};
use lenscheck_core::{bundle_article_with_collapsed, extract_video_range, validate_chat_precedence};
use lenscheck_shared::{
    AppConfig, ContentError, ExcerptRequest, LensCheckError, OutputFormat, SegmentRef,
    init_config, load_config, load_config_from,
};

/// Separator between the two anchors of an `--excerpt` argument.
const ANCHOR_SEPARATOR: &str = "=>";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// lenscheck: validate lesson content before it is published.
#[derive(Parser)]
#[command(
    name = "lenscheck",
    version,
    about = "Validate directives, excerpts and segment order in lesson content.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./lenscheck.toml, then ~/.lenscheck/lenscheck.toml).
    #[arg(long, global = true, env = "LENSCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report format, overriding the config file.
    #[arg(long, global = true)]
    pub format: Option<ReportFormat>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Report output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum ReportFormat {
    Text,
    Json,
}

impl From<ReportFormat> for OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Text => OutputFormat::Text,
            ReportFormat::Json => OutputFormat::Json,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Check Markdown content files (directories are walked).
    Check {
        /// Files or directories to check.
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Exit non-zero on warnings too.
        #[arg(long)]
        fail_on_warnings: bool,

        /// Directory names holding articles (repeatable; replaces the config list).
        #[arg(long = "article-dir")]
        article_dirs: Vec<String>,
    },

    /// Preview excerpts of an article with the collapsed material between them.
    Excerpt {
        /// Article file.
        #[arg(long)]
        article: PathBuf,

        /// Excerpt as `FROM=>TO` (repeatable, in order). Leave a side empty
        /// to run from the start or to the end of the article.
        #[arg(long = "excerpt", required = true)]
        excerpts: Vec<String>,
    },

    /// Extract part of a video transcript by timestamp.
    Video {
        /// Transcript file.
        #[arg(long)]
        transcript: PathBuf,

        /// Start timestamp (MM:SS or H:MM:SS).
        #[arg(long)]
        from: String,

        /// End timestamp, exclusive. Omit to run to the end.
        #[arg(long)]
        to: Option<String>,
    },

    /// Check segment ordering from a JSON list of `{"type", "line"}` objects.
    Segments {
        /// JSON file with the segment list.
        file: PathBuf,

        /// Content file the segments came from, used in diagnostics.
        #[arg(long)]
        source: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize the user config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "lenscheck=info",
        1 => "lenscheck=debug",
        _ => "lenscheck=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }

    match cli.command {
        Command::Check {
            paths,
            fail_on_warnings,
            article_dirs,
        } => {
            if fail_on_warnings {
                config.check.fail_on_warnings = true;
            }
            if !article_dirs.is_empty() {
                config.check.article_dirs = article_dirs;
            }
            cmd_check(&paths, &config)
        }
        Command::Excerpt { article, excerpts } => cmd_excerpt(&article, &excerpts, &config),
        Command::Video {
            transcript,
            from,
            to,
        } => cmd_video(&transcript, &from, to.as_deref(), &config),
        Command::Segments { file, source } => {
            cmd_segments(&file, source.as_deref(), &config)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

fn cmd_check(paths: &[PathBuf], config: &AppConfig) -> Result<ExitCode> {
    let files = collect_content_files(paths, config);
    info!(files = files.len(), "checking content");

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let text = read_text(&path)?;
        let kind = if config.check.is_article(&path) {
            ContentKind::Article
        } else {
            ContentKind::NonArticle
        };
        sources.push(SourceFile { path, text, kind });
    }

    let progress = CliProgress::new(sources.len() as u64);
    let report = check::check_sources(&sources, &progress);

    match config.output.format {
        OutputFormat::Text => print_report_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(exit_code(report.has_blocking(config.check.fail_on_warnings)))
}

/// Expand directories and keep files with a content extension.
fn collect_content_files(paths: &[PathBuf], config: &AppConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for root in paths {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && config.check.is_content_file(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files
}

fn print_report_text(report: &CheckReport) {
    for diagnostic in &report.diagnostics {
        println!("{diagnostic}");
    }
    println!();
    println!(
        "  Checked {} file(s): {} error(s), {} warning(s)",
        report.files_checked, report.errors, report.warnings
    );
}

/// CLI progress reporter using an indicatif bar.
struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl CheckProgress for CliProgress {
    fn file_checked(&self, path: &Path, current: usize, _total: usize) {
        self.bar.set_position(current as u64);
        self.bar.set_message(path.display().to_string());
    }

    fn done(&self, _report: &CheckReport) {
        self.bar.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// excerpt
// ---------------------------------------------------------------------------

fn cmd_excerpt(article_path: &Path, args: &[String], config: &AppConfig) -> Result<ExitCode> {
    let article = read_text(article_path)?;
    let requests: Vec<ExcerptRequest> = args
        .iter()
        .map(String::as_str)
        .map(parse_excerpt_arg)
        .collect::<Result<_>>()?;

    let bundled = bundle_article_with_collapsed(&article, &requests, article_path);
    let failed = bundled.iter().any(|b| b.error.is_some());

    match config.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundled)?),
        OutputFormat::Text => {
            for (i, excerpt) in bundled.iter().enumerate() {
                if let Some(before) = &excerpt.collapsed_before {
                    println!("  [collapsed: {} chars]", before.chars().count());
                }
                println!("--- excerpt {} ---", i + 1);
                match &excerpt.error {
                    Some(err) => println!("{err}"),
                    None => println!("{}", excerpt.content),
                }
                if let Some(after) = &excerpt.collapsed_after {
                    println!("  [collapsed: {} chars]", after.chars().count());
                }
            }
        }
    }

    Ok(exit_code(failed))
}

/// Parse `FROM=>TO`; an empty side means "no anchor".
fn parse_excerpt_arg(arg: &str) -> Result<ExcerptRequest> {
    let (from, to) = arg
        .split_once(ANCHOR_SEPARATOR)
        .ok_or_else(|| eyre!("excerpt '{arg}' must look like 'FROM{ANCHOR_SEPARATOR}TO'"))?;

    let anchor = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    Ok(ExcerptRequest {
        from: anchor(from),
        to: anchor(to),
    })
}

// ---------------------------------------------------------------------------
// video
// ---------------------------------------------------------------------------

fn cmd_video(
    transcript_path: &Path,
    from: &str,
    to: Option<&str>,
    config: &AppConfig,
) -> Result<ExitCode> {
    let transcript = read_text(transcript_path)?;

    match extract_video_range(&transcript, from, to, transcript_path) {
        Ok(excerpt) => {
            match config.output.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&excerpt)?),
                OutputFormat::Text => println!("{}", excerpt.transcript),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_diagnostics(std::slice::from_ref(&err), config)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ---------------------------------------------------------------------------
// segments
// ---------------------------------------------------------------------------

fn cmd_segments(file: &Path, source: Option<&Path>, config: &AppConfig) -> Result<ExitCode> {
    let json = read_text(file)?;
    let segments = parse_segments(&json, file)?;

    let diagnostics = validate_chat_precedence(&segments, source.unwrap_or(file));
    print_diagnostics(&diagnostics, config)?;

    Ok(exit_code(diagnostics.iter().any(ContentError::is_error)))
}

fn parse_segments(json: &str, file: &Path) -> lenscheck_shared::Result<Vec<SegmentRef>> {
    serde_json::from_str(json).map_err(|e| {
        LensCheckError::parse(format!(
            "{} is not a JSON list of segments: {e}",
            file.display()
        ))
    })
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<ExitCode> {
    let path = init_config()?;
    println!("  Wrote default config to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_config_show(config: &AppConfig) -> Result<ExitCode> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_text(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path).map_err(|e| LensCheckError::io(path, e))?)
}

fn print_diagnostics(diagnostics: &[ContentError], config: &AppConfig) -> Result<()> {
    match config.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(diagnostics)?),
        OutputFormat::Text => {
            for diagnostic in diagnostics {
                println!("{diagnostic}");
            }
        }
    }
    Ok(())
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_anchors() {
        let req = parse_excerpt_arg("The first => the end.").expect("parses");
        assert_eq!(req, ExcerptRequest::new("The first", "the end."));
    }

    #[test]
    fn empty_sides_are_absent_anchors() {
        let req = parse_excerpt_arg("=>the end.").expect("parses");
        assert!(req.from.is_none());
        assert_eq!(req.to.as_deref(), Some("the end."));

        let req = parse_excerpt_arg("Start here=>").expect("parses");
        assert!(req.to.is_none());
    }

    #[test]
    fn missing_separator_is_rejected() {
        assert!(parse_excerpt_arg("no separator").is_err());
    }

    #[test]
    fn segment_list_parses_or_reports_parse_error() {
        let json = r#"[{"type": "text", "line": 1}, {"type": "chat", "line": 4}]"#;
        let segments = parse_segments(json, Path::new("s.json")).expect("parses");
        assert_eq!(segments[1], SegmentRef::new("chat", 4));

        let err = parse_segments("{not json", Path::new("s.json")).expect_err("fails");
        assert!(matches!(err, LensCheckError::Parse { .. }));
        assert!(err.to_string().contains("s.json"));
    }

    #[test]
    fn cli_parses_check_flags() {
        let cli = Cli::try_parse_from([
            "lenscheck",
            "--format",
            "json",
            "check",
            "content",
            "--fail-on-warnings",
            "--article-dir",
            "readings",
        ])
        .expect("parses");
        assert!(matches!(cli.format, Some(ReportFormat::Json)));
        match cli.command {
            Command::Check {
                paths,
                fail_on_warnings,
                article_dirs,
            } => {
                assert_eq!(paths, vec![PathBuf::from("content")]);
                assert!(fail_on_warnings);
                assert_eq!(article_dirs, vec!["readings".to_string()]);
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn cli_requires_an_excerpt() {
        assert!(Cli::try_parse_from(["lenscheck", "excerpt", "--article", "a.md"]).is_err());
    }
}
