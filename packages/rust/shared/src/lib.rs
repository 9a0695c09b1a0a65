//! Shared types, diagnostics, error model, and configuration for lenscheck.
//!
//! This crate is the foundation depended on by all other lenscheck crates.
//! It provides:
//! - [`ContentError`] / [`Severity`]: diagnostics about content
//! - [`LensCheckError`]: the operational error type
//! - Data-model types ([`ExcerptRequest`], [`CollapsedExcerpt`], [`VideoExcerpt`], [`SegmentRef`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CheckConfig, OutputConfig, OutputFormat, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use diagnostic::{ContentError, Severity, count_by_severity};
pub use error::{LensCheckError, Result};
pub use types::{
    CollapsedExcerpt, ExcerptRequest, ExcerptSpan, ExtractedExcerpt, SegmentRef, VideoExcerpt,
    VideoExcerptResult, segment_type,
};
