//! Error types for lenscheck.
//!
//! Problems found *in content* are never Rust errors: they are
//! [`ContentError`](crate::ContentError) values returned by the checkers.
//! [`LensCheckError`] covers the operational side (config files, reading
//! sources). App crates wrap it with `color-eyre`.

use std::path::PathBuf;

/// Top-level error type for operational failures.
#[derive(Debug, thiserror::Error)]
pub enum LensCheckError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed input that could not be interpreted (e.g. a segment list that is not JSON).
    #[error("parse error: {message}")]
    Parse { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LensCheckError>;

impl LensCheckError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
