//! Error type shared by the detector, the cleaner, and config loading.
//!
//! Usage errors are raised before anything touches the filesystem; every
//! other variant is fatal for the run.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MigrateError>;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("'{}' is not a valid directory", .0.display())]
    NotADirectory(PathBuf),

    #[error(
        "output directory '{}' contains source '{}'; refusing to delete it",
        output.display(),
        source_dir.display()
    )]
    OutputContainsSource {
        source_dir: PathBuf,
        output: PathBuf,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl MigrateError {
    /// Wrap an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MigrateError::Io {
            path: path.into(),
            source,
        }
    }

    /// Usage errors exit with 1; everything else is a fatal run failure.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            MigrateError::NotADirectory(_)
                | MigrateError::OutputContainsSource { .. }
                | MigrateError::Config { .. }
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            1
        } else {
            2
        }
    }
}
