//! Supporting helpers: tree enumeration, relative paths, message prefixes.

use crate::error::{MigrateError, Result};
use owo_colors::OwoColorize;
use std::ffi::OsStr;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Every `*.md` file under `root`, recursively, sorted by name per directory.
pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    files_where(root, |p| p.extension() == Some(OsStr::new("md")))
}

/// Every file under `root`, recursively, sorted by name per directory.
pub fn all_files(root: &Path) -> Result<Vec<PathBuf>> {
    files_where(root, |_| true)
}

/// Walk without following directory symlinks; symlinks to files are kept.
fn files_where(root: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry?;
        if is_file(&entry) && keep(entry.path()) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

fn is_file(entry: &DirEntry) -> bool {
    let ft = entry.file_type();
    ft.is_file() || (ft.is_symlink() && entry.path().is_file())
}

/// `path` relative to `root`, as a path.
pub fn relative_path(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .ok()
        .or_else(|| pathdiff::diff_paths(path, root))
        .unwrap_or_else(|| path.to_path_buf())
}

/// `path` relative to `root`, rendered for reports.
pub fn relative(path: &Path, root: &Path) -> String {
    relative_path(path, root).to_string_lossy().to_string()
}

/// Read a document as UTF-8.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| MigrateError::io(path, e))
}

/// Write a document, creating parent directories first.
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MigrateError::io(parent, e))?;
    }
    std::fs::write(path, text).map_err(|e| MigrateError::io(path, e))
}

/// Colors only for an interactive stdout with `NO_COLOR` unset.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

pub fn error_prefix() -> String {
    if std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}
