//! Cleaner: rewrites a Markdown tree into a fresh output tree.
//!
//! Passes run in a fixed order per document: wiki links, embedded images,
//! then heading repair. Filename normalization runs last over the whole
//! output tree. The source tree is only ever read.
//!
//! The output directory is deleted and recreated on every run. Never point it
//! at a directory you want to keep.

use crate::error::{MigrateError, Result};
use crate::models::{CleanOptions, Rename};
use crate::patterns::{EMBEDDED_IMAGE, HEADING_LINE, NAME_UNSAFE, NUMERIC_PREFIX, WIKI_LINK};
use crate::utils;
use regex::Captures;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-run cleaner state: the changed files and renames of the last run.
pub struct MarkdownCleaner {
    source: PathBuf,
    output: PathBuf,
    changes: Vec<String>,
    renames: Vec<Rename>,
}

impl MarkdownCleaner {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        MarkdownCleaner {
            source: source.into(),
            output: output.into(),
            changes: Vec::new(),
            renames: Vec::new(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Clean every Markdown file into the output tree.
    ///
    /// Returns the relative paths whose content changed, in visit order.
    pub fn clean(&mut self, opts: &CleanOptions) -> Result<&[String]> {
        self.check_paths()?;
        self.changes.clear();
        self.renames.clear();

        recreate_dir(&self.output)?;

        for path in utils::markdown_files(&self.source)? {
            let rel_path = utils::relative_path(&path, &self.source);
            let rel = rel_path.to_string_lossy().to_string();
            let original = utils::read_text(&path)?;
            let content = apply_passes(&original, opts);
            if content != original {
                log::debug!("changed {}", rel);
                self.changes.push(rel.clone());
            } else {
                log::debug!("copied {}", rel);
            }
            utils::write_text(&self.output.join(&rel_path), &content)?;
        }

        if opts.normalize_names {
            self.renames = normalize_filenames(&self.output)?;
        }
        Ok(&self.changes)
    }

    pub fn renames(&self) -> &[Rename] {
        &self.renames
    }

    /// Usage checks that must pass before anything is deleted.
    fn check_paths(&self) -> Result<()> {
        if !self.source.is_dir() {
            return Err(MigrateError::NotADirectory(self.source.clone()));
        }
        if self.output.exists() {
            let src =
                fs::canonicalize(&self.source).map_err(|e| MigrateError::io(&self.source, e))?;
            let out =
                fs::canonicalize(&self.output).map_err(|e| MigrateError::io(&self.output, e))?;
            if src.starts_with(&out) {
                return Err(MigrateError::OutputContainsSource {
                    source_dir: self.source.clone(),
                    output: self.output.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Remove `dir` if present, then create it empty. Not atomic.
fn recreate_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        log::info!("removing existing output {}", dir.display());
        fs::remove_dir_all(dir).map_err(|e| MigrateError::io(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| MigrateError::io(dir, e))
}

/// Apply the enabled text passes in their fixed order.
pub fn apply_passes(content: &str, opts: &CleanOptions) -> String {
    let mut text = content.to_string();
    if opts.convert_links {
        text = convert_wiki_links(&text);
    }
    if opts.convert_images {
        text = convert_embedded_images(&text);
    }
    if opts.fix_headings {
        text = fix_headings(&text);
    }
    text
}

/// `[[Page Name]]` → `[Page Name](/page-name)`,
/// `[[Page Name|Label]]` → `[Label](/page-name)`.
pub fn convert_wiki_links(content: &str) -> String {
    WIKI_LINK
        .replace_all(content, |caps: &Captures| {
            let body = &caps[1];
            let (link, text) = body.split_once('|').unwrap_or((body, body));
            format!("[{}](/{})", text, slugify(link))
        })
        .into_owned()
}

/// Lower-case, then spaces and underscores become dashes.
pub fn slugify(link: &str) -> String {
    link.to_lowercase().replace(' ', "-").replace('_', "-")
}

/// `![[diagram.png]]` → `![diagram](./diagram.png)`.
pub fn convert_embedded_images(content: &str) -> String {
    EMBEDDED_IMAGE
        .replace_all(content, |caps: &Captures| {
            let path = &caps[1];
            let alt = Path::new(path)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string());
            format!("![{}](./{})", alt, path)
        })
        .into_owned()
}

/// Demote every H1 after the first to H2 and clamp headings that skip a
/// level to one below the previous heading.
///
/// The first heading in a document is never clamped, whatever its depth.
pub fn fix_headings(content: &str) -> String {
    let mut h1_found = false;
    let mut prev_level = 0usize;
    let mut out: Vec<String> = Vec::new();

    for line in content.split('\n') {
        let Some(caps) = HEADING_LINE.captures(line) else {
            out.push(line.to_string());
            continue;
        };
        let text = caps.get(2).map_or("", |m| m.as_str());
        let mut level = caps[1].len();
        let mut rewritten: Option<String> = None;

        if level == 1 {
            if h1_found {
                level = 2;
                rewritten = Some(format!("## {}", text));
            } else {
                h1_found = true;
            }
        }
        if prev_level > 0 && level > prev_level + 1 {
            level = prev_level + 1;
            rewritten = Some(format!("{} {}", "#".repeat(level), text));
        }
        prev_level = level;
        out.push(rewritten.unwrap_or_else(|| line.to_string()));
    }
    out.join("\n")
}

/// Normalize one file name: spaces to dashes, drop unsafe characters, drop a
/// leading `NN.` ordering prefix, lower-case.
pub fn normalize_name(name: &str) -> String {
    let dashed = name.replace(' ', "-");
    let safe = NAME_UNSAFE.replace_all(&dashed, "");
    let unprefixed = NUMERIC_PREFIX.replace(&safe, "");
    unprefixed.to_lowercase()
}

/// Rename every file under `root` to its normalized name.
///
/// Colliding names are not detected; the last rename wins.
pub fn normalize_filenames(root: &Path) -> Result<Vec<Rename>> {
    let mut renames = Vec::new();
    for path in utils::all_files(root)? {
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        let new_name = normalize_name(&name);
        if new_name == name {
            continue;
        }
        let target = path.with_file_name(&new_name);
        fs::rename(&path, &target).map_err(|e| MigrateError::io(&path, e))?;
        let rename = Rename {
            from: utils::relative(&path, root),
            to: utils::relative(&target, root),
        };
        log::info!("renamed {} -> {}", rename.from, rename.to);
        renames.push(rename);
    }
    Ok(renames)
}
