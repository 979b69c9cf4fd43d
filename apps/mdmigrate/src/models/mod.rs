//! Shared data models for detector reports and cleaner runs.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Issue categories, in the order checks run and statistics are printed.
pub enum IssueCategory {
    WikiLink,
    EmbeddedImage,
    MultipleH1,
    SkippedLevel,
    AbsolutePath,
    EmptyHeading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One detected issue within a file.
pub struct Finding {
    pub category: IssueCategory,
    /// Occurrences behind this finding (H1 lines for multiple-H1, 1 for a skip).
    pub count: usize,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Aggregate counters for one scan.
pub struct Stats {
    pub total_files: usize,
    pub files_with_issues: usize,
    pub wiki_links: usize,
    pub embedded_images: usize,
    pub multiple_h1: usize,
    pub skipped_levels: usize,
    pub absolute_paths: usize,
    pub empty_headings: usize,
}

impl Stats {
    /// Add another file's counters into this one.
    pub fn absorb(&mut self, other: &Stats) {
        self.total_files += other.total_files;
        self.files_with_issues += other.files_with_issues;
        self.wiki_links += other.wiki_links;
        self.embedded_images += other.embedded_images;
        self.multiple_h1 += other.multiple_h1;
        self.skipped_levels += other.skipped_levels;
        self.absolute_paths += other.absolute_paths;
        self.empty_headings += other.empty_headings;
    }

    /// Issue counters with their report labels, in fixed order.
    pub fn issue_counts(&self) -> [(&'static str, usize); 6] {
        [
            ("Wiki-style Links [[...]]", self.wiki_links),
            ("Embedded Images ![[...]]", self.embedded_images),
            ("Multiple H1 Headings", self.multiple_h1),
            ("Skipped Heading Levels", self.skipped_levels),
            ("Absolute File Paths", self.absolute_paths),
            ("Empty Headings", self.empty_headings),
        ]
    }
}

#[derive(Debug, Default, Clone, Serialize)]
/// Detector output: statistics plus findings keyed by relative path.
pub struct ScanReport {
    pub source: String,
    pub stats: Stats,
    #[serde(serialize_with = "files_as_list")]
    pub files: BTreeMap<String, Vec<Finding>>,
}

impl ScanReport {
    pub fn has_issues(&self) -> bool {
        !self.files.is_empty()
    }
}

fn files_as_list<S>(files: &BTreeMap<String, Vec<Finding>>, ser: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    #[derive(Serialize)]
    struct Entry<'a> {
        file: &'a str,
        findings: &'a [Finding],
    }
    ser.collect_seq(files.iter().map(|(file, findings)| Entry {
        file,
        findings,
    }))
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Which rewrite passes the cleaner applies. All off by default.
pub struct CleanOptions {
    pub fix_headings: bool,
    pub convert_links: bool,
    pub convert_images: bool,
    pub normalize_names: bool,
}

impl CleanOptions {
    /// Every pass enabled (`--all`).
    pub fn all() -> Self {
        CleanOptions {
            fix_headings: true,
            convert_links: true,
            convert_images: true,
            normalize_names: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file renamed by filename normalization, relative to the output tree.
pub struct Rename {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
/// Cleaner run summary used by printers.
pub struct CleanSummary {
    pub output: String,
    pub changed: Vec<String>,
    /// `None` when normalization did not run.
    pub renamed: Option<Vec<Rename>>,
}
