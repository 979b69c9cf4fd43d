//! Read-only issue detection over a Markdown tree.
//!
//! Produces a `ScanReport` with per-file findings and aggregate statistics.
//! Each document is checked independently; nothing is ever written.

use crate::error::{MigrateError, Result};
use crate::models::{Finding, IssueCategory, ScanReport, Stats};
use crate::patterns::{
    ABSOLUTE_PATH, EMBEDDED_IMAGE, EMPTY_HEADING, H1_LINE, HEADING_MARKER, WIKI_LINK,
};
use crate::utils;
use regex::Regex;
use std::path::PathBuf;

/// How many captured bodies a link/image finding quotes.
const SAMPLE_LIMIT: usize = 3;

/// Per-run detector state. `scan` resets it, so one detector can be reused.
pub struct IssueDetector {
    source: PathBuf,
    report: ScanReport,
}

impl IssueDetector {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let report = ScanReport {
            source: source.to_string_lossy().to_string(),
            ..ScanReport::default()
        };
        IssueDetector { source, report }
    }

    /// Scan every Markdown file under the source tree.
    pub fn scan(&mut self) -> Result<&ScanReport> {
        if !self.source.is_dir() {
            return Err(MigrateError::NotADirectory(self.source.clone()));
        }
        self.report.stats = Stats::default();
        self.report.files.clear();

        for path in utils::markdown_files(&self.source)? {
            let content = utils::read_text(&path)?;
            let rel = utils::relative(&path, &self.source);
            let (findings, stats) = check_text(&content);
            log::debug!("checked {} ({} finding(s))", rel, findings.len());
            self.report.stats.absorb(&stats);
            if !findings.is_empty() {
                self.report.files.insert(rel, findings);
            }
        }
        Ok(&self.report)
    }

    pub fn report(&self) -> &ScanReport {
        &self.report
    }
}

/// Run all six checks against one document.
///
/// Returns findings in check order plus this document's contribution to the
/// aggregate counters (`total_files` is always 1).
pub fn check_text(content: &str) -> (Vec<Finding>, Stats) {
    let mut stats = Stats {
        total_files: 1,
        ..Stats::default()
    };
    let mut findings = Vec::new();

    // Embedded images also match the wiki-link pattern and are counted twice.
    if let Some(f) = bracket_finding(
        &WIKI_LINK,
        content,
        IssueCategory::WikiLink,
        "wiki-style link(s)",
    ) {
        stats.wiki_links += f.count;
        findings.push(f);
    }
    if let Some(f) = bracket_finding(
        &EMBEDDED_IMAGE,
        content,
        IssueCategory::EmbeddedImage,
        "embedded image(s)",
    ) {
        stats.embedded_images += f.count;
        findings.push(f);
    }

    let h1_count = H1_LINE.find_iter(content).count();
    if h1_count > 1 {
        stats.multiple_h1 += 1;
        findings.push(Finding {
            category: IssueCategory::MultipleH1,
            count: h1_count,
            message: format!("Found {} H1 headings (should be exactly 1)", h1_count),
        });
    }

    if let Some((from, to)) = first_skipped_level(content) {
        stats.skipped_levels += 1;
        findings.push(Finding {
            category: IssueCategory::SkippedLevel,
            count: 1,
            message: format!("Skipped heading level: H{} → H{}", from, to),
        });
    }

    let absolute = ABSOLUTE_PATH.find_iter(content).count();
    if absolute > 0 {
        stats.absolute_paths += absolute;
        findings.push(Finding {
            category: IssueCategory::AbsolutePath,
            count: absolute,
            message: format!("Found {} absolute path(s)", absolute),
        });
    }

    let empty = EMPTY_HEADING.find_iter(content).count();
    if empty > 0 {
        stats.empty_headings += empty;
        findings.push(Finding {
            category: IssueCategory::EmptyHeading,
            count: empty,
            message: format!("Found {} empty heading(s)", empty),
        });
    }

    if !findings.is_empty() {
        stats.files_with_issues = 1;
    }
    (findings, stats)
}

fn bracket_finding(
    re: &Regex,
    content: &str,
    category: IssueCategory,
    noun: &str,
) -> Option<Finding> {
    let bodies: Vec<&str> = re
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect();
    if bodies.is_empty() {
        return None;
    }
    let sample: Vec<String> = bodies
        .iter()
        .take(SAMPLE_LIMIT)
        .map(|b| format!("'{}'", b))
        .collect();
    Some(Finding {
        category,
        count: bodies.len(),
        message: format!("Found {} {}: [{}]", bodies.len(), noun, sample.join(", ")),
    })
}

/// First transition where a heading is more than one level deeper than the
/// heading before it.
fn first_skipped_level(content: &str) -> Option<(usize, usize)> {
    let levels: Vec<usize> = HEADING_MARKER
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str().len()))
        .collect();
    levels
        .windows(2)
        .find(|w| w[1] > w[0] + 1)
        .map(|w| (w[0], w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn categories(findings: &[Finding]) -> Vec<IssueCategory> {
        findings.iter().map(|f| f.category).collect()
    }

    #[test]
    fn test_embedded_image_is_also_counted_as_wiki_link() {
        let (findings, stats) = check_text("See [[A]] and ![[B.png]].\n");
        assert_eq!(stats.wiki_links, 2);
        assert_eq!(stats.embedded_images, 1);
        assert_eq!(
            findings[0].message,
            "Found 2 wiki-style link(s): ['A', 'B.png']"
        );
        assert_eq!(findings[1].message, "Found 1 embedded image(s): ['B.png']");
    }

    #[test]
    fn test_link_sample_is_capped_at_three() {
        let (findings, stats) = check_text("[[a]] [[b]] [[c]] [[d]]");
        assert_eq!(stats.wiki_links, 4);
        assert_eq!(
            findings[0].message,
            "Found 4 wiki-style link(s): ['a', 'b', 'c']"
        );
    }

    #[test]
    fn test_multiple_h1_needs_more_than_one() {
        let (findings, stats) = check_text("# One\n## Two\n");
        assert_eq!(stats.multiple_h1, 0);
        assert!(findings.is_empty());

        let (findings, stats) = check_text("# One\n## Two\n# Three\n");
        assert_eq!(stats.multiple_h1, 1);
        assert_eq!(categories(&findings), vec![IssueCategory::MultipleH1]);
        assert_eq!(findings[0].message, "Found 2 H1 headings (should be exactly 1)");
    }

    #[test]
    fn test_skipped_level_reports_first_transition_only() {
        let (findings, stats) = check_text("# A\n### C\n#### D\n###### F\n");
        assert_eq!(stats.skipped_levels, 1);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Skipped heading level: H1 → H3");
    }

    #[test]
    fn test_first_heading_depth_is_not_a_skip() {
        let (findings, _) = check_text("### Start deep\n#### Then one more\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn test_absolute_paths_and_empty_headings_are_counted() {
        let text = "[a](/abs/a.md) [b](/C:/b.md) [c](./c.md)\n#\n##   \ntext\n";
        let (findings, stats) = check_text(text);
        assert_eq!(stats.absolute_paths, 2);
        assert_eq!(stats.empty_headings, 2);
        assert_eq!(
            categories(&findings),
            vec![IssueCategory::AbsolutePath, IssueCategory::EmptyHeading]
        );
        assert_eq!(findings[0].message, "Found 2 absolute path(s)");
        assert_eq!(findings[1].message, "Found 2 empty heading(s)");
    }

    #[test]
    fn test_clean_document_has_no_findings() {
        let (findings, stats) = check_text("# Title\n\n## Section\n\nBody [link](./x.md)\n");
        assert!(findings.is_empty());
        assert_eq!(stats.files_with_issues, 0);
        assert_eq!(stats.total_files, 1);
    }

    #[test]
    fn test_scan_aggregates_and_keys_by_relative_path() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guide")).unwrap();
        fs::write(root.join("clean.md"), "# Fine\n").unwrap();
        fs::write(root.join("guide/links.md"), "# L\n[[X]] [[Y]]\n").unwrap();
        fs::write(root.join("notes.txt"), "[[ignored]]").unwrap();

        let mut det = IssueDetector::new(root);
        let report = det.scan().unwrap();
        assert_eq!(report.stats.total_files, 2);
        assert_eq!(report.stats.files_with_issues, 1);
        assert_eq!(report.stats.wiki_links, 2);
        let key = Path::new("guide").join("links.md").to_string_lossy().to_string();
        assert!(report.files.contains_key(&key));
        assert_eq!(report.files.len(), 1);
    }

    #[test]
    fn test_rescan_resets_counters() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("a.md"), "[[A]]").unwrap();
        let mut det = IssueDetector::new(tmp.path());
        det.scan().unwrap();
        let report = det.scan().unwrap();
        assert_eq!(report.stats.total_files, 1);
        assert_eq!(report.stats.wiki_links, 1);
    }

    #[test]
    fn test_scan_is_read_only_and_deterministic() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("b/two.md"), "# A\n### C\n#\n").unwrap();
        fs::write(root.join("one.md"), "# A\n# B\n![[x.png]]\n").unwrap();
        let before: Vec<_> = utils::all_files(root)
            .unwrap()
            .iter()
            .map(|p| fs::metadata(p).unwrap().modified().unwrap())
            .collect();

        let mut det = IssueDetector::new(root);
        det.scan().unwrap();
        let first = crate::output::render_report(det.report(), false);
        det.scan().unwrap();
        let second = crate::output::render_report(det.report(), false);
        assert_eq!(first, second);

        let after: Vec<_> = utils::all_files(root)
            .unwrap()
            .iter()
            .map(|p| fs::metadata(p).unwrap().modified().unwrap())
            .collect();
        assert_eq!(before, after);
        assert_eq!(utils::all_files(root).unwrap().len(), 2);
    }

    #[test]
    fn test_scan_rejects_missing_directory() {
        let tmp = tempdir().unwrap();
        let mut det = IssueDetector::new(tmp.path().join("missing"));
        assert!(matches!(det.scan(), Err(MigrateError::NotADirectory(_))));
    }

    #[test]
    fn test_sample_bodies_are_quoted_verbatim() {
        let (findings, _) = check_text(r#"[[C:\docs]] [[say "hi"]]"#);
        assert_eq!(
            findings[0].message,
            r#"Found 2 wiki-style link(s): ['C:\docs', 'say "hi"']"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_handles_non_utf8_root() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let tmp = tempdir().unwrap();
        let root = tmp.path().join(OsStr::from_bytes(b"docs\xff"));
        if fs::create_dir_all(&root).is_err() {
            return;
        }
        fs::write(root.join("a.md"), "[[A]]\n# x\n# y\n").unwrap();

        let mut det = IssueDetector::new(&root);
        let report = det.scan().unwrap();
        assert_eq!(report.stats.total_files, 1);
        assert_eq!(report.stats.wiki_links, 1);
        assert_eq!(report.stats.multiple_h1, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_counts_each_file_once_despite_symlink_loop() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/x.md"), "[[X]]").unwrap();
        std::os::unix::fs::symlink(root.join("a"), root.join("a/loop")).unwrap();

        let mut det = IssueDetector::new(root);
        let report = det.scan().unwrap();
        assert_eq!(report.stats.total_files, 1);
        assert_eq!(report.stats.wiki_links, 1);
        assert_eq!(report.files.len(), 1);
    }
}
