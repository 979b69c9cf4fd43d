//! Output rendering for the detector report and the cleaner summary.
//!
//! Supports `human` (default) and `json` for the detector. Rendering is pure
//! (`render_*` return strings); `print_*` only writes to stdout.

use crate::config::OutputMode;
use crate::error::Result;
use crate::models::{CleanSummary, ScanReport};
use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 60;

fn paint(text: &str, color: bool, f: impl Fn(&str) -> String) -> String {
    if color {
        f(text)
    } else {
        text.to_string()
    }
}

/// Render the human-readable detection report.
pub fn render_report(report: &ScanReport, color: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = Vec::new();
    lines.push(rule.clone());
    lines.push(paint(
        "VITEPRESS MIGRATION - ISSUE DETECTION REPORT",
        color,
        |s| s.bold().to_string(),
    ));
    lines.push(rule.clone());
    lines.push(String::new());
    lines.push(format!("Source Directory: {}", report.source));
    lines.push(String::new());
    lines.push(paint("--- Statistics ---", color, |s| s.cyan().to_string()));
    lines.push(format!("Total Markdown Files: {}", report.stats.total_files));
    lines.push(format!("Files with Issues: {}", report.stats.files_with_issues));
    lines.push(String::new());
    lines.push(paint("--- Issue Counts ---", color, |s| s.cyan().to_string()));
    for (label, count) in report.stats.issue_counts() {
        lines.push(format!("{}: {}", label, count));
    }

    if report.has_issues() {
        lines.push(String::new());
        lines.push(paint("--- Detailed Issues ---", color, |s| s.cyan().to_string()));
        for (file, findings) in &report.files {
            lines.push(String::new());
            lines.push(format!("📄 {}", paint(file, color, |s| s.bold().to_string())));
            for f in findings {
                let icon = paint("⚠️ ", color, |s| s.yellow().to_string());
                lines.push(format!("   {} {}", icon, f.message));
            }
        }
    } else {
        lines.push(String::new());
        lines.push(paint(
            "✅ No issues found! Ready for migration.",
            color,
            |s| s.green().bold().to_string(),
        ));
    }
    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

/// Render the report as pretty JSON.
pub fn render_report_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Print the detection report in the requested format.
pub fn print_report(report: &ScanReport, mode: OutputMode, color: bool) -> Result<()> {
    match mode {
        OutputMode::Json => println!("{}", render_report_json(report)?),
        OutputMode::Human => println!("{}", render_report(report, color)),
    }
    Ok(())
}

/// Render the cleaner summary.
pub fn render_clean(summary: &CleanSummary, color: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Cleaned Markdown files copied to: {}", summary.output));
    lines.push(format!("Files modified: {}", summary.changed.len()));
    if !summary.changed.is_empty() {
        lines.push(String::new());
        lines.push(paint("Modified files:", color, |s| s.bold().to_string()));
        for f in &summary.changed {
            lines.push(format!("  - {}", f));
        }
    }
    if let Some(renamed) = &summary.renamed {
        lines.push(String::new());
        lines.push(format!("Files renamed: {}", renamed.len()));
        for r in renamed {
            lines.push(format!("  - {} → {}", r.from, r.to));
        }
    }
    lines.join("\n")
}

pub fn print_clean(summary: &CleanSummary, color: bool) {
    println!("{}", render_clean(summary, color));
}
