//! Regular expressions shared by the detector and the cleaner.
//!
//! Each pattern is compiled once on first use. Multi-line patterns scan a
//! whole document; `HEADING_LINE` is applied to a single line at a time.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(src: &str) -> Regex {
    // Patterns are literals in this file; a failure here is a programming error.
    Regex::new(src).unwrap_or_else(|e| panic!("invalid built-in pattern {src:?}: {e}"))
}

/// `[[target]]` or `[[target|text]]`; group 1 is the body.
pub static WIKI_LINK: Lazy<Regex> = Lazy::new(|| compile(r"\[\[([^\]]+)\]\]"));

/// `![[file.png]]`; group 1 is the embedded path.
pub static EMBEDDED_IMAGE: Lazy<Regex> = Lazy::new(|| compile(r"!\[\[([^\]]+)\]\]"));

/// A top-level heading: one `#`, a space, then anything but another `#`.
pub static H1_LINE: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^# [^#]"));

/// Heading markers followed by a space; group 1 is the run of `#`.
pub static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^(#{1,6}) "));

/// `[label](/path)` and `[label](/C:...)` style local links.
pub static ABSOLUTE_PATH: Lazy<Regex> =
    Lazy::new(|| compile(r"\[([^\]]+)\]\((/[a-zA-Z]:?[^)]+)\)"));

/// A heading marker with nothing after it but whitespace.
pub static EMPTY_HEADING: Lazy<Regex> = Lazy::new(|| compile(r"(?m)^#{1,6}\s*$"));

/// One line holding a heading; group 1 is the marker, group 2 the text.
pub static HEADING_LINE: Lazy<Regex> = Lazy::new(|| compile(r"^(#{1,6})\s+(.*)$"));

/// Anything that may not appear in a normalized file name.
pub static NAME_UNSAFE: Lazy<Regex> = Lazy::new(|| compile(r"[^\w\-.]"));

/// A `03.` ordering prefix plus the dashes a following space turned into.
pub static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"^\d+\.-*"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_line_requires_space_after_marker() {
        assert!(HEADING_LINE.is_match("## Title"));
        assert!(HEADING_LINE.is_match("#\tTabbed"));
        assert!(!HEADING_LINE.is_match("#hashtag"));
        assert!(!HEADING_LINE.is_match("####### seven"));
    }

    #[test]
    fn test_absolute_path_matches_root_and_drive_links() {
        assert!(ABSOLUTE_PATH.is_match("[a](/home/me/a.md)"));
        assert!(ABSOLUTE_PATH.is_match("[b](/C:/docs/b.md)"));
        assert!(!ABSOLUTE_PATH.is_match("[c](./c.md)"));
        assert!(!ABSOLUTE_PATH.is_match("[d](https://x.dev)"));
    }
}
